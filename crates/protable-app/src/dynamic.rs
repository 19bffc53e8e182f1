// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use time::Date;
use time::macros::format_description;

use crate::{CellValue, Column, Record, RowId};

pub const ID_FIELD: &str = "id";

/// Field names of a dynamic record set, in first-seen order. `id` is kept
/// out of the list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<String>,
}

impl Schema {
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn index_of(&self, name: &str) -> Option<FieldIndex> {
        self.fields
            .iter()
            .position(|field| field == name)
            .map(FieldIndex)
    }

    /// One column per field, all sortable, titled by field name.
    pub fn columns(&self) -> Vec<Column<DynamicRecord>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, name)| Column::new(FieldIndex(index), name.clone()).sortable())
            .collect()
    }

    fn intern(&mut self, name: &str) -> usize {
        match self.fields.iter().position(|field| field == name) {
            Some(index) => index,
            None => {
                self.fields.push(name.to_owned());
                self.fields.len() - 1
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldIndex(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    id: RowId,
    values: Vec<CellValue>,
    schema: Arc<Schema>,
}

impl DynamicRecord {
    pub fn get(&self, name: &str) -> CellValue {
        self.schema
            .index_of(name)
            .map(|index| self.value(index))
            .unwrap_or_default()
    }
}

impl Record for DynamicRecord {
    type Field = FieldIndex;

    fn id(&self) -> RowId {
        self.id.clone()
    }

    fn value(&self, field: FieldIndex) -> CellValue {
        self.values.get(field.0).cloned().unwrap_or_default()
    }

    fn search_values(&self) -> Vec<CellValue> {
        let mut values = Vec::with_capacity(self.values.len() + 1);
        values.push(match &self.id {
            RowId::Int(id) => CellValue::Integer(*id),
            RowId::Text(id) => CellValue::Text(id.clone()),
        });
        values.extend(self.values.iter().cloned());
        values
    }
}

/// Decodes a JSON array of objects into records sharing one schema.
pub fn load_json(raw: &str) -> Result<(Arc<Schema>, Vec<DynamicRecord>)> {
    let value: Value = serde_json::from_str(raw).context("parse JSON records")?;
    decode_rows(&value)
}

pub fn decode_rows(value: &Value) -> Result<(Arc<Schema>, Vec<DynamicRecord>)> {
    let rows = value
        .as_array()
        .ok_or_else(|| anyhow!("expected a JSON array of record objects"))?;

    let mut schema = Schema::default();
    let mut decoded = Vec::with_capacity(rows.len());
    let mut seen = BTreeSet::new();
    for (index, row) in rows.iter().enumerate() {
        let object = row
            .as_object()
            .ok_or_else(|| anyhow!("record {index} is not a JSON object"))?;
        let id = match object.get(ID_FIELD) {
            Some(raw @ (Value::Number(_) | Value::String(_))) => RowId::deserialize(raw)
                .with_context(|| format!("record {index} has non-integer id {raw}"))?,
            Some(other) => bail!("record {index} has unsupported id {other}; use an integer or string"),
            None => bail!("record {index} is missing the `{ID_FIELD}` field"),
        };
        if !seen.insert(id.clone()) {
            bail!("record {index} repeats id {id}; ids must be unique");
        }

        let mut values = Vec::new();
        for (name, raw) in object {
            if name == ID_FIELD {
                continue;
            }
            let slot = schema.intern(name);
            if values.len() <= slot {
                values.resize(slot + 1, CellValue::Null);
            }
            values[slot] = cell_from_json(raw);
        }
        decoded.push((id, values));
    }

    let schema = Arc::new(schema);
    let records = decoded
        .into_iter()
        .map(|(id, values)| DynamicRecord {
            id,
            values,
            schema: Arc::clone(&schema),
        })
        .collect();
    Ok((schema, records))
}

pub fn cell_from_json(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(flag) => CellValue::Bool(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => CellValue::Integer(integer),
            None => number
                .as_f64()
                .map(CellValue::Decimal)
                .unwrap_or_else(|| CellValue::Text(number.to_string())),
        },
        Value::String(text) => parse_date(text)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(text.clone())),
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

/// Parses `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}
