// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::fmt;
use std::sync::Arc;

use crate::{CellValue, RowId};

/// A row the engine can filter, sort and page. `Field` is the caller's
/// field enumeration, so column lookups are checked at compile time.
pub trait Record {
    type Field: Copy + PartialEq + fmt::Debug;

    fn id(&self) -> RowId;

    fn value(&self, field: Self::Field) -> CellValue;

    /// Every searchable value, in a fixed order that does not depend on the
    /// column schema.
    fn search_values(&self) -> Vec<CellValue>;
}

/// Supplies the raw record set. The engine never fetches data on its own.
pub trait RecordSource<R> {
    fn load(&self) -> Result<Vec<R>>;
}

impl<R: Clone> RecordSource<R> for Vec<R> {
    fn load(&self) -> Result<Vec<R>> {
        Ok(self.clone())
    }
}

pub type RenderHook<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;

pub struct Column<R: Record> {
    pub field: R::Field,
    pub title: String,
    pub sortable: bool,
    /// Layout hint for the render layer.
    pub width: Option<u16>,
    render: Option<RenderHook<R>>,
}

impl<R: Record> Column<R> {
    pub fn new(field: R::Field, title: impl Into<String>) -> Self {
        Self {
            field,
            title: title.into(),
            sortable: false,
            width: None,
            render: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn render<H>(mut self, hook: H) -> Self
    where
        H: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(hook));
        self
    }

    /// Display text for this column's cell in `record`.
    pub fn cell(&self, record: &R) -> String {
        let value = record.value(self.field);
        match &self.render {
            Some(hook) => hook(&value, record),
            None => value.display(),
        }
    }
}

impl<R: Record> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            title: self.title.clone(),
            sortable: self.sortable,
            width: self.width,
            render: self.render.clone(),
        }
    }
}

impl<R: Record> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("render", &self.render.is_some())
            .finish()
    }
}

pub fn find_column<R: Record>(columns: &[Column<R>], field: R::Field) -> Option<&Column<R>> {
    columns.iter().find(|column| column.field == field)
}

#[cfg(test)]
mod tests {
    use super::{Column, Record, find_column};
    use crate::{CellValue, RowId};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
        Salary,
    }

    struct Person {
        id: i64,
        name: Option<&'static str>,
        salary: i64,
    }

    impl Record for Person {
        type Field = Field;

        fn id(&self) -> RowId {
            RowId::Int(self.id)
        }

        fn value(&self, field: Field) -> CellValue {
            match field {
                Field::Name => self.name.into(),
                Field::Salary => self.salary.into(),
            }
        }

        fn search_values(&self) -> Vec<CellValue> {
            vec![self.value(Field::Name), self.value(Field::Salary)]
        }
    }

    #[test]
    fn cell_uses_default_display_without_hook() {
        let column = Column::<Person>::new(Field::Salary, "Salary");
        let person = Person {
            id: 1,
            name: Some("Jane"),
            salary: 95000,
        };
        assert_eq!(column.cell(&person), "95000");
    }

    #[test]
    fn cell_uses_render_hook_when_present() {
        let column = Column::<Person>::new(Field::Salary, "Salary")
            .render(|value, row| format!("${} (#{})", value.display(), row.id));
        let person = Person {
            id: 4,
            name: None,
            salary: 70,
        };
        assert_eq!(column.cell(&person), "$70 (#4)");
    }

    #[test]
    fn missing_value_renders_empty() {
        let column = Column::<Person>::new(Field::Name, "Name");
        let person = Person {
            id: 2,
            name: None,
            salary: 1,
        };
        assert_eq!(column.cell(&person), "");
    }

    #[test]
    fn find_column_matches_by_field() {
        let columns = vec![
            Column::<Person>::new(Field::Name, "Name").sortable(),
            Column::<Person>::new(Field::Salary, "Salary").width(120),
        ];
        let found = find_column(&columns, Field::Salary).map(|column| column.width);
        assert_eq!(found, Some(Some(120)));
        assert!(
            find_column(&columns, Field::Name)
                .map(|column| column.sortable)
                .unwrap_or(false)
        );
    }
}
