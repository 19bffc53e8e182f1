// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::{CellValue, Record};

/// Joins field values in the search haystack. Never typed into a query, so a
/// match cannot straddle two fields.
pub const SEARCH_DELIMITER: char = '\u{1f}';

/// Exact-match filter on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct Facet<F> {
    pub field: F,
    pub value: CellValue,
}

pub fn search_haystack<R: Record>(record: &R) -> String {
    let mut haystack = String::new();
    for (index, value) in record.search_values().iter().enumerate() {
        if index > 0 {
            haystack.push(SEARCH_DELIMITER);
        }
        haystack.push_str(&value.display());
    }
    haystack.to_lowercase()
}

pub fn record_matches<R: Record>(record: &R, needle: &str) -> bool {
    needle.is_empty() || search_haystack(record).contains(needle)
}

/// Free-text filter. Keeps input order; an empty query keeps everything.
pub fn filter_records<'a, R, I>(records: I, query: &str) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if query.is_empty() {
        return records.into_iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| record_matches(*record, &needle))
        .collect()
}

pub fn apply_facet<'a, R: Record>(rows: Vec<&'a R>, facet: Option<&Facet<R::Field>>) -> Vec<&'a R> {
    match facet {
        Some(facet) => rows
            .into_iter()
            .filter(|row| row.value(facet.field).matches_facet(&facet.value))
            .collect(),
        None => rows,
    }
}

/// Per-value row counts for one field, keyed by display string.
pub fn facet_counts<'a, R, I>(records: I, field: R::Field) -> BTreeMap<String, usize>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.value(field).display()).or_insert(0) += 1;
    }
    counts
}
