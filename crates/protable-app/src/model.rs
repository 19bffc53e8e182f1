// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;
use time::Date;
use tracing::warn;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";
pub const LOADING_MESSAGE: &str = "Loading data...";

/// One field value of a record. `Null` stands in for a missing or undefined
/// value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
    Date(Date),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Date(value) => value.to_string(),
        }
    }

    /// Ascending three-way comparison of two defined values. Text compares
    /// case-insensitively; numbers, dates and booleans use their natural
    /// order. Mixed kinds fall back to their lower-cased display strings.
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(left), Self::Integer(right)) => left.cmp(right),
            (Self::Decimal(left), Self::Decimal(right)) => left.total_cmp(right),
            (Self::Integer(left), Self::Decimal(right)) => (*left as f64).total_cmp(right),
            (Self::Decimal(left), Self::Integer(right)) => left.total_cmp(&(*right as f64)),
            (Self::Date(left), Self::Date(right)) => left.cmp(right),
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => {
                left.to_lowercase().cmp(&right.to_lowercase())
            }
            _ => self
                .display()
                .to_lowercase()
                .cmp(&other.display().to_lowercase()),
        }
    }

    /// Exact-match test used by the facet filter.
    pub fn matches_facet(&self, facet: &Self) -> bool {
        match (self, facet) {
            (Self::Text(value), Self::Text(facet)) => {
                value.trim().to_lowercase() == facet.trim().to_lowercase()
            }
            _ => self == facet,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Date> for CellValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Active sort: one column and a direction. "Unsorted" is the absence of a
/// spec, so the column and the direction are always cleared together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [Self; 3] = [Self::View, Self::Edit, Self::Delete];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub searchable: bool,
    pub selectable: bool,
    pub pagination: bool,
    pub empty_message: String,
    /// Render layers show `LOADING_MESSAGE` in place of the table body.
    pub loading: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            searchable: true,
            selectable: true,
            pagination: true,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_owned(),
            loading: false,
        }
    }
}

impl TableConfig {
    /// Replaces invalid values with defaults. Never fails.
    pub fn normalized(mut self) -> Self {
        if self.page_size == 0 {
            warn!(default = DEFAULT_PAGE_SIZE, "page size must be positive; using default");
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        self.page_size_options.retain(|size| *size > 0);
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        if self.page_size_options.is_empty() {
            self.page_size_options = DEFAULT_PAGE_SIZE_OPTIONS.to_vec();
        }
        self
    }
}

/// Converts a raw, possibly non-positive page size into a usable one.
pub fn sanitize_page_size(raw: i64) -> usize {
    match usize::try_from(raw) {
        Ok(size) if size > 0 => size,
        _ => {
            warn!(raw, default = DEFAULT_PAGE_SIZE, "page size must be positive; using default");
            DEFAULT_PAGE_SIZE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CellValue, DEFAULT_PAGE_SIZE, TableConfig, sanitize_page_size};
    use std::cmp::Ordering;
    use time::macros::date;

    #[test]
    fn text_compares_case_insensitively() {
        let ann = CellValue::text("ann");
        let bob = CellValue::text("Bob");
        assert_eq!(ann.cmp_value(&bob), Ordering::Less);
        assert_eq!(
            CellValue::text("ALPHA").cmp_value(&CellValue::text("alpha")),
            Ordering::Equal
        );
    }

    #[test]
    fn numbers_and_dates_use_natural_order() {
        assert_eq!(
            CellValue::Integer(9).cmp_value(&CellValue::Integer(10)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Decimal(2.5).cmp_value(&CellValue::Integer(2)),
            Ordering::Greater
        );
        assert_eq!(
            CellValue::Date(date!(2023 - 01 - 15)).cmp_value(&CellValue::Date(date!(2022 - 12 - 31))),
            Ordering::Greater
        );
    }

    #[test]
    fn null_displays_as_empty() {
        assert_eq!(CellValue::Null.display(), "");
        assert_eq!(CellValue::from(None::<i64>), CellValue::Null);
        assert_eq!(CellValue::Date(date!(2023 - 03 - 10)).display(), "2023-03-10");
    }

    #[test]
    fn facet_match_trims_and_ignores_case() {
        assert!(CellValue::text(" Pending").matches_facet(&CellValue::text("pending")));
        assert!(!CellValue::text("shipped").matches_facet(&CellValue::text("pending")));
        assert!(CellValue::Integer(3).matches_facet(&CellValue::Integer(3)));
    }

    #[test]
    fn non_positive_page_size_falls_back_to_default() {
        assert_eq!(sanitize_page_size(0), DEFAULT_PAGE_SIZE);
        assert_eq!(sanitize_page_size(-4), DEFAULT_PAGE_SIZE);
        assert_eq!(sanitize_page_size(25), 25);

        let config = TableConfig {
            page_size: 0,
            page_size_options: vec![0, 20, 5, 20],
            ..TableConfig::default()
        }
        .normalized();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.page_size_options, vec![5, 20]);
    }
}
