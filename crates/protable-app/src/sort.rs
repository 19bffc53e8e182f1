// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::{CellValue, Column, Record, SortDirection, SortSpec, find_column};

/// Compares two cell values for the given direction. Nulls come first in
/// both directions; only the comparison of defined values is reversed.
pub fn compare_cells(left: &CellValue, right: &CellValue, direction: SortDirection) -> Ordering {
    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => match direction {
            SortDirection::Asc => left.cmp_value(right),
            SortDirection::Desc => left.cmp_value(right).reverse(),
        },
    }
}

/// Stable sort by one field. `None` passes the rows through untouched.
pub fn sort_records<'a, R: Record>(
    rows: Vec<&'a R>,
    spec: Option<SortSpec<R::Field>>,
) -> Vec<&'a R> {
    let Some(spec) = spec else {
        return rows;
    };

    let mut keyed: Vec<(CellValue, &'a R)> = rows
        .into_iter()
        .map(|row| (row.value(spec.field), row))
        .collect();
    keyed.sort_by(|(left, _), (right, _)| compare_cells(left, right, spec.direction));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Next sort after activating the header of `field`:
/// unsorted → asc → desc → unsorted on the same column, asc on a new one.
pub fn next_sort<F: Copy + PartialEq>(current: Option<SortSpec<F>>, field: F) -> Option<SortSpec<F>> {
    match current {
        Some(spec) if spec.field == field => match spec.direction {
            SortDirection::Asc => Some(SortSpec {
                field,
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc => None,
        },
        _ => Some(SortSpec {
            field,
            direction: SortDirection::Asc,
        }),
    }
}

/// Whether `field` names a column declared sortable.
pub fn is_sortable<R: Record>(columns: &[Column<R>], field: R::Field) -> bool {
    find_column(columns, field).is_some_and(|column| column.sortable)
}
