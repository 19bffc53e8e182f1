// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::trace;

use crate::filter::{apply_facet, filter_records};
use crate::paging::{page_range, paginate};
use crate::sort::sort_records;
use crate::{Column, Record, RowId, Selection, SortDirection, SortSpec, TableConfig, ViewState};

/// Output of one pass through filter → sort → paginate. Recomputed from
/// scratch; never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, R> {
    pub sorted_rows: Vec<&'a R>,
    pub page_rows: Vec<&'a R>,
    pub filtered_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    pub all_visible_selected: bool,
    /// 1-based inclusive range of rows on the page.
    pub range: Option<(usize, usize)>,
}

impl<R: Record> DerivedView<'_, R> {
    pub fn page_ids(&self) -> Vec<RowId> {
        self.page_rows.iter().map(|row| row.id()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.page_rows.is_empty()
    }

    pub fn summary(&self) -> Option<String> {
        self.range.map(|(first, last)| {
            format!(
                "Showing {first} to {last} of {} results",
                self.filtered_count
            )
        })
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

pub fn derive_view<'a, R: Record>(
    records: &'a [R],
    state: &ViewState<R::Field>,
    config: &TableConfig,
) -> DerivedView<'a, R> {
    let query = if config.searchable {
        state.query.as_str()
    } else {
        ""
    };
    let filtered = apply_facet(filter_records(records, query), state.facet.as_ref());
    let filtered_count = filtered.len();
    let sorted_rows = sort_records(filtered, state.sort);

    let (page_rows, total_pages, range) = if config.pagination {
        let page = paginate(&sorted_rows, state.page, state.page_size);
        let range = page_range(filtered_count, state.page, state.page_size);
        (page.rows, page.total_pages, range)
    } else {
        let range = (filtered_count > 0).then_some((1, filtered_count));
        (sorted_rows.clone(), 1, range)
    };

    let page_ids: Vec<RowId> = page_rows.iter().map(|row| row.id()).collect();
    let all_visible_selected = config.selectable && state.selection.contains_all(&page_ids);

    trace!(
        total = records.len(),
        filtered = filtered_count,
        page = state.page,
        total_pages,
        visible = page_rows.len(),
        "derived view"
    );

    DerivedView {
        sorted_rows,
        page_rows,
        filtered_count,
        total_pages,
        page: state.page,
        page_size: state.page_size,
        all_visible_selected,
        range,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub title: String,
    pub sortable: bool,
    pub width: Option<u16>,
    pub direction: Option<SortDirection>,
}

impl HeaderCell {
    pub fn label(&self) -> String {
        match self.direction {
            Some(direction) => format!("{} {}", self.title, direction.indicator()),
            None => self.title.clone(),
        }
    }
}

pub fn header_cells<R: Record>(
    columns: &[Column<R>],
    sort: Option<SortSpec<R::Field>>,
) -> Vec<HeaderCell> {
    columns
        .iter()
        .map(|column| HeaderCell {
            title: column.title.clone(),
            sortable: column.sortable,
            width: column.width,
            direction: sort
                .filter(|spec| spec.field == column.field)
                .map(|spec| spec.direction),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: RowId,
    pub selected: bool,
    pub cells: Vec<String>,
}

pub fn render_rows<R: Record>(
    columns: &[Column<R>],
    rows: &[&R],
    selection: &Selection,
) -> Vec<RenderedRow> {
    rows.iter()
        .map(|row| {
            let id = row.id();
            RenderedRow {
                selected: selection.contains(&id),
                id,
                cells: columns.iter().map(|column| column.cell(*row)).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{derive_view, header_cells, render_rows};
    use crate::{
        CellValue, Column, Record, RowId, SortDirection, SortSpec, TableConfig, ViewState,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
    }

    #[derive(Debug, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    impl Record for Row {
        type Field = Field;

        fn id(&self) -> RowId {
            RowId::Int(self.id)
        }

        fn value(&self, field: Field) -> CellValue {
            match field {
                Field::Name => CellValue::text(self.name.clone()),
            }
        }

        fn search_values(&self) -> Vec<CellValue> {
            vec![CellValue::Integer(self.id), self.value(Field::Name)]
        }
    }

    fn rows(count: i64) -> Vec<Row> {
        (1..=count)
            .map(|id| Row {
                id,
                name: format!("row {id:02}"),
            })
            .collect()
    }

    #[test]
    fn twelve_rows_make_two_pages() {
        let data = rows(12);
        let mut state = ViewState::new(10);
        state.page = 2;
        let view = derive_view(&data, &state, &TableConfig::default());
        assert_eq!(view.total_pages, 2);
        assert_eq!(view.page_ids(), vec![RowId::Int(11), RowId::Int(12)]);
        assert_eq!(view.summary().as_deref(), Some("Showing 11 to 12 of 12 results"));
        assert_eq!(view.page_label(), "Page 2 of 2");
    }

    #[test]
    fn unmatched_query_yields_single_empty_page() {
        let data = rows(5);
        let mut state = ViewState::new(10);
        state.query = "xyz".to_owned();
        let view = derive_view(&data, &state, &TableConfig::default());
        assert!(view.is_empty());
        assert_eq!(view.filtered_count, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.summary(), None);
        assert!(!view.all_visible_selected);
    }

    #[test]
    fn query_is_ignored_when_search_disabled() {
        let data = rows(3);
        let mut state = ViewState::new(10);
        state.query = "xyz".to_owned();
        let config = TableConfig {
            searchable: false,
            ..TableConfig::default()
        };
        assert_eq!(derive_view(&data, &state, &config).filtered_count, 3);
    }

    #[test]
    fn disabled_pagination_shows_everything_on_one_page() {
        let data = rows(25);
        let state = ViewState::new(10);
        let config = TableConfig {
            pagination: false,
            ..TableConfig::default()
        };
        let view = derive_view(&data, &state, &config);
        assert_eq!(view.page_rows.len(), 25);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.range, Some((1, 25)));
    }

    #[test]
    fn all_visible_selected_tracks_current_page() {
        let data = rows(4);
        let mut state = ViewState::new(2);
        state.selection.set(RowId::Int(1), true);
        state.selection.set(RowId::Int(2), true);
        assert!(derive_view(&data, &state, &TableConfig::default()).all_visible_selected);

        state.page = 2;
        assert!(!derive_view(&data, &state, &TableConfig::default()).all_visible_selected);

        let unselectable = TableConfig {
            selectable: false,
            ..TableConfig::default()
        };
        state.page = 1;
        assert!(!derive_view(&data, &state, &unselectable).all_visible_selected);
    }

    #[test]
    fn header_marks_sorted_column() {
        let columns = vec![Column::<Row>::new(Field::Name, "Name").sortable()];
        let headers = header_cells(
            &columns,
            Some(SortSpec {
                field: Field::Name,
                direction: SortDirection::Desc,
            }),
        );
        assert_eq!(headers[0].direction, Some(SortDirection::Desc));
        assert_eq!(headers[0].label(), "Name ↓");
        assert_eq!(header_cells(&columns, None)[0].label(), "Name");
    }

    #[test]
    fn rendered_rows_carry_selection_and_cells() {
        let data = rows(2);
        let columns = vec![
            Column::<Row>::new(Field::Name, "Name"),
            Column::<Row>::new(Field::Name, "Shout").render(|value, _| value.display().to_uppercase()),
        ];
        let mut state = ViewState::new(10);
        state.selection.set(RowId::Int(2), true);
        let view = derive_view(&data, &state, &TableConfig::default());
        let rendered = render_rows(&columns, &view.page_rows, &state.selection);
        assert_eq!(rendered[0].cells, vec!["row 01".to_owned(), "ROW 01".to_owned()]);
        assert!(!rendered[0].selected);
        assert!(rendered[1].selected);
    }
}
