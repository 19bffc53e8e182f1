// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use tracing::debug;

use crate::filter::{Facet, facet_counts};
use crate::paging::checked_page;
use crate::sort::{is_sortable, next_sort};
use crate::view::{DerivedView, HeaderCell, RenderedRow, derive_view, header_cells, render_rows};
use crate::{
    ActionSink, Column, NoActions, Record, RecordSource, RowAction, RowId, Selection, SortSpec,
    TableConfig,
};
use std::collections::{BTreeMap, BTreeSet};

/// Engine-owned inputs to the pipeline. Only `TableView::dispatch` mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F> {
    pub query: String,
    pub facet: Option<Facet<F>>,
    pub sort: Option<SortSpec<F>>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub selection: Selection,
}

impl<F> ViewState<F> {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            facet: None,
            sort: None,
            page: 1,
            page_size,
            selection: Selection::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableCommand<F> {
    SetQuery(String),
    ClearQuery,
    SetFacet(Facet<F>),
    ClearFacet,
    ActivateSort(F),
    ClearSort,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    GoToPage(usize),
    SetPageSize(usize),
    SelectRow(RowId, bool),
    SelectAllVisible(bool),
    ClearSelection,
    /// Drops selected ids that no longer name a record.
    PruneSelection,
    Action(RowAction, RowId),
    DeleteSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    SearchUnavailable,
    SortUnavailable,
    PageOutOfRange(usize),
    InvalidPageSize,
    SelectionUnavailable,
    UnknownRow(RowId),
    ActionUnavailable(RowAction),
    NothingSelected,
}

impl TableStatus {
    pub fn message(&self) -> String {
        match self {
            Self::SearchUnavailable => "search unavailable".to_owned(),
            Self::SortUnavailable => "sort unavailable".to_owned(),
            Self::PageOutOfRange(page) => format!("page {page} out of range"),
            Self::InvalidPageSize => "page size must be positive".to_owned(),
            Self::SelectionUnavailable => "selection unavailable".to_owned(),
            Self::UnknownRow(id) => format!("no row with id {id}"),
            Self::ActionUnavailable(action) => format!("{} unavailable", action.as_str()),
            Self::NothingSelected => "nothing selected".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<F> {
    QueryChanged(String),
    FacetChanged(Option<Facet<F>>),
    SortChanged(Option<SortSpec<F>>),
    PageChanged(usize),
    PageSizeChanged(usize),
    SelectionChanged { selected: usize },
    ActionDispatched(RowAction, RowId),
    DeleteSelectedRequested { count: usize },
    /// The command was ignored; state is unchanged.
    Status(TableStatus),
}

/// A tabular view over a caller-supplied record set.
pub struct TableView<R: Record, S = NoActions> {
    records: Vec<R>,
    columns: Vec<Column<R>>,
    config: TableConfig,
    state: ViewState<R::Field>,
    sink: S,
}

impl<R: Record, S: ActionSink<R>> TableView<R, S> {
    pub fn new(columns: Vec<Column<R>>, config: TableConfig, sink: S) -> Self {
        let config = config.normalized();
        Self {
            records: Vec::new(),
            columns,
            state: ViewState::new(config.page_size),
            config,
            sink,
        }
    }

    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.records = records;
        self
    }

    pub fn from_source<D>(
        source: &D,
        columns: Vec<Column<R>>,
        config: TableConfig,
        sink: S,
    ) -> Result<Self>
    where
        D: RecordSource<R> + ?Sized,
    {
        let records = source.load().context("load table records")?;
        Ok(Self::new(columns, config, sink).with_records(records))
    }

    /// Swaps in a new record set. The page is pulled back inside the new
    /// page count; the selection is left alone until `PruneSelection`.
    pub fn replace_records(&mut self, records: Vec<R>) -> Vec<TableEvent<R::Field>> {
        self.records = records;
        let total_pages = self.view().total_pages;
        if self.state.page > total_pages {
            self.state.page = total_pages;
            return vec![TableEvent::PageChanged(total_pages)];
        }
        Vec::new()
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState<R::Field> {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn view(&self) -> DerivedView<'_, R> {
        derive_view(&self.records, &self.state, &self.config)
    }

    pub fn is_all_visible_selected(&self) -> bool {
        self.view().all_visible_selected
    }

    pub fn headers(&self) -> Vec<HeaderCell> {
        header_cells(&self.columns, self.state.sort)
    }

    pub fn rendered_page(&self) -> Vec<RenderedRow> {
        let view = self.view();
        render_rows(&self.columns, &view.page_rows, &self.state.selection)
    }

    pub fn row_actions(&self) -> &[RowAction] {
        self.sink.supported_actions()
    }

    /// Counts of each distinct value of `field` over the full record set.
    pub fn facet_counts(&self, field: R::Field) -> BTreeMap<String, usize> {
        facet_counts(&self.records, field)
    }

    pub fn dispatch_all<I>(&mut self, commands: I) -> Vec<TableEvent<R::Field>>
    where
        I: IntoIterator<Item = TableCommand<R::Field>>,
    {
        commands
            .into_iter()
            .flat_map(|command| self.dispatch(command))
            .collect()
    }

    pub fn dispatch(&mut self, command: TableCommand<R::Field>) -> Vec<TableEvent<R::Field>> {
        debug!(?command, "table command");
        match command {
            TableCommand::SetQuery(query) => self.set_query(query),
            TableCommand::ClearQuery => self.set_query(String::new()),
            TableCommand::SetFacet(facet) => self.set_facet(Some(facet)),
            TableCommand::ClearFacet => self.set_facet(None),
            TableCommand::ActivateSort(field) => {
                if !is_sortable(&self.columns, field) {
                    return status(TableStatus::SortUnavailable);
                }
                let next = next_sort(self.state.sort, field);
                self.set_sort(next)
            }
            TableCommand::ClearSort => self.set_sort(None),
            TableCommand::NextPage => self.go_to(self.state.page.saturating_add(1)),
            TableCommand::PrevPage => self.go_to(self.state.page.saturating_sub(1)),
            TableCommand::FirstPage => self.go_to(1),
            TableCommand::LastPage => {
                let last = self.view().total_pages;
                self.go_to(last)
            }
            TableCommand::GoToPage(page) => self.go_to(page),
            TableCommand::SetPageSize(size) => self.set_page_size(size),
            TableCommand::SelectRow(id, selected) => self.select_row(id, selected),
            TableCommand::SelectAllVisible(selected) => self.select_all_visible(selected),
            TableCommand::ClearSelection => {
                if !self.config.selectable {
                    return status(TableStatus::SelectionUnavailable);
                }
                if self.state.selection.clear() == 0 {
                    return Vec::new();
                }
                vec![TableEvent::SelectionChanged { selected: 0 }]
            }
            TableCommand::PruneSelection => self.prune_selection(),
            TableCommand::Action(action, id) => self.trigger_action(action, id),
            TableCommand::DeleteSelected => self.delete_selected(),
        }
    }

    fn set_query(&mut self, query: String) -> Vec<TableEvent<R::Field>> {
        if !self.config.searchable {
            return status(TableStatus::SearchUnavailable);
        }
        if self.state.query == query {
            return Vec::new();
        }
        self.state.query = query.clone();
        let mut events = vec![TableEvent::QueryChanged(query)];
        events.extend(self.reset_page());
        events
    }

    fn set_facet(&mut self, facet: Option<Facet<R::Field>>) -> Vec<TableEvent<R::Field>> {
        if self.state.facet == facet {
            return Vec::new();
        }
        self.state.facet = facet.clone();
        let mut events = vec![TableEvent::FacetChanged(facet)];
        events.extend(self.reset_page());
        events
    }

    fn set_sort(&mut self, sort: Option<SortSpec<R::Field>>) -> Vec<TableEvent<R::Field>> {
        if self.state.sort == sort {
            return Vec::new();
        }
        self.state.sort = sort;
        let mut events = vec![TableEvent::SortChanged(sort)];
        events.extend(self.reset_page());
        events
    }

    fn set_page_size(&mut self, size: usize) -> Vec<TableEvent<R::Field>> {
        if size == 0 {
            return status(TableStatus::InvalidPageSize);
        }
        if self.state.page_size == size {
            return Vec::new();
        }
        self.state.page_size = size;
        let mut events = vec![TableEvent::PageSizeChanged(size)];
        events.extend(self.reset_page());
        events
    }

    fn reset_page(&mut self) -> Option<TableEvent<R::Field>> {
        if self.state.page == 1 {
            return None;
        }
        self.state.page = 1;
        Some(TableEvent::PageChanged(1))
    }

    fn go_to(&mut self, target: usize) -> Vec<TableEvent<R::Field>> {
        let total_pages = self.view().total_pages;
        let Some(page) = checked_page(target, total_pages) else {
            return status(TableStatus::PageOutOfRange(target));
        };
        if page == self.state.page {
            return Vec::new();
        }
        self.state.page = page;
        vec![TableEvent::PageChanged(page)]
    }

    fn select_row(&mut self, id: RowId, selected: bool) -> Vec<TableEvent<R::Field>> {
        if !self.config.selectable {
            return status(TableStatus::SelectionUnavailable);
        }
        if selected && !self.records.iter().any(|record| record.id() == id) {
            return status(TableStatus::UnknownRow(id));
        }
        if !self.state.selection.set(id, selected) {
            return Vec::new();
        }
        vec![self.selection_changed()]
    }

    fn select_all_visible(&mut self, selected: bool) -> Vec<TableEvent<R::Field>> {
        if !self.config.selectable {
            return status(TableStatus::SelectionUnavailable);
        }
        let visible = self.view().page_ids();
        if self.state.selection.set_all(&visible, selected) == 0 {
            return Vec::new();
        }
        vec![self.selection_changed()]
    }

    fn prune_selection(&mut self) -> Vec<TableEvent<R::Field>> {
        let known: BTreeSet<RowId> = self.records.iter().map(Record::id).collect();
        let removed = self.state.selection.retain_known(&known);
        if removed == 0 {
            return Vec::new();
        }
        debug!(removed, "pruned selection");
        vec![self.selection_changed()]
    }

    fn selection_changed(&self) -> TableEvent<R::Field> {
        TableEvent::SelectionChanged {
            selected: self.state.selection.len(),
        }
    }

    fn trigger_action(&mut self, action: RowAction, id: RowId) -> Vec<TableEvent<R::Field>> {
        if !self.sink.supports(action) {
            return status(TableStatus::ActionUnavailable(action));
        }
        let Some(record) = self.records.iter().find(|record| record.id() == id) else {
            return status(TableStatus::UnknownRow(id));
        };
        self.sink.row_action(action, record);
        vec![TableEvent::ActionDispatched(action, id)]
    }

    fn delete_selected(&mut self) -> Vec<TableEvent<R::Field>> {
        if !self.sink.supports(RowAction::Delete) {
            return status(TableStatus::ActionUnavailable(RowAction::Delete));
        }
        if self.state.selection.is_empty() {
            return status(TableStatus::NothingSelected);
        }
        let ids: &BTreeSet<RowId> = self.state.selection.ids();
        self.sink.delete_selected(ids);
        vec![TableEvent::DeleteSelectedRequested { count: ids.len() }]
    }
}

fn status<F>(value: TableStatus) -> Vec<TableEvent<F>> {
    vec![TableEvent::Status(value)]
}
