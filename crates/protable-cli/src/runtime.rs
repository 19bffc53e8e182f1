// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use protable_app::datasets::{
    DatasetKind, EmployeeField, OrderField, UserField, demo_employees, demo_orders, demo_users,
    employee_columns, order_columns, user_columns,
};
use protable_app::dynamic::{DynamicRecord, load_json};
use protable_app::{
    ActionSink, CellValue, Column, Facet, LOADING_MESSAGE, Record, RowAction, RowId, TableCommand,
    TableConfig, TableEvent, TableView,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const STATUS_FIELD: &str = "status";
const CELL_SEPARATOR: &str = " | ";

/// What to do to the table before printing it. Commands run in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRequest {
    pub query: Option<String>,
    pub status: Option<String>,
    pub sorts: Vec<String>,
    pub page_size: Option<usize>,
    pub page: Option<usize>,
    pub select: Vec<String>,
    pub select_page: bool,
    pub view: Option<String>,
    pub delete_selected: bool,
}

/// Printed table plus anything that went to the sink or was ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    pub notices: Vec<String>,
    pub ignored: Vec<String>,
}

/// Logs row actions and keeps a line per notification for the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSink {
    pub notices: Vec<String>,
}

impl<R: Record> ActionSink<R> for LogSink {
    fn row_action(&mut self, action: RowAction, record: &R) {
        let id = record.id();
        info!(action = action.as_str(), %id, "row action");
        self.notices.push(format!("{} row {id}", action.as_str()));
    }

    fn delete_selected(&mut self, ids: &BTreeSet<RowId>) {
        info!(count = ids.len(), "delete selected");
        let joined = ids.iter().map(ToString::to_string).collect::<Vec<_>>();
        self.notices
            .push(format!("delete {} selected rows: {}", ids.len(), joined.join(", ")));
    }
}

/// Records, columns, and the field keys accepted by `--sort` and `--status`.
pub struct TableSource<R: Record> {
    pub title: String,
    pub records: Vec<R>,
    pub columns: Vec<Column<R>>,
    pub fields: Vec<(String, R::Field)>,
}

impl<R: Record> TableSource<R> {
    pub fn field(&self, key: &str) -> Option<R::Field> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, field)| *field)
    }

    fn require_field(&self, key: &str, flag: &str) -> Result<R::Field> {
        match self.field(key) {
            Some(field) => Ok(field),
            None => {
                let known = self
                    .fields
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>();
                bail!(
                    "{flag} field {key:?} is not in this table; expected one of: {}",
                    known.join(", ")
                )
            }
        }
    }

    fn commands(&self, request: &TableRequest) -> Result<Vec<TableCommand<R::Field>>> {
        let mut commands = Vec::new();
        if let Some(query) = &request.query {
            commands.push(TableCommand::SetQuery(query.clone()));
        }
        if let Some(status) = &request.status {
            commands.push(TableCommand::SetFacet(Facet {
                field: self.require_field(STATUS_FIELD, "--status")?,
                value: CellValue::text(status.clone()),
            }));
        }
        for key in &request.sorts {
            commands.push(TableCommand::ActivateSort(self.require_field(key, "--sort")?));
        }
        if let Some(size) = request.page_size {
            commands.push(TableCommand::SetPageSize(size));
        }
        if let Some(page) = request.page {
            commands.push(TableCommand::GoToPage(page));
        }
        for raw in &request.select {
            commands.push(TableCommand::SelectRow(RowId::parse(raw), true));
        }
        if request.select_page {
            commands.push(TableCommand::SelectAllVisible(true));
        }
        if let Some(raw) = &request.view {
            commands.push(TableCommand::Action(RowAction::View, RowId::parse(raw)));
        }
        if request.delete_selected {
            commands.push(TableCommand::DeleteSelected);
        }
        Ok(commands)
    }
}

pub fn employees_source() -> TableSource<protable_app::datasets::Employee> {
    TableSource {
        title: DatasetKind::Employees.title().to_owned(),
        records: demo_employees(),
        columns: employee_columns(),
        fields: EmployeeField::ALL
            .into_iter()
            .map(|field| (field.key().to_owned(), field))
            .collect(),
    }
}

pub fn orders_source() -> TableSource<protable_app::datasets::Order> {
    TableSource {
        title: DatasetKind::Orders.title().to_owned(),
        records: demo_orders(),
        columns: order_columns(),
        fields: OrderField::ALL
            .into_iter()
            .map(|field| (field.key().to_owned(), field))
            .collect(),
    }
}

pub fn users_source() -> TableSource<protable_app::datasets::RecentUser> {
    TableSource {
        title: DatasetKind::Users.title().to_owned(),
        records: demo_users(),
        columns: user_columns(),
        fields: UserField::ALL
            .into_iter()
            .map(|field| (field.key().to_owned(), field))
            .collect(),
    }
}

pub fn json_source(path: &Path) -> Result<TableSource<DynamicRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read data file {}", path.display()))?;
    let (schema, records) =
        load_json(&raw).with_context(|| format!("decode records in {}", path.display()))?;
    let fields = schema
        .fields()
        .iter()
        .filter_map(|name| schema.index_of(name).map(|index| (name.clone(), index)))
        .collect();
    let title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(TableSource {
        title,
        records,
        columns: schema.columns(),
        fields,
    })
}

/// Builds the table, applies the request, and renders the resulting page.
pub fn run_request<R: Record>(
    source: TableSource<R>,
    config: TableConfig,
    request: &TableRequest,
) -> Result<Rendered> {
    let commands = source.commands(request)?;
    let TableSource {
        title,
        records,
        columns,
        ..
    } = source;
    let mut table = TableView::new(columns, config, LogSink::default()).with_records(records);

    let mut ignored = Vec::new();
    for event in table.dispatch_all(commands) {
        if let TableEvent::Status(status) = event {
            let message = status.message();
            warn!(%message, "command ignored");
            ignored.push(message);
        }
    }

    let output = render_table(&title, &table);
    Ok(Rendered {
        output,
        notices: table.into_sink().notices,
        ignored,
    })
}

/// Plain-text rendering: title, header with sort indicators, one line per
/// page row, then the range summary or the empty message.
pub fn render_table<R: Record, S: ActionSink<R>>(title: &str, table: &TableView<R, S>) -> String {
    if table.config().loading {
        return format!("{title}\n{LOADING_MESSAGE}\n");
    }
    let view = table.view();
    let selectable = table.config().selectable;
    let header: Vec<String> = table.headers().iter().map(|cell| cell.label()).collect();
    let rows = table.rendered_page();

    let mut widths: Vec<usize> = header.iter().map(|label| label.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![title.to_owned()];
    let marker = |selected: bool| if selected { "[x] " } else { "[ ] " };
    let mut header_line = String::new();
    if selectable {
        header_line.push_str(marker(view.all_visible_selected));
    }
    header_line.push_str(&pad_cells(&header, &widths));
    lines.push(header_line.trim_end().to_owned());

    if view.is_empty() {
        lines.push(table.config().empty_message.clone());
        return lines.join("\n") + "\n";
    }

    for row in &rows {
        let mut line = String::new();
        if selectable {
            line.push_str(marker(row.selected));
        }
        line.push_str(&pad_cells(&row.cells, &widths));
        lines.push(line.trim_end().to_owned());
    }

    let mut footer = view.summary().unwrap_or_default();
    if table.config().pagination {
        footer.push_str(&format!(" | {}", view.page_label()));
    }
    lines.push(footer);
    if table.config().pagination {
        lines.push(page_size_line(&table.config().page_size_options, view.page_size));
    }
    if !table.selection().is_empty() {
        lines.push(format!("{} selected", table.selection().len()));
    }
    let actions = table.row_actions();
    if !actions.is_empty() {
        let names = actions.iter().map(|action| action.as_str()).collect::<Vec<_>>();
        lines.push(format!("Row actions: {}", names.join(", ")));
    }
    lines.join("\n") + "\n"
}

/// "Rows per page: 5 [10] 20 50", with the active size bracketed.
fn page_size_line(options: &[usize], current: usize) -> String {
    let mut sizes = options.to_vec();
    if !sizes.contains(&current) {
        sizes.push(current);
        sizes.sort_unstable();
    }
    let labels = sizes
        .iter()
        .map(|size| {
            if *size == current {
                format!("[{size}]")
            } else {
                size.to_string()
            }
        })
        .collect::<Vec<_>>();
    format!("Rows per page: {}", labels.join(" "))
}

fn pad_cells(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::{
        LogSink, TableRequest, employees_source, json_source, orders_source, render_table,
        run_request, users_source,
    };
    use anyhow::Result;
    use protable_app::{RowAction, TableConfig, TableView};
    use protable_testkit::{TableFaker, named_columns, named_rows, temp_json_fixture};

    #[test]
    fn default_request_renders_first_page_of_employees() -> Result<()> {
        let rendered = run_request(employees_source(), TableConfig::default(), &TableRequest::default())?;
        let lines: Vec<&str> = rendered.output.lines().collect();
        assert_eq!(lines[0], "Employee Management");
        assert!(lines[1].starts_with("[ ] Employee"));
        assert!(lines[2].contains("John Doe"));
        assert!(lines[2].contains("$75,000"));
        assert!(lines[2].contains("Jan 15, 2023"));
        assert!(rendered.output.contains("Showing 1 to 8 of 8 results | Page 1 of 1"));
        assert!(rendered.notices.is_empty());
        assert!(rendered.ignored.is_empty());
        Ok(())
    }

    #[test]
    fn repeated_sort_flags_cycle_direction() -> Result<()> {
        let request = TableRequest {
            sorts: vec!["salary".to_owned(), "salary".to_owned()],
            ..TableRequest::default()
        };
        let rendered = run_request(employees_source(), TableConfig::default(), &request)?;
        let lines: Vec<&str> = rendered.output.lines().collect();
        assert!(lines[1].contains("Salary ↓"));
        assert!(lines[2].contains("Lisa Wang"));
        Ok(())
    }

    #[test]
    fn status_facet_narrows_orders() -> Result<()> {
        let request = TableRequest {
            status: Some("shipped".to_owned()),
            ..TableRequest::default()
        };
        let rendered = run_request(orders_source(), TableConfig::default(), &request)?;
        assert!(rendered.output.contains("ORD-002"));
        assert!(!rendered.output.contains("ORD-001"));
        assert!(rendered.output.contains("Showing 1 to 1 of 1 results"));
        Ok(())
    }

    #[test]
    fn unmatched_query_prints_empty_message() -> Result<()> {
        let request = TableRequest {
            query: Some("xyz".to_owned()),
            ..TableRequest::default()
        };
        let rendered = run_request(users_source(), TableConfig::default(), &request)?;
        assert!(rendered.output.ends_with("No data available\n"));
        assert!(!rendered.output.contains("Showing"));
        Ok(())
    }

    #[test]
    fn unknown_sort_field_lists_known_fields() {
        let request = TableRequest {
            sorts: vec!["shoeSize".to_owned()],
            ..TableRequest::default()
        };
        let error = run_request(users_source(), TableConfig::default(), &request)
            .expect_err("unknown field should fail");
        let message = error.to_string();
        assert!(message.contains("shoeSize"));
        assert!(message.contains("lastLogin"));
    }

    #[test]
    fn out_of_range_page_is_reported_and_ignored() -> Result<()> {
        let request = TableRequest {
            page: Some(9),
            ..TableRequest::default()
        };
        let rendered = run_request(orders_source(), TableConfig::default(), &request)?;
        assert_eq!(rendered.ignored, vec!["page 9 out of range".to_owned()]);
        assert!(rendered.output.contains("Page 1 of 1"));
        Ok(())
    }

    #[test]
    fn selection_view_and_delete_reach_the_sink() -> Result<()> {
        let request = TableRequest {
            page_size: Some(2),
            page: Some(2),
            select: vec!["1".to_owned()],
            select_page: true,
            view: Some("4".to_owned()),
            delete_selected: true,
            ..TableRequest::default()
        };
        let rendered = run_request(employees_source(), TableConfig::default(), &request)?;
        assert!(rendered.output.contains("[x] Employee"));
        assert!(rendered.output.contains("3 selected"));
        assert_eq!(
            rendered.notices,
            vec![
                "view row 4".to_owned(),
                "delete 3 selected rows: 1, 3, 4".to_owned()
            ]
        );
        Ok(())
    }

    #[test]
    fn json_file_becomes_a_table() -> Result<()> {
        let mut faker = TableFaker::new(4);
        let (_dir, path) = temp_json_fixture(&faker.json_records(12))?;
        let source = json_source(&path)?;
        assert_eq!(source.title, "records");
        assert!(source.field("department").is_some());

        let request = TableRequest {
            sorts: vec!["name".to_owned()],
            page: Some(2),
            ..TableRequest::default()
        };
        let rendered = run_request(source, TableConfig::default(), &request)?;
        assert!(rendered.output.contains("name ↑"));
        assert!(rendered.output.contains("Showing 11 to 12 of 12 results | Page 2 of 2"));
        Ok(())
    }

    #[test]
    fn missing_json_file_reports_path() {
        let Err(error) = json_source(std::path::Path::new("/nonexistent/records.json")) else {
            panic!("missing file should fail");
        };
        assert!(error.to_string().contains("/nonexistent/records.json"));
    }

    #[test]
    fn disabled_selection_and_pagination_drop_markers_and_page_label() {
        let config = TableConfig {
            selectable: false,
            pagination: false,
            ..TableConfig::default()
        };
        let table = TableView::new(named_columns(), config, LogSink::default())
            .with_records(named_rows(12));
        let output = render_table("Rows", &table);
        assert!(!output.contains("[ ]"));
        assert!(!output.contains("Page "));
        assert!(output.contains("Showing 1 to 12 of 12 results"));
        assert!(output.contains(&format!("Row actions: {}", RowAction::View.as_str())));
    }

    #[test]
    fn page_size_options_mark_the_active_size() -> Result<()> {
        let request = TableRequest {
            page_size: Some(20),
            ..TableRequest::default()
        };
        let rendered = run_request(employees_source(), TableConfig::default(), &request)?;
        assert!(rendered.output.contains("Rows per page: 5 10 [20] 50"));

        let config = TableConfig {
            page_size: 25,
            page_size_options: vec![10, 50],
            ..TableConfig::default()
        };
        let table = TableView::new(named_columns(), config, LogSink::default())
            .with_records(named_rows(3));
        assert!(render_table("Rows", &table).contains("Rows per page: 10 [25] 50"));
        Ok(())
    }

    #[test]
    fn loading_replaces_the_table_body() {
        let config = TableConfig {
            loading: true,
            ..TableConfig::default()
        };
        let table = TableView::new(named_columns(), config, LogSink::default())
            .with_records(named_rows(3));
        assert_eq!(render_table("Rows", &table), "Rows\nLoading data...\n");
    }
}
