// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use protable_app::datasets::{Employee, EmployeeStatus, Order, OrderStatus};
use protable_app::{ActionSink, CellValue, Column, Record, RowAction, RowId};
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::path::PathBuf;
use time::macros::date;
use time::{Date, Duration};

const DEPARTMENTS: [&str; 8] = [
    "Engineering",
    "Product",
    "Design",
    "Analytics",
    "Marketing",
    "Sales",
    "Support",
    "Finance",
];

const ROLES: [&str; 10] = [
    "Senior Developer",
    "Product Manager",
    "Frontend Developer",
    "UX Designer",
    "Data Analyst",
    "Marketing Manager",
    "DevOps Engineer",
    "Sales Director",
    "Support Lead",
    "Accountant",
];

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const CITIES: [(&str, &str); 8] = [
    ("Austin", "TX"),
    ("Seattle", "WA"),
    ("Denver", "CO"),
    ("Madison", "WI"),
    ("Portland", "OR"),
    ("Raleigh", "NC"),
    ("Boise", "ID"),
    ("Tucson", "AZ"),
];

const STREET_NAMES: [&str; 10] = [
    "Maple", "Oak", "Cedar", "Pine", "Elm", "Willow", "Birch", "Aspen", "Spruce", "Main",
];

const REFERENCE_DAY: Date = date!(2023 - 01 - 01);

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

/// Seeded generator for table fixtures. Same seed, same rows.
#[derive(Debug, Clone)]
pub struct TableFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl TableFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn full_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    /// Roughly one in ten employees has no join date or salary on file.
    pub fn employee(&mut self, id: i64) -> Employee {
        let name = self.full_name();
        let status = EmployeeStatus::ALL[self.rng.int_n(EmployeeStatus::ALL.len())];
        let join_date = (!self.rng.chance(10)).then(|| self.day_within(730));
        let salary = (!self.rng.chance(10)).then(|| self.int_range(45, 160) * 1_000);
        Employee {
            id,
            email: email_for(&name, "example.com"),
            name,
            role: self.pick(&ROLES).to_owned(),
            department: self.pick(&DEPARTMENTS).to_owned(),
            status,
            join_date,
            salary,
        }
    }

    /// Employees with ids `1..=count`.
    pub fn employees(&mut self, count: usize) -> Vec<Employee> {
        (1..=count as i64).map(|id| self.employee(id)).collect()
    }

    pub fn order(&mut self, number: usize) -> Order {
        let customer = self.full_name();
        let (city, state) = CITIES[self.rng.int_n(CITIES.len())];
        Order {
            id: format!("ORD-{number:03}"),
            customer_email: email_for(&customer, "example.com"),
            customer_name: customer,
            total_cents: self.int_range(999, 49_999),
            status: OrderStatus::ALL[self.rng.int_n(OrderStatus::ALL.len())],
            items: self.int_range(1, 6),
            order_date: self.day_within(365),
            shipping_address: format!(
                "{} {} St, {city}, {state}",
                self.int_range(100, 9_999),
                self.pick(&STREET_NAMES),
            ),
        }
    }

    pub fn orders(&mut self, count: usize) -> Vec<Order> {
        (1..=count).map(|number| self.order(number)).collect()
    }

    /// A JSON array of employee-like objects with integer ids, as read by
    /// `protable_app::dynamic::load_json`.
    pub fn json_records(&mut self, count: usize) -> Value {
        let rows: Vec<Value> = self
            .employees(count)
            .into_iter()
            .map(|employee| {
                json!({
                    "id": employee.id(),
                    "name": employee.name,
                    "department": employee.department,
                    "status": employee.status.as_str(),
                    "joinDate": employee.join_date.map(|day| day.to_string()),
                    "salary": employee.salary,
                })
            })
            .collect();
        Value::Array(rows)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }

    fn day_within(&mut self, days: i64) -> Date {
        REFERENCE_DAY + Duration::days(self.int_range(0, days))
    }
}

/// Minimal record for ordering and paging checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedField {
    Name,
}

impl NamedRow {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
        }
    }
}

impl Record for NamedRow {
    type Field = NamedField;

    fn id(&self) -> RowId {
        RowId::Int(self.id)
    }

    fn value(&self, field: NamedField) -> CellValue {
        match field {
            NamedField::Name => CellValue::text(self.name.clone()),
        }
    }

    fn search_values(&self) -> Vec<CellValue> {
        vec![CellValue::Integer(self.id), self.value(NamedField::Name)]
    }
}

pub fn named_columns() -> Vec<Column<NamedRow>> {
    vec![Column::new(NamedField::Name, "Name").sortable()]
}

/// `count` rows named `row 01`, `row 02`, ... with matching ids.
pub fn named_rows(count: i64) -> Vec<NamedRow> {
    (1..=count)
        .map(|id| NamedRow::new(id, &format!("row {id:02}")))
        .collect()
}

/// Sink that remembers every notification it receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub actions: Vec<(RowAction, RowId)>,
    pub deletions: Vec<BTreeSet<RowId>>,
}

impl<R: Record> ActionSink<R> for RecordingSink {
    fn row_action(&mut self, action: RowAction, record: &R) {
        self.actions.push((action, record.id()));
    }

    fn delete_selected(&mut self, ids: &BTreeSet<RowId>) {
        self.deletions.push(ids.clone());
    }
}

/// Writes `value` to `records.json` inside a fresh temp dir. Keep the
/// returned dir alive for as long as the path is used.
pub fn temp_json_fixture(value: &Value) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("records.json");
    let raw = serde_json::to_string_pretty(value).context("encode fixture records")?;
    std::fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

fn email_for(name: &str, domain: &str) -> String {
    let local = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".");
    format!("{local}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::{RecordingSink, TableFaker, named_rows, temp_json_fixture};
    use anyhow::Result;
    use protable_app::dynamic::load_json;
    use protable_app::{ActionSink, Record, RowAction, RowId};
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = TableFaker::new(42);
        let mut right = TableFaker::new(42);
        assert_eq!(left.employees(5), right.employees(5));
        assert_eq!(left.orders(3), right.orders(3));
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(TableFaker::new(0).seed(), 1);
    }

    #[test]
    fn employees_have_sequential_ids_and_plausible_fields() {
        let mut faker = TableFaker::new(7);
        let employees = faker.employees(40);
        assert_eq!(employees.len(), 40);
        for (index, employee) in employees.iter().enumerate() {
            assert_eq!(employee.id, index as i64 + 1);
            assert!(employee.email.ends_with("@example.com"));
            if let Some(salary) = employee.salary {
                assert!((45_000..=160_000).contains(&salary), "salary {salary}");
            }
        }
    }

    #[test]
    fn orders_use_padded_ids() {
        let mut faker = TableFaker::new(9);
        let orders = faker.orders(12);
        assert_eq!(orders[0].id, "ORD-001");
        assert_eq!(orders[11].id, "ORD-012");
        assert!(orders.iter().all(|order| (1..=6).contains(&order.items)));
    }

    #[test]
    fn json_fixture_round_trips_through_loader() -> Result<()> {
        let mut faker = TableFaker::new(3);
        let (_dir, path) = temp_json_fixture(&faker.json_records(6))?;
        let raw = std::fs::read_to_string(&path)?;
        let (schema, records) = load_json(&raw)?;
        assert_eq!(records.len(), 6);
        assert_eq!(schema.fields()[0], "name");
        Ok(())
    }

    #[test]
    fn recording_sink_keeps_notifications() {
        let rows = named_rows(2);
        let mut sink = RecordingSink::default();
        sink.row_action(RowAction::View, &rows[1]);
        ActionSink::<super::NamedRow>::delete_selected(
            &mut sink,
            &BTreeSet::from([RowId::Int(1)]),
        );
        assert_eq!(sink.actions, vec![(RowAction::View, rows[1].id())]);
        assert_eq!(sink.deletions.len(), 1);
    }
}
