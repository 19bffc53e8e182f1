// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use time::macros::{date, format_description};

use crate::{CellValue, Column, Record, RowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Employees,
    Orders,
    Users,
}

impl DatasetKind {
    pub const ALL: [Self; 3] = [Self::Employees, Self::Orders, Self::Users];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Orders => "orders",
            Self::Users => "users",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "employees" => Some(Self::Employees),
            "orders" => Some(Self::Orders),
            "users" => Some(Self::Users),
            _ => None,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Employees => "Employee Management",
            Self::Orders => "Orders",
            Self::Users => "Recent Users",
        }
    }

    pub const fn default_page_size(self) -> usize {
        match self {
            Self::Users => 5,
            Self::Employees | Self::Orders => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Pending,
}

impl EmployeeStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Pending];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub status: EmployeeStatus,
    pub join_date: Option<Date>,
    pub salary: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Name,
    Email,
    Role,
    Department,
    Status,
    JoinDate,
    Salary,
}

impl EmployeeField {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Role,
        Self::Department,
        Self::Status,
        Self::JoinDate,
        Self::Salary,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Department => "department",
            Self::Status => "status",
            Self::JoinDate => "joinDate",
            Self::Salary => "salary",
        }
    }
}

impl Record for Employee {
    type Field = EmployeeField;

    fn id(&self) -> RowId {
        RowId::Int(self.id)
    }

    fn value(&self, field: EmployeeField) -> CellValue {
        match field {
            EmployeeField::Name => CellValue::text(self.name.clone()),
            EmployeeField::Email => CellValue::text(self.email.clone()),
            EmployeeField::Role => CellValue::text(self.role.clone()),
            EmployeeField::Department => CellValue::text(self.department.clone()),
            EmployeeField::Status => self.status.as_str().into(),
            EmployeeField::JoinDate => self.join_date.into(),
            EmployeeField::Salary => self.salary.into(),
        }
    }

    fn search_values(&self) -> Vec<CellValue> {
        std::iter::once(CellValue::Integer(self.id))
            .chain(EmployeeField::ALL.into_iter().map(|field| self.value(field)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub items: i64,
    pub order_date: Date,
    pub shipping_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    CustomerName,
    CustomerEmail,
    Total,
    Status,
    Items,
    OrderDate,
    ShippingAddress,
}

impl OrderField {
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::CustomerName,
        Self::CustomerEmail,
        Self::Total,
        Self::Status,
        Self::Items,
        Self::OrderDate,
        Self::ShippingAddress,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CustomerName => "customerName",
            Self::CustomerEmail => "customerEmail",
            Self::Total => "total",
            Self::Status => "status",
            Self::Items => "items",
            Self::OrderDate => "orderDate",
            Self::ShippingAddress => "shippingAddress",
        }
    }
}

impl Record for Order {
    type Field = OrderField;

    fn id(&self) -> RowId {
        RowId::Text(self.id.clone())
    }

    fn value(&self, field: OrderField) -> CellValue {
        match field {
            OrderField::Id => CellValue::text(self.id.clone()),
            OrderField::CustomerName => CellValue::text(self.customer_name.clone()),
            OrderField::CustomerEmail => CellValue::text(self.customer_email.clone()),
            OrderField::Total => CellValue::Decimal(self.total_cents as f64 / 100.0),
            OrderField::Status => self.status.as_str().into(),
            OrderField::Items => self.items.into(),
            OrderField::OrderDate => self.order_date.into(),
            OrderField::ShippingAddress => CellValue::text(self.shipping_address.clone()),
        }
    }

    fn search_values(&self) -> Vec<CellValue> {
        OrderField::ALL
            .into_iter()
            .map(|field| self.value(field))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    pub last_login: Option<Date>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
    Role,
    Status,
    LastLogin,
}

impl UserField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Role,
        Self::Status,
        Self::LastLogin,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::Status => "status",
            Self::LastLogin => "lastLogin",
        }
    }
}

impl Record for RecentUser {
    type Field = UserField;

    fn id(&self) -> RowId {
        RowId::Int(self.id)
    }

    fn value(&self, field: UserField) -> CellValue {
        match field {
            UserField::Name => CellValue::text(self.name.clone()),
            UserField::Email => CellValue::text(self.email.clone()),
            UserField::Role => CellValue::text(self.role.clone()),
            UserField::Status => CellValue::from(if self.active { "Active" } else { "Inactive" }),
            UserField::LastLogin => self.last_login.into(),
        }
    }

    fn search_values(&self) -> Vec<CellValue> {
        std::iter::once(CellValue::Integer(self.id))
            .chain(UserField::ALL.into_iter().map(|field| self.value(field)))
            .collect()
    }
}

pub fn employee_columns() -> Vec<Column<Employee>> {
    vec![
        Column::new(EmployeeField::Name, "Employee").sortable().width(280),
        Column::new(EmployeeField::Role, "Role").sortable().width(180),
        Column::new(EmployeeField::Department, "Department")
            .sortable()
            .width(140),
        Column::new(EmployeeField::Status, "Status")
            .sortable()
            .width(120)
            .render(|value, _| capitalize(&value.display())),
        Column::new(EmployeeField::JoinDate, "Join Date")
            .sortable()
            .width(120)
            .render(|value, _| format_short_date(value)),
        Column::new(EmployeeField::Salary, "Salary")
            .sortable()
            .width(120)
            .render(|value, _| match value {
                CellValue::Integer(dollars) => format_dollars(*dollars),
                other => other.display(),
            }),
    ]
}

pub fn order_columns() -> Vec<Column<Order>> {
    vec![
        Column::new(OrderField::Id, "Order").sortable(),
        Column::new(OrderField::CustomerName, "Customer").sortable(),
        Column::new(OrderField::Status, "Status")
            .sortable()
            .render(|value, _| value.display().to_uppercase()),
        Column::new(OrderField::Items, "Items").sortable(),
        Column::new(OrderField::Total, "Total")
            .sortable()
            .render(|_, order: &Order| format_cents(order.total_cents)),
        Column::new(OrderField::OrderDate, "Date").sortable(),
        Column::new(OrderField::ShippingAddress, "Ship To"),
    ]
}

pub fn user_columns() -> Vec<Column<RecentUser>> {
    vec![
        Column::new(UserField::Name, "Name").sortable(),
        Column::new(UserField::Email, "Email").sortable(),
        Column::new(UserField::Role, "Role").sortable(),
        Column::new(UserField::Status, "Status").sortable(),
        Column::new(UserField::LastLogin, "Last Login").sortable(),
    ]
}

pub fn demo_employees() -> Vec<Employee> {
    let rows = [
        (1, "John Doe", "Senior Developer", "Engineering", EmployeeStatus::Active, date!(2023 - 01 - 15), 75000),
        (2, "Jane Smith", "Product Manager", "Product", EmployeeStatus::Active, date!(2023 - 02 - 20), 85000),
        (3, "Mike Johnson", "Frontend Developer", "Engineering", EmployeeStatus::Inactive, date!(2023 - 03 - 10), 62000),
        (4, "Sarah Wilson", "UX Designer", "Design", EmployeeStatus::Active, date!(2023 - 04 - 05), 68000),
        (5, "David Brown", "Data Analyst", "Analytics", EmployeeStatus::Pending, date!(2023 - 05 - 12), 58000),
        (6, "Emily Davis", "Marketing Manager", "Marketing", EmployeeStatus::Active, date!(2023 - 06 - 18), 70000),
        (7, "Robert Chen", "DevOps Engineer", "Engineering", EmployeeStatus::Active, date!(2023 - 07 - 22), 78000),
        (8, "Lisa Wang", "Sales Director", "Sales", EmployeeStatus::Active, date!(2023 - 08 - 30), 95000),
    ];
    rows.into_iter()
        .map(|(id, name, role, department, status, join_date, salary)| Employee {
            id,
            email: email_for(name, "example.com"),
            name: name.to_owned(),
            role: role.to_owned(),
            department: department.to_owned(),
            status,
            join_date: Some(join_date),
            salary: Some(salary),
        })
        .collect()
}

pub fn demo_orders() -> Vec<Order> {
    let rows = [
        ("ORD-001", "John Doe", 29999, OrderStatus::Delivered, 3, date!(2023 - 12 - 15), "123 Main St, New York, NY"),
        ("ORD-002", "Jane Smith", 14950, OrderStatus::Shipped, 2, date!(2023 - 12 - 14), "456 Oak Ave, Los Angeles, CA"),
        ("ORD-003", "Mike Johnson", 8999, OrderStatus::Processing, 1, date!(2023 - 12 - 13), "789 Pine St, Chicago, IL"),
        ("ORD-004", "Sarah Wilson", 19999, OrderStatus::Pending, 4, date!(2023 - 12 - 12), "321 Elm St, Miami, FL"),
    ];
    rows.into_iter()
        .map(|(id, customer, total_cents, status, items, order_date, address)| Order {
            id: id.to_owned(),
            customer_email: email_for(customer, "example.com"),
            customer_name: customer.to_owned(),
            total_cents,
            status,
            items,
            order_date,
            shipping_address: address.to_owned(),
        })
        .collect()
}

pub fn demo_users() -> Vec<RecentUser> {
    let rows = [
        (1, "John Doe", "john@example.com", "Admin", true, date!(2024 - 01 - 15)),
        (2, "Jane Smith", "jane@example.com", "User", true, date!(2024 - 01 - 14)),
        (3, "Bob Johnson", "bob@example.com", "Editor", false, date!(2024 - 01 - 10)),
        (4, "Alice Brown", "alice@example.com", "User", true, date!(2024 - 01 - 13)),
        (5, "Charlie Wilson", "charlie@example.com", "Admin", true, date!(2024 - 01 - 15)),
    ];
    rows.into_iter()
        .map(|(id, name, email, role, active, last_login)| RecentUser {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            role: role.to_owned(),
            active,
            last_login: Some(last_login),
        })
        .collect()
}

fn email_for(name: &str, domain: &str) -> String {
    let local = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".");
    format!("{local}@{domain}")
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_short_date(value: &CellValue) -> String {
    match value {
        CellValue::Date(date) => date
            .format(format_description!(
                "[month repr:short] [day padding:none], [year]"
            ))
            .unwrap_or_else(|_| date.to_string()),
        other => other.display(),
    }
}

pub fn format_dollars(dollars: i64) -> String {
    let sign = if dollars < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars.unsigned_abs()))
}

pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", group_thousands(abs / 100), abs % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
