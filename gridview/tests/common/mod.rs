//! Shared fixtures for table tests.
#![allow(dead_code)]

use gridview::{Column, Record};

#[derive(Clone, Debug, PartialEq, Record)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub city: String,
    pub balance: i64,
    pub active: bool,
}

pub fn customer(id: &str, name: &str, city: &str, balance: i64, active: bool) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        city: city.to_string(),
        balance,
        active,
    }
}

/// Ali, Sana, Ahsan.
pub fn trio() -> Vec<Customer> {
    vec![
        customer("1", "Ali", "Lahore", 300, true),
        customer("2", "Sana", "Karachi", 20, false),
        customer("3", "Ahsan", "Lahore", 100, true),
    ]
}

/// `count` customers with ids "0".."count".
pub fn many(count: usize) -> Vec<Customer> {
    (0..count)
        .map(|i| {
            let city = ["Lahore", "Karachi", "Islamabad"][i % 3];
            customer(&i.to_string(), &format!("Customer {i}"), city, i as i64, i % 2 == 0)
        })
        .collect()
}

pub fn columns() -> Vec<Column<Customer>> {
    vec![
        Column::field("id", "ID"),
        Column::field("name", "Name"),
        Column::field("city", "City"),
        Column::field("balance", "Balance"),
        Column::field("active", "Active").status(),
    ]
}

pub fn ids(rows: &[Customer]) -> Vec<String> {
    rows.iter().map(|c| c.id.clone()).collect()
}
