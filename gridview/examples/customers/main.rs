//! Customers Example
//!
//! Drives a customer table the way a screen would: typing into the search
//! box, sorting, paging, selecting and toggling status, printing the table
//! after each step.

use std::fs::File;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gridview::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Clone, Debug, Record)]
struct Customer {
    id: String,
    name: String,
    email: Option<String>,
    city: String,
    balance: i64,
    active: bool,
}

const NAMES: [&str; 8] = [
    "Ali", "Sana", "Ahsan", "Ayesha", "Bilal", "Hira", "Usman", "Zara",
];
const CITIES: [&str; 4] = ["Lahore", "Karachi", "Islamabad", "Peshawar"];

fn customers(active_flip: Option<&str>) -> Vec<Customer> {
    (1..=42)
        .map(|i| {
            let name = NAMES[i % NAMES.len()];
            let id = format!("C{i:03}");
            let mut active = i % 3 != 0;
            if active_flip == Some(id.as_str()) {
                active = !active;
            }
            Customer {
                email: (i % 4 != 0).then(|| format!("{}{i}@example.com", name.to_lowercase())),
                id,
                name: format!("{name} {i}"),
                city: CITIES[i % CITIES.len()].to_string(),
                balance: (i as i64 * 137) % 1000,
                active,
            }
        })
        .collect()
}

fn columns() -> Vec<Column<Customer>> {
    vec![
        Column::field("id", "ID"),
        Column::field("name", "Name"),
        Column::field("email", "Email").unsortable(),
        Column::field("city", "City"),
        Column::field("balance", "Balance").cell(|c: &Customer| format!("Rs {}", c.balance)),
        Column::field("active", "Active")
            .status()
            .cell(|c: &Customer| if c.active { "[x]" } else { "[ ]" }.to_string()),
    ]
}

fn print_view(title: &str, table: &DataTable<Customer>) {
    let view = table.view();
    println!("== {title}");
    let headers: Vec<String> = view
        .headers
        .iter()
        .map(|h| match h.sort {
            Some(direction) => format!("{} ({direction})", h.header),
            None => h.header.clone(),
        })
        .collect();
    println!("   {}", headers.join(" | "));
    match &view.body {
        Body::Loading => println!("   loading..."),
        Body::Empty => println!("   no data found"),
        Body::Rows(rows) => {
            for row in rows {
                let mark = if row.selected { '*' } else { ' ' };
                println!(" {mark} {}", row.cells.join(" | "));
            }
        }
    }
    println!(
        "   page {}/{} ({} of {} rows, {} selected)\n",
        view.page.page_index + 1,
        view.page.total_pages,
        view.filtered_count,
        view.total_count,
        view.selected_count
    );
}

#[tokio::main]
async fn main() {
    // Set up file logging
    if let Ok(log_file) = File::create("customers.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let config = TableConfig::default()
        .debounce(Duration::from_millis(150))
        .row_height(24)
        .container_height(120);
    let toggled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&toggled);

    let table = match DataTable::new(columns(), config) {
        Ok(table) => table
            .on_selection_change(|ids| println!("   -> selection {ids:?}"))
            .on_toggle_status(move |id, active| {
                println!("   -> {id} active was {active}, saving");
                flag.store(true, Ordering::SeqCst);
            }),
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    table.set_loading(true);
    print_view("Loading", &table);
    table.set_rows(customers(None));
    table.set_loading(false);
    print_view("Loaded", &table);

    for partial in ["l", "la", "lah"] {
        table.set_filter_input(FilterKey::column("city"), partial);
        tokio::time::sleep(Duration::from_millis(40)).await;
    }
    println!(
        "   city input '{}', committed {:?}",
        table.filter_input(&FilterKey::column("city")),
        table.column_filter("city")
    );
    tokio::time::sleep(Duration::from_millis(200)).await;
    print_view("City filter 'lah'", &table);

    println!("   suggestions for 'ka': {:?}\n", table.suggestions("city", "ka", 3));

    table.toggle_sort("balance");
    table.toggle_sort("balance");
    print_view("Balance descending", &table);

    table.toggle_all_visible();
    table.reset_filters();
    print_view("Selected Lahore, filters cleared", &table);

    if table.next_page() {
        table.scroll_to_row(8);
        print_view("Page 2, scrolled to row 9", &table);
    }

    if table.toggle_status("C004", "active") && toggled.load(Ordering::SeqCst) {
        table.set_rows(customers(Some("C004")));
    }
    if let Some(customer) = table.find_row("C004") {
        println!("   C004 active is now {}\n", customer.active);
    }

    table.set_rows(customers(None).into_iter().filter(|c| c.city != "Lahore").collect());
    print_view("Lahore customers removed upstream", &table);

    table.dispose();
}
