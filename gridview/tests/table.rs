//! Tests for the DataTable handle.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{Customer, columns, customer, many, trio};
use gridview::prelude::*;
use gridview::{Column, GridError};

fn table(rows: Vec<Customer>) -> DataTable<Customer> {
    DataTable::with_rows(columns(), rows, TableConfig::default()).unwrap()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_table_id_is_unique() {
    let a = table(trio());
    let b = table(trio());
    assert_ne!(a.id(), b.id());
    assert!(a.id_string().starts_with("__data_table_"));
    assert_eq!(a.clone().id(), a.id());
}

#[test]
fn test_sort_toggle_cycles_back_to_source_order() {
    let table = table(trio());
    assert_eq!(
        table.toggle_sort("name"),
        Some(SortSpec::ascending("name"))
    );
    assert_eq!(table.filtered_ids(), strings(&["3", "1", "2"]));
    assert_eq!(
        table.toggle_sort("name"),
        Some(SortSpec::descending("name"))
    );
    assert_eq!(table.filtered_ids(), strings(&["2", "1", "3"]));
    assert_eq!(table.toggle_sort("name"), None);
    assert_eq!(table.filtered_ids(), strings(&["1", "2", "3"]));
}

#[test]
fn test_unsortable_column_ignores_toggle() {
    let columns = vec![
        Column::field("id", "ID"),
        Column::field("name", "Name").unsortable(),
    ];
    let table = DataTable::with_rows(columns, trio(), TableConfig::default()).unwrap();
    assert_eq!(table.toggle_sort("name"), None);
    assert_eq!(table.toggle_sort("missing"), None);
    assert_eq!(table.filtered_ids(), strings(&["1", "2", "3"]));
}

#[test]
fn test_view_headers_show_sort_state() {
    let table = table(trio());
    table.toggle_sort("balance");
    let view = table.view();
    let balance = view.headers.iter().find(|h| h.key == "balance").unwrap();
    assert_eq!(balance.sort, Some(SortDirection::Ascending));
    let name = view.headers.iter().find(|h| h.key == "name").unwrap();
    assert_eq!(name.sort, None);
}

#[test]
fn test_column_filter_now() {
    let table = table(trio());
    table.set_column_filter("city", "lahore");
    assert_eq!(table.filtered_ids(), strings(&["1", "3"]));
    assert_eq!(table.column_filter("city"), Some("lahore".to_string()));
    assert_eq!(table.filter_input(&FilterKey::column("city")), "lahore");

    table.set_column_filter("city", "");
    assert_eq!(table.filtered_count(), 3);
    assert_eq!(table.column_filter("city"), None);
}

#[test]
fn test_global_filter_now() {
    let columns = vec![Column::field("id", "ID"), Column::field("name", "Name")];
    let table = DataTable::with_rows(columns, trio(), TableConfig::default()).unwrap();
    table.set_global_filter("ah");
    assert_eq!(table.filtered_ids(), strings(&["3"]));
    assert_eq!(table.global_filter(), "ah");
    table.set_global_filter("");
    assert_eq!(table.filtered_count(), 3);
}

#[test]
fn test_reset_filters() {
    let table = table(trio());
    table.set_column_filter("city", "karachi");
    table.set_global_filter("sana");
    assert_eq!(table.filtered_count(), 1);
    table.reset_filters();
    assert_eq!(table.filtered_count(), 3);
    assert!(!table.query().is_filtered());
    assert_eq!(table.filter_input(&FilterKey::Global), "");
}

#[test]
fn test_selection_survives_filtering() {
    let table = table(trio());
    assert!(table.toggle_row("2"));
    table.set_column_filter("city", "lahore");
    assert_eq!(table.selected_ids(), strings(&["2"]));
    table.set_column_filter("city", "");
    assert!(table.is_row_selected("2"));
}

#[test]
fn test_toggle_all_covers_filtered_rows() {
    let table = table(trio());
    table.set_column_filter("city", "lahore");
    table.toggle_all_visible();
    assert_eq!(table.selected_ids(), strings(&["1", "3"]));
    assert!(table.is_all_selected());

    table.set_column_filter("city", "");
    assert!(table.is_some_selected());
    assert!(!table.is_all_selected());

    table.toggle_all_visible();
    assert!(table.is_all_selected());
    table.toggle_all_visible();
    assert!(table.selected_ids().is_empty());
}

#[test]
fn test_toggle_all_spans_pages() {
    let table = table(many(25));
    assert_eq!(table.page_rows().len(), 10);
    table.toggle_all_visible();
    assert_eq!(table.selected_ids().len(), 25);
}

#[test]
fn test_selection_drops_ids_missing_from_new_rows() {
    let reports: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
    let sink = Arc::clone(&reports);
    let table = DataTable::new(columns(), TableConfig::default())
        .unwrap()
        .with_selected_ids(["A", "B"])
        .on_selection_change(move |ids| sink.lock().unwrap().push(ids.to_vec()));

    table.set_rows(vec![customer("A", "Ali", "Lahore", 1, true)]);
    assert_eq!(table.selected_ids(), strings(&["A"]));
    assert_eq!(*reports.lock().unwrap(), vec![strings(&["A"])]);

    table.set_rows(vec![
        customer("A", "Ali", "Lahore", 1, true),
        customer("B", "Bilal", "Lahore", 2, true),
    ]);
    assert_eq!(table.selected_ids(), strings(&["A"]));
    assert_eq!(reports.lock().unwrap().len(), 1);
}

#[test]
fn test_refetch_while_loading_keeps_selection() {
    let table = table(trio()).with_selected_ids(["1", "3"]);
    table.set_loading(true);
    table.set_rows(Vec::new());
    assert!(table.is_row_selected("1"));

    table.set_rows(trio());
    table.set_loading(false);
    assert_eq!(table.selected_ids(), strings(&["1", "3"]));
}

#[test]
fn test_selection_callback_on_toggle() {
    let reports: Arc<Mutex<Vec<Vec<String>>>> = Arc::default();
    let sink = Arc::clone(&reports);
    let table = table(trio())
        .on_selection_change(move |ids| sink.lock().unwrap().push(ids.to_vec()));
    table.toggle_row("3");
    table.toggle_row("1");
    table.clear_selection();
    assert_eq!(
        *reports.lock().unwrap(),
        vec![strings(&["3"]), strings(&["1", "3"]), Vec::new()]
    );
}

#[test]
fn test_selected_rows_in_source_order() {
    let table = table(trio());
    table.set_selected_ids(["3", "1"]);
    let names: Vec<String> = table.selected_rows().into_iter().map(|c| c.name).collect();
    assert_eq!(names, strings(&["Ali", "Ahsan"]));
}

#[test]
fn test_loading_body() {
    let table = table(trio());
    table.set_loading(true);
    let view = table.view();
    assert!(matches!(view.body, Body::Loading));
    assert!(view.window.is_none());
    assert!(view.body.rows().is_empty());
}

#[test]
fn test_empty_body() {
    let empty = table(Vec::new());
    assert!(matches!(empty.view().body, Body::Empty));

    let table = table(trio());
    table.set_column_filter("city", "quetta");
    let view = table.view();
    assert!(matches!(view.body, Body::Empty));
    assert_eq!(view.filtered_count, 0);
    assert_eq!(view.total_count, 3);
    assert_eq!(view.page.total_pages, 1);
}

#[test]
fn test_view_rows_render_cells() {
    let columns = vec![
        Column::field("id", "ID"),
        Column::field("name", "Name"),
        Column::field("balance", "Balance").cell(|c: &Customer| format!("Rs {}", c.balance)),
        Column::field("active", "Active").status(),
    ];
    let table = DataTable::with_rows(columns, trio(), TableConfig::default()).unwrap();
    table.toggle_row("2");
    let view = table.view();
    let rows = view.body.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].cells, strings(&["1", "Ali", "Rs 300", "true"]));
    assert!(rows[1].selected);
    assert_eq!(rows[1].row.name, "Sana");
    assert_eq!(view.selected_count, 1);
    assert!(view.some_selected);
}

#[test]
fn test_view_window_limits_rendered_rows() {
    let config = TableConfig::new()
        .page_sizes(vec![10_usize, 50], 50)
        .row_height(10)
        .container_height(50)
        .overscan(2);
    let table = DataTable::with_rows(columns(), many(50), config).unwrap();

    let view = table.view();
    assert_eq!(view.body.rows().len(), 7);
    let window = view.window.unwrap();
    assert_eq!(window.padding_bottom, 430);

    table.set_scroll_offset(205);
    let view = table.view();
    let rows = view.body.rows();
    assert_eq!(rows.first().map(|r| r.index), Some(18));
    assert_eq!(rows.first().map(|r| r.id.as_str()), Some("18"));
    assert_eq!(rows.len(), 10);
}

#[test]
fn test_scroll_reanchors_on_query_change() {
    let config = TableConfig::new()
        .page_sizes(vec![50_usize], 50)
        .row_height(10)
        .container_height(50);
    let table = DataTable::with_rows(columns(), many(50), config).unwrap();
    table.set_scroll_offset(300);
    assert_eq!(table.scroll_offset(), 300);
    table.toggle_sort("name");
    assert_eq!(table.scroll_offset(), 0);

    table.set_scroll_offset(300);
    table.set_rows(many(50));
    assert_eq!(table.scroll_offset(), 300);
    table.set_rows(many(40));
    assert_eq!(table.scroll_offset(), 0);
}

#[test]
fn test_page_clamps_after_filter() {
    let table = table(many(25));
    assert!(table.last_page());
    assert_eq!(table.page_index(), 2);
    assert_eq!(table.page_rows().len(), 5);

    table.set_column_filter("city", "lahore");
    assert_eq!(table.filtered_count(), 9);
    assert_eq!(table.page_index(), 0);
    assert_eq!(table.total_pages(), 1);
    assert!(!table.can_next());
}

#[test]
fn test_page_navigation() {
    let table = table(many(25));
    assert!(!table.previous_page());
    assert!(table.next_page());
    assert_eq!(table.page_rows()[0].id, "10");
    assert!(table.can_prev());
    assert!(table.set_page_index(9));
    assert_eq!(table.page_index(), 2);
    assert!(table.first_page());
    assert_eq!(table.page_index(), 0);
}

#[test]
fn test_page_size_must_be_allowed() {
    let table = table(many(25));
    table.next_page();
    assert_eq!(
        table.set_page_size(7),
        Err(GridError::PageSizeNotAllowed {
            size: 7,
            allowed: vec![10, 20, 30, 40, 50],
        })
    );
    assert_eq!(table.page_index(), 1);

    assert!(table.set_page_size(20).is_ok());
    assert_eq!(table.page_index(), 0);
    assert_eq!(table.total_pages(), 2);
    assert_eq!(table.view().page.page_size, 20);
}

#[test]
fn test_status_toggle_reports_current_value() {
    let calls: Arc<Mutex<Vec<(String, bool)>>> = Arc::default();
    let sink = Arc::clone(&calls);
    let table = table(trio())
        .on_toggle_status(move |id, active| sink.lock().unwrap().push((id.to_string(), active)));

    assert!(table.toggle_status("2", "active"));
    assert!(table.toggle_status("1", "active"));
    assert!(!table.toggle_status("1", "name"));
    assert!(!table.toggle_status("9", "active"));
    assert_eq!(
        *calls.lock().unwrap(),
        vec![("2".to_string(), false), ("1".to_string(), true)]
    );
    assert_eq!(table.find_row("2").map(|c| c.active), Some(false));
}

#[test]
fn test_status_toggle_without_callback() {
    let table = table(trio());
    assert!(!table.toggle_status("1", "active"));
}

#[test]
fn test_distinct_values_and_suggestions() {
    let table = table(trio());
    assert_eq!(table.distinct_values("city"), strings(&["Karachi", "Lahore"]));
    assert_eq!(table.distinct_values("balance"), strings(&["20", "100", "300"]));
    assert_eq!(table.suggestions("city", "lah", 5), strings(&["Lahore"]));
    assert!(table.distinct_values("missing").is_empty());

    table.set_rows(vec![customer("9", "Zara", "Quetta", 5, true)]);
    assert_eq!(table.distinct_values("city"), strings(&["Quetta"]));
}

#[test]
fn test_duplicate_columns_rejected() {
    let columns = vec![
        Column::<Customer>::field("id", "ID"),
        Column::field("id", "Identifier"),
    ];
    let err = DataTable::new(columns, TableConfig::default()).unwrap_err();
    assert_eq!(err, GridError::duplicate_column("id"));
}

#[test]
fn test_invalid_config_rejected() {
    let config = TableConfig::new().page_sizes(vec![10_usize, 20], 15);
    assert!(DataTable::<Customer>::new(columns(), config).is_err());
}

#[test]
fn test_builder_without_accessor_fails() {
    let err = Column::<Customer>::builder("label")
        .header("Label")
        .build()
        .unwrap_err();
    assert_eq!(err, GridError::missing_accessor("label"));
}

#[test]
fn test_builder_derived_column() {
    let label = Column::<Customer>::builder("label")
        .header("Label")
        .derive(|c| CellValue::from(format!("{} ({})", c.name, c.city)))
        .sortable(false)
        .build()
        .unwrap();
    let table = DataTable::with_rows(vec![label], trio(), TableConfig::default()).unwrap();
    assert_eq!(table.view().body.rows()[0].cells, strings(&["Ali (Lahore)"]));
    assert_eq!(table.toggle_sort("label"), None);
}

#[test]
fn test_dirty_flag() {
    let table = table(trio());
    assert!(table.is_dirty());
    table.clear_dirty();
    assert!(!table.is_dirty());
    table.toggle_row("1");
    assert!(table.is_dirty());
}

#[test]
fn test_zero_debounce_applies_immediately() {
    let config = TableConfig::new().debounce(Duration::ZERO);
    let table = DataTable::with_rows(columns(), trio(), config).unwrap();
    table.set_filter_input(FilterKey::column("city"), "karachi");
    assert_eq!(table.filtered_ids(), strings(&["2"]));
    assert_eq!(table.pending_filter_updates(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_filter_input_echoes_then_commits() {
    let table = table(trio());
    table.set_filter_input(FilterKey::column("city"), "karachi");

    assert_eq!(table.filter_input(&FilterKey::column("city")), "karachi");
    assert_eq!(table.column_filter("city"), None);
    assert_eq!(table.filtered_count(), 3);
    assert_eq!(table.pending_filter_updates(), 1);
    let header = table
        .view()
        .headers
        .into_iter()
        .find(|h| h.key == "city")
        .unwrap();
    assert_eq!(header.filter_input, "karachi");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(table.column_filter("city"), Some("karachi".to_string()));
    assert_eq!(table.filtered_ids(), strings(&["2"]));
    assert_eq!(table.pending_filter_updates(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_commits_last_term() {
    let table = table(trio());
    for term in ["l", "la", "lah"] {
        table.set_filter_input(FilterKey::column("city"), term);
        tokio::time::sleep(Duration::from_millis(40)).await;
    }
    assert_eq!(table.column_filter("city"), None);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(table.column_filter("city"), Some("lah".to_string()));
    assert_eq!(table.filtered_ids(), strings(&["1", "3"]));
}

#[tokio::test(start_paused = true)]
async fn test_filter_inputs_debounce_independently() {
    let table = table(trio());
    table.set_filter_input(FilterKey::column("city"), "lahore");
    table.set_filter_input(FilterKey::column("name"), "ah");
    assert_eq!(table.pending_filter_updates(), 2);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(table.filtered_ids(), strings(&["3"]));
}

#[tokio::test(start_paused = true)]
async fn test_dispose_cancels_pending_filter() {
    let table = table(trio());
    table.set_filter_input(FilterKey::Global, "sana");
    table.dispose();
    assert!(table.is_disposed());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(table.global_filter(), "");
    assert_eq!(table.filtered_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_filter_applies_to_rows_replaced_meanwhile() {
    let table = table(trio());
    table.set_filter_input(FilterKey::column("city"), "karachi");
    tokio::time::sleep(Duration::from_millis(50)).await;

    table.set_rows(vec![
        customer("7", "Hira", "Karachi", 5, true),
        customer("8", "Usman", "Quetta", 6, true),
        customer("9", "Zara", "Karachi", 7, false),
    ]);
    assert_eq!(table.filtered_count(), 3);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(table.filtered_ids(), strings(&["7", "9"]));
    let names: Vec<String> = table.page_rows().into_iter().map(|c| c.name).collect();
    assert_eq!(names, strings(&["Hira", "Zara"]));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_one_clone_keeps_pending_filter() {
    let table = table(trio());
    let other = table.clone();
    other.set_filter_input(FilterKey::column("city"), "karachi");
    drop(other);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(table.filtered_ids(), strings(&["2"]));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_last_clone_cancels_pending_filter() {
    let state = Arc::new(());
    let held = Arc::clone(&state);
    let table = table(trio()).on_selection_change(move |_| {
        let _ = &held;
    });
    let other = table.clone();
    table.set_filter_input(FilterKey::Global, "sana");
    assert_eq!(other.pending_filter_updates(), 1);
    drop(table);
    drop(other);

    tokio::time::sleep(Duration::from_millis(200)).await;
    // The timer held no strong reference, so the table state is gone with it.
    assert_eq!(Arc::strong_count(&state), 1);
}
