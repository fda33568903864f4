//! Drives a table from a simulated search box and prints what a renderer
//! would draw.
//!
//! Run with `cargo run --example demo`; debug logs go to `demo.log`.

use std::cell::RefCell;
use std::fs::File;
use std::rc::Rc;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::sync::mpsc;

use datatable::{
    Column, Datatable, DatatableConfig, ParamState, Record, TableView, Value, search,
    sleep_until_optional,
};

fn users() -> Vec<Record> {
    [
        (1, "Alice", "alice@example.com"),
        (2, "bob", "bob@example.com"),
        (3, "Carol", "carol@example.org"),
        (4, "Dave", "dave@example.net"),
        (5, "Erin", "erin@example.org"),
    ]
    .into_iter()
    .map(|(id, name, email)| Record::new().set("id", id).set("name", name).set("email", email))
    .collect()
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("id").label("Id").sortable(),
        Column::new("name").label("Name").sortable(),
        Column::new("email").label("Email"),
        Column::new("edit").label("").value(|row| match row.get("id") {
            Some(id) => Value::String(format!("[edit {}]", id)),
            None => Value::Null,
        }),
    ]
}

fn print_view(view: &TableView) {
    if let Some(header) = &view.header {
        println!("search: {:?}", header.search_text);
    }
    let headers: Vec<String> = view
        .columns
        .iter()
        .map(|c| match c.indicator {
            Some(indicator) => format!("{} {:?}", c.text, indicator),
            None => c.text.clone(),
        })
        .collect();
    println!("| {} |", headers.join(" | "));
    for row in &view.rows {
        let mark = match row.selected {
            Some(true) => "[x] ",
            Some(false) => "[ ] ",
            None => "",
        };
        let cells: Vec<String> = row.cells.iter().map(|c| c.to_string()).collect();
        println!("{}| {} |", mark, cells.join(" | "));
    }
    if let Some(empty) = &view.empty {
        println!("({}, spanning {} columns)", empty.message, empty.colspan);
    }
    if let Some(pager) = &view.pager {
        println!(
            "page {} prev={} next={} size={}",
            pager.page, pager.previous_enabled, pager.next_enabled, pager.current
        );
    }
    println!();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let published: Rc<RefCell<Vec<ParamState>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&published);

    let config = DatatableConfig::default()
        .with_checkbox(true)
        .with_pagination(true)
        .with_per_page(3);
    let mut table = Datatable::new(config, columns())
        .on_params_change(move |params| sink.borrow_mut().push(params.clone()))
        .on_selection_change(|rows| println!("selection: {} rows", rows.len()));
    table.set_data(users());
    table.mount();
    print_view(&table.view());

    // Keystrokes arrive faster than the debounce window; only "example.org"
    // should settle.
    let (tx, mut rx) = mpsc::channel::<String>(16);
    tokio::spawn(async move {
        let query = "example.org";
        for end in 1..=query.len() {
            if tx.send(query[..end].to_string()).await.is_err() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
    });

    loop {
        tokio::select! {
            key = rx.recv() => match key {
                Some(key) => table.search_input(&key),
                None if table.next_deadline().is_none() => break,
                None => {
                    sleep_until_optional(table.next_deadline()).await;
                    table.poll_timers();
                }
            },
            _ = sleep_until_optional(table.next_deadline()) => {
                table.poll_timers();
            }
        }
    }
    print_view(&table.view());

    table.sort_click("id");
    table.toggle_all();
    print_view(&table.view());

    for params in published.borrow().iter() {
        println!("params: {}", serde_json::to_string(params)?);
    }

    table.dispose();

    // The host can also own search: it stores the query, then feeds its own
    // result back once the handler returns.
    let all = users();
    let query: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let pending = Rc::clone(&query);
    let mut hosted = Datatable::new(DatatableConfig::default(), columns())
        .on_search(move |key, _data| *pending.borrow_mut() = Some(key.to_string()));
    hosted.set_data(all.clone());

    hosted.search_input("bob");
    if let Some(key) = query.borrow_mut().take() {
        hosted.set_data(search(&all, &key));
    }
    print_view(&hosted.view());

    Ok(())
}
