use std::io::{self, Write};

use colored::*;

use ebook_catalog::client::{CatalogClient, LibraryView};
use ebook_catalog::core::{get_subscriber, init_subscriber};

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

fn prompt(label: &str) -> String {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line).unwrap_or(0);
    line.trim().to_string()
}

fn render(view: &LibraryView) {
    println!("{}", view.status_line().bold());
    for (position, row) in view.rows().iter().enumerate() {
        println!(
            "  {}. {} — {}",
            position + 1,
            row.title.bold(),
            row.file_path
        );
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let file_appender = tracing_appender::rolling::daily("logs", "ebook_client");
    let subscriber = get_subscriber("ebook_client".into(), "info".into(), file_appender);
    init_subscriber(subscriber);

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("EBOOK_CATALOG_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    println!("{}", "E-book Library".bold());
    let client = CatalogClient::new(base_url);
    let mut view = LibraryView::new();
    view.refresh(&client).await;
    render(&view);
    println!("Commands: refresh | open <n> | quit");

    loop {
        let line = prompt(">");
        let (command, argument) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line.as_str(), ""),
        };

        match command {
            "refresh" => {
                view.refresh(&client).await;
                render(&view);
            }
            "open" => match argument.parse::<usize>() {
                Ok(position) if position > 0 => match view.open_row(position - 1) {
                    Ok(()) => println!("{}", "Opening…".green()),
                    Err(e) => println!("{}", e.message().red()),
                },
                _ => println!("{}", "open takes a list position".red()),
            },
            "quit" | "exit" => break,
            "" => {}
            other => println!("{}", format!("Unknown command: {}", other).red()),
        }
    }

    Ok(())
}
