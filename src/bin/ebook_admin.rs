use std::io::{self, Write};

use colored::*;
use secrecy::Secret;

use ebook_catalog::admin::AdminController;
use ebook_catalog::core::{get_subscriber, init_subscriber, MySqlConfig};
use ebook_catalog::models::ebooks::Ebook;

fn prompt(label: &str) -> String {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line).unwrap_or(0);
    line.trim().to_string()
}

fn render(ebooks: &[Ebook]) {
    if ebooks.is_empty() {
        println!("{}", "The catalog is empty".yellow());
        return;
    }
    for ebook in ebooks {
        println!(
            "  [{}] {} — uploaded {} ({} bytes, {})",
            ebook.id.to_string().cyan(),
            ebook.titulo.bold(),
            ebook.data_upload.format("%d/%m/%Y %H:%M"),
            ebook.tamanho,
            ebook.status
        );
    }
}

/// Configuration phase: re-prompts until a connection succeeds.
async fn connect_phase() -> AdminController {
    loop {
        let config = MySqlConfig {
            host: prompt("Host"),
            username: prompt("User"),
            password: Secret::new(prompt("Password")),
            port: prompt("Port (empty for 3306)").parse().unwrap_or(3306),
            database_name: prompt("Database"),
        };

        match AdminController::connect(&config).await {
            Ok(controller) => {
                println!("{}", "Database connection established!".green());
                return controller;
            }
            Err(e) => println!(
                "{}",
                format!("Failed to connect to the database: {}", e.message()).red()
            ),
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let file_appender = tracing_appender::rolling::daily("logs", "ebook_admin");
    let subscriber = get_subscriber("ebook_admin".into(), "info".into(), file_appender);
    init_subscriber(subscriber);

    println!("{}", "E-book Manager".bold());
    let mut controller = connect_phase().await;
    render(controller.ebooks());
    println!("Commands: list | select <path> | upload | delete <id> | quit");

    loop {
        let line = prompt(">");
        let (command, argument) = match line.split_once(' ') {
            Some((c, a)) => (c, a.trim()),
            None => (line.as_str(), ""),
        };

        match command {
            "list" => {
                match controller.refresh().await {
                    Ok(()) => render(controller.ebooks()),
                    Err(e) => println!("{}", e.message().red()),
                };
            }
            "select" => match controller.select_file(argument) {
                Ok(selected) => println!(
                    "{}",
                    format!("Selected file: {} ({} bytes)", selected.name, selected.size).green()
                ),
                Err(e) => println!("{}", e.message().red()),
            },
            "upload" => match controller.upload().await {
                Ok(id) => {
                    println!("{}", format!("E-book uploaded with id {}!", id).green());
                    render(controller.ebooks());
                }
                Err(e) => println!("{}", format!("Upload failed: {}", e.message()).red()),
            },
            "delete" => match argument.parse::<i32>() {
                Ok(id) => match controller.delete(id).await {
                    Ok(()) => {
                        println!("{}", "E-book deleted!".green());
                        render(controller.ebooks());
                    }
                    Err(e) => println!("{}", format!("Delete failed: {}", e.message()).red()),
                },
                Err(_) => println!("{}", "delete takes a numeric id".red()),
            },
            "quit" | "exit" => break,
            "" => {}
            other => println!("{}", format!("Unknown command: {}", other).red()),
        }
    }

    Ok(())
}
