use std::fmt::{Debug, Display};

use ebook_catalog::core::{get_subscriber, init_subscriber, AppConfig};
use ebook_catalog::ebook_catalog_web_server::CatalogWebServer;
use tokio::task::JoinError;

use colored::*;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let file_appender = tracing_appender::rolling::daily("logs", "ebook_catalog_api");

    let subscriber = get_subscriber("ebook_catalog_api".into(), "info".into(), file_appender);
    init_subscriber(subscriber);

    let config = AppConfig::new().expect("cant build our appConfig object");

    let catalog_web_server = CatalogWebServer::build(config.clone())
        .await
        .expect("failed to bind the catalog API server");

    let server_task = tokio::spawn(catalog_web_server.run_until_stopped());

    println!("{}", "-----------------------------------------".green());
    println!(
        "🚀 Catalog API started on Addr: {}:{}",
        config.catalog_server_config.host, config.catalog_server_config.port
    );
    println!("{}", "-----------------------------------------".green());

    tokio::select! {
        o = server_task => {report_exit("catalog api", o);}
    }
    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{}' task failed to complete",
                task_name
            )
        }
    }
}
