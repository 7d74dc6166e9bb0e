use crate::core::AppConfig;
use crate::routes::ebook_catalog_routes;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{dev::Server, web::Data, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct CatalogWebServer {
    port: u16,
    server: Server,
}

impl CatalogWebServer {
    pub async fn build(configuration: AppConfig) -> Result<Self, anyhow::Error> {
        // Requests connect with these parameters; reject an unusable
        // configuration at startup rather than on the first request.
        configuration
            .mysql
            .validate()
            .map_err(|e| anyhow::anyhow!(e.message()))?;

        let address = format!(
            "{}:{}",
            configuration.catalog_server_config.host, configuration.catalog_server_config.port
        );

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, configuration)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener, configuration: AppConfig) -> Result<Server, anyhow::Error> {
    // Requests open their own store connection from these options; only the
    // options are shared.
    let mysql = Data::new(configuration.mysql);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT]);
        App::new()
            .wrap(TracingLogger::default())
            .configure(ebook_catalog_routes)
            .app_data(mysql.clone())
            .wrap(cors)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
