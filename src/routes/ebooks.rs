use actix_web::{get, web, HttpResponse, Responder};
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use tracing::instrument;

use crate::core::{AppError, MySqlConfig};
use crate::db::ebooks;

/// The one read endpoint. Each request opens and closes its own store
/// connection; no connection state is shared across requests.
#[instrument(name = "Get Ebooks", skip(mysql))]
#[get("/ebooks")]
pub async fn get_ebooks(mysql: web::Data<MySqlConfig>) -> Result<impl Responder, AppError> {
    let mut conn = MySqlConnection::connect_with(&mysql.connect())
        .await
        .map_err(|e| {
            tracing::error!("Failed to reach the catalog store: {:?}", e);
            AppError::connection_error(e)
        })?;

    let result = ebooks::fetch_catalog(&mut conn).await;
    let _ = conn.close().await;

    let catalog = result.map_err(|e| {
        tracing::error!("Failed to fetch the catalog: {:?}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(catalog))
}
