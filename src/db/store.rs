use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use tracing::instrument;

use crate::core::{AppError, MySqlConfig};
use crate::db::ebooks;
use crate::models::ebooks::{Ebook, NewEbook};

/// Access layer over the `ebooks` table. Holds connect options only; every
/// operation acquires its own connection and closes it on every exit path.
pub struct CatalogStore {
    options: MySqlConnectOptions,
}

impl CatalogStore {
    /// Builds a store without touching the network. `connect` is the
    /// validating entry point used by operator-facing flows.
    pub fn new(options: MySqlConnectOptions) -> Self {
        Self { options }
    }

    /// Validates the configuration, attempts one connection and ensures the
    /// `ebooks` table exists. Connection failures surface as
    /// `ConnectionError`, schema failures as `DbError`.
    #[instrument(name = "Connect to Catalog Store", skip(config))]
    pub async fn connect(config: &MySqlConfig) -> Result<Self, AppError> {
        config.validate()?;

        let store = Self::new(config.connect());
        let mut conn = store.acquire().await?;
        let result = ebooks::create_ebooks_table(&mut conn).await;
        let _ = conn.close().await;
        result?;

        Ok(store)
    }

    async fn acquire(&self) -> Result<MySqlConnection, AppError> {
        MySqlConnection::connect_with(&self.options)
            .await
            .map_err(AppError::connection_error)
    }

    #[instrument(name = "Insert Ebook", skip(self, new), fields(titulo = %new.titulo))]
    pub async fn insert(&self, new: &NewEbook) -> Result<i32, AppError> {
        let mut conn = self.acquire().await?;
        let result = ebooks::insert_ebook(&mut conn, new).await;
        let _ = conn.close().await;
        result
    }

    #[instrument(name = "List Ebooks", skip(self))]
    pub async fn list(&self) -> Result<Vec<Ebook>, AppError> {
        let mut conn = self.acquire().await?;
        let result = ebooks::fetch_all_ebooks(&mut conn).await;
        let _ = conn.close().await;
        result
    }

    #[instrument(name = "Find Ebook Path", skip(self))]
    pub async fn find_path(&self, ebook_id: i32) -> Result<Option<String>, AppError> {
        let mut conn = self.acquire().await?;
        let result = ebooks::fetch_ebook_path(&mut conn, ebook_id).await;
        let _ = conn.close().await;
        result
    }

    #[instrument(name = "Delete Ebook", skip(self))]
    pub async fn delete(&self, ebook_id: i32) -> Result<(), AppError> {
        let mut conn = self.acquire().await?;
        let result = ebooks::delete_ebook(&mut conn, ebook_id).await;
        let _ = conn.close().await;

        match result? {
            0 => Err(AppError::not_found(format!(
                "No ebook with id {} to delete",
                ebook_id
            ))),
            _ => Ok(()),
        }
    }
}
