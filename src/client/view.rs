use crate::client::api::{CatalogClient, ClientError};
use crate::core::AppError;

#[derive(Debug)]
pub struct DisplayRow {
    pub id: i32,
    pub title: String,
    pub file_path: String,
}

/// Render model for the library list: the rows in API order plus one
/// status line. Every fetch outcome maps to a status message; the view
/// never carries stale rows alongside an error.
pub struct LibraryView {
    rows: Vec<DisplayRow>,
    status_line: String,
}

impl LibraryView {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            status_line: "E-book library".to_string(),
        }
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    pub async fn refresh(&mut self, client: &CatalogClient) {
        match client.fetch_catalog().await {
            Ok(entries) if entries.is_empty() => {
                self.rows.clear();
                self.status_line = "The library is empty".to_string();
            }
            Ok(entries) => {
                self.rows = entries
                    .into_iter()
                    .map(|entry| DisplayRow {
                        id: entry.id,
                        title: entry.titulo,
                        file_path: entry.arquivo_path,
                    })
                    .collect();
                self.status_line =
                    format!("Library updated • {} books available", self.rows.len());
            }
            Err(ClientError::Status(code)) => {
                self.rows.clear();
                self.status_line = format!("Failed to refresh the library: {}", code);
            }
            Err(ClientError::Connection(cause)) => {
                self.rows.clear();
                self.status_line = format!("Connection error: {}", cause);
            }
            Err(ClientError::InvalidPayload(cause)) => {
                self.rows.clear();
                self.status_line = format!("Unreadable response from the library: {}", cause);
            }
        }
    }

    /// Opens the row's file path with the host's default handler. The path
    /// is not checked for reachability; on another machine it may well be
    /// stale, and the failed open is reported, not fatal.
    pub fn open_row(&self, index: usize) -> Result<(), AppError> {
        let row = self
            .rows
            .get(index)
            .ok_or_else(|| AppError::not_found(format!("No book at position {}", index + 1)))?;

        open::that(&row.file_path).map_err(AppError::io_error)
    }
}

impl Default for LibraryView {
    fn default() -> Self {
        Self::new()
    }
}
