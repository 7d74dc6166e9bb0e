use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::instrument;

use crate::core::{AppError, MySqlConfig};
use crate::db::CatalogStore;
use crate::models::ebooks::{Ebook, NewEbook, DEFAULT_STATUS};

/// Local folder the admin copies uploads into, relative to the working
/// directory. Created on first upload.
pub const UPLOAD_FOLDER: &str = "uploads";

pub const EBOOK_EXTENSIONS: &[&str] = &["pdf", "epub", "mobi"];

/// The store operations the admin workflow needs. `CatalogStore` is the
/// production implementation.
#[allow(async_fn_in_trait)]
pub trait CatalogBackend {
    async fn insert(&self, new: &NewEbook) -> Result<i32, AppError>;
    async fn list(&self) -> Result<Vec<Ebook>, AppError>;
    async fn find_path(&self, ebook_id: i32) -> Result<Option<String>, AppError>;
    async fn delete(&self, ebook_id: i32) -> Result<(), AppError>;
}

impl CatalogBackend for CatalogStore {
    async fn insert(&self, new: &NewEbook) -> Result<i32, AppError> {
        CatalogStore::insert(self, new).await
    }

    async fn list(&self) -> Result<Vec<Ebook>, AppError> {
        CatalogStore::list(self).await
    }

    async fn find_path(&self, ebook_id: i32) -> Result<Option<String>, AppError> {
        CatalogStore::find_path(self, ebook_id).await
    }

    async fn delete(&self, ebook_id: i32) -> Result<(), AppError> {
        CatalogStore::delete(self, ebook_id).await
    }
}

#[derive(Debug)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: i64,
}

/// Operator-facing state for the management phase: the connected store, the
/// currently selected file and the last fetched catalog. Each operator
/// action is one method; no error escapes past a single action.
pub struct AdminController<S: CatalogBackend = CatalogStore> {
    store: S,
    upload_folder: PathBuf,
    selected: Option<SelectedFile>,
    ebooks: Vec<Ebook>,
}

impl AdminController {
    /// Configuration phase: validate the parameters, connect once, ensure
    /// the schema. On success the controller starts with a fresh listing.
    pub async fn connect(config: &MySqlConfig) -> Result<Self, AppError> {
        let store = CatalogStore::connect(config).await?;
        let mut controller = Self::with_store(store);
        controller.refresh().await?;
        Ok(controller)
    }
}

impl<S: CatalogBackend> AdminController<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            upload_folder: PathBuf::from(UPLOAD_FOLDER),
            selected: None,
            ebooks: Vec::new(),
        }
    }

    pub fn with_upload_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.upload_folder = folder.into();
        self
    }

    pub fn ebooks(&self) -> &[Ebook] {
        &self.ebooks
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Records the operator's file choice. The file must exist and carry
    /// one of the e-book extensions.
    pub fn select_file(&mut self, path: impl AsRef<Path>) -> Result<&SelectedFile, AppError> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !EBOOK_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::validation_error(format!(
                "'{}' is not an e-book file (expected one of: {})",
                path.display(),
                EBOOK_EXTENSIONS.join(", ")
            )));
        }

        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::not_found(format!("File not found: {}", path.display()))
            }
            _ => AppError::io_error(e),
        })?;

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| AppError::validation_error("File has no usable name"))?;

        self.selected = Some(SelectedFile {
            path: path.to_path_buf(),
            name,
            size: metadata.len() as i64,
        });

        Ok(self.selected.as_ref().unwrap())
    }

    /// Copies the selected file into the upload folder under its original
    /// name (an existing file with that name is overwritten) and inserts
    /// the catalog row. Refuses before any mutation when nothing is
    /// selected. If the copy succeeds and the insert fails, the copied
    /// file is left behind.
    #[instrument(name = "Upload Ebook", skip(self))]
    pub async fn upload(&mut self) -> Result<i32, AppError> {
        let selected = self
            .selected
            .as_ref()
            .ok_or_else(|| AppError::validation_error("No file selected"))?;

        fs::create_dir_all(&self.upload_folder).map_err(|e| {
            tracing::error!("Failed to create the upload folder: {:?}", e);
            AppError::io_error(e)
        })?;

        let destination = self.upload_folder.join(&selected.name);
        fs::copy(&selected.path, &destination).map_err(|e| {
            tracing::error!("Failed to copy {:?}: {:?}", selected.path, e);
            AppError::io_error(e)
        })?;

        let new = NewEbook {
            titulo: selected.name.clone(),
            arquivo_path: destination.to_string_lossy().into_owned(),
            data_upload: Local::now().naive_local(),
            tamanho: selected.size,
            status: DEFAULT_STATUS.to_string(),
        };

        let id = self.store.insert(&new).await?;
        self.selected = None;

        // The upload itself succeeded; a failed listing refresh only leaves
        // the displayed catalog stale until the next one.
        if let Err(e) = self.refresh().await {
            tracing::warn!("Failed to refresh the catalog after upload: {:?}", e);
        }

        Ok(id)
    }

    #[instrument(name = "Refresh Catalog", skip(self))]
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        self.ebooks = self.store.list().await?;
        Ok(())
    }

    /// Removes the stored file if it still exists, then deletes the row.
    /// A file already gone is not an error; a row already gone is.
    #[instrument(name = "Delete Ebook", skip(self))]
    pub async fn delete(&mut self, ebook_id: i32) -> Result<(), AppError> {
        let path = self
            .store
            .find_path(ebook_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No ebook with id {}", ebook_id)))?;

        let file = Path::new(&path);
        if file.exists() {
            fs::remove_file(file).map_err(|e| {
                tracing::error!("Failed to remove {:?}: {:?}", file, e);
                AppError::io_error(e)
            })?;
        }

        self.store.delete(ebook_id).await?;
        self.refresh().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppErrorType;
    use claim::{assert_err, assert_ok, assert_some};
    use sqlx::mysql::MySqlConnectOptions;

    fn offline_controller() -> AdminController {
        // Options pointing at a closed port: any store call would fail,
        // which the tests below must never reach.
        let options = MySqlConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("nobody")
            .database("nothing");
        AdminController::with_store(CatalogStore::new(options))
    }

    /// Accepts inserts but cannot list: the catalog refresh after an
    /// upload fails while the upload itself succeeds.
    struct ListlessStore {
        insert_id: i32,
    }

    impl CatalogBackend for ListlessStore {
        async fn insert(&self, _new: &NewEbook) -> Result<i32, AppError> {
            Ok(self.insert_id)
        }

        async fn list(&self) -> Result<Vec<Ebook>, AppError> {
            Err(AppError::connection_error("lost connection"))
        }

        async fn find_path(&self, _ebook_id: i32) -> Result<Option<String>, AppError> {
            Ok(None)
        }

        async fn delete(&self, _ebook_id: i32) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn upload_with_no_file_selected_is_rejected_before_any_mutation() {
        let workdir = tempfile::tempdir().unwrap();
        let upload_folder = workdir.path().join("uploads");
        let mut controller = offline_controller().with_upload_folder(&upload_folder);

        let error = controller.upload().await.unwrap_err();
        assert_eq!(error.error_type, AppErrorType::ValidationError);
        // rejected before touching the filesystem
        assert!(!upload_folder.exists());
    }

    #[tokio::test]
    async fn upload_reports_the_new_id_even_if_the_listing_refresh_fails() {
        let workdir = tempfile::tempdir().unwrap();
        let source = workdir.path().join("book.pdf");
        std::fs::write(&source, vec![0u8; 64]).unwrap();
        let upload_folder = workdir.path().join("uploads");

        let mut controller = AdminController::with_store(ListlessStore { insert_id: 41 })
            .with_upload_folder(&upload_folder);
        assert_ok!(controller.select_file(&source));

        let id = assert_ok!(controller.upload().await);
        assert_eq!(id, 41);
        assert!(controller.selected().is_none());
        assert!(upload_folder.join("book.pdf").exists());
    }

    #[test]
    fn select_file_rejects_non_ebook_extensions() {
        let workdir = tempfile::tempdir().unwrap();
        let path = workdir.path().join("notes.txt");
        std::fs::write(&path, b"plain text").unwrap();

        let mut controller = offline_controller();
        let error = controller.select_file(&path).unwrap_err();
        assert_eq!(error.error_type, AppErrorType::ValidationError);
        assert!(controller.selected().is_none());
    }

    #[test]
    fn select_file_rejects_missing_files() {
        let workdir = tempfile::tempdir().unwrap();
        let mut controller = offline_controller();

        let error = controller
            .select_file(workdir.path().join("ghost.pdf"))
            .unwrap_err();
        assert_eq!(error.error_type, AppErrorType::NotFoundError);
    }

    #[test]
    fn select_file_records_name_and_size() {
        let workdir = tempfile::tempdir().unwrap();
        let path = workdir.path().join("book.PDF");
        std::fs::write(&path, vec![0u8; 1024]).unwrap();

        let mut controller = offline_controller();
        assert_ok!(controller.select_file(&path));

        let selected = assert_some!(controller.selected());
        assert_eq!(selected.name, "book.PDF");
        assert_eq!(selected.size, 1024);
    }

    #[test]
    fn selecting_a_second_file_replaces_the_first() {
        let workdir = tempfile::tempdir().unwrap();
        let first = workdir.path().join("first.epub");
        let second = workdir.path().join("second.mobi");
        std::fs::write(&first, b"one").unwrap();
        std::fs::write(&second, b"three").unwrap();

        let mut controller = offline_controller();
        assert_ok!(controller.select_file(&first));
        assert_ok!(controller.select_file(&second));
        assert_eq!(controller.selected().unwrap().name, "second.mobi");

        // a rejected selection keeps the previous one
        assert_err!(controller.select_file(workdir.path().join("bad.txt")));
        assert_eq!(controller.selected().unwrap().name, "second.mobi");
    }
}
