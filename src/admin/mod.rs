mod controller;

pub use controller::{
    AdminController, CatalogBackend, SelectedFile, EBOOK_EXTENSIONS, UPLOAD_FOLDER,
};
