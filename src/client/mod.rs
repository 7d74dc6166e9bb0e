pub mod api;
pub mod view;

pub use api::{CatalogClient, CatalogEntry, ClientError};
pub use view::{DisplayRow, LibraryView};
