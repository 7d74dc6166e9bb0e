pub mod ebooks;
mod store;

pub use store::CatalogStore;
