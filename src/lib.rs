pub mod admin;
pub mod client;
pub mod core;
pub mod db;
pub mod ebook_catalog_web_server;
pub mod models;
pub mod routes;
