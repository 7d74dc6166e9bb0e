pub mod ebooks;
