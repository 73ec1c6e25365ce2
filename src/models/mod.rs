pub mod book;
pub mod publisher;
pub mod sale;
pub mod shop;
pub mod stock;
