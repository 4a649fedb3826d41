//! Terminal views: header, card table, footer, and the app loop tying them
//! together.

pub mod app;
pub mod footer;
pub mod header;
pub mod table;
