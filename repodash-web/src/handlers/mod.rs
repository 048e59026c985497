//! HTTP request handlers for the Repodash web server

pub mod health;
pub mod pages;
pub mod repository;
pub mod types;

pub use health::*;
pub use pages::*;
pub use repository::*;

pub use types::*;
