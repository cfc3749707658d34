pub mod aggregate;
pub mod config;
pub mod error_handling;
pub mod gallery;
pub mod github;
pub mod models;
pub mod render;
pub mod search;
pub mod site;
pub mod ui;
pub mod urls;

pub use models::*;
