pub mod config;
pub mod models;
pub mod path;
pub mod scan;
