#![forbid(unsafe_code)]

pub mod analyzer;
pub mod api;
pub mod config;
pub mod forecast;
pub mod models;
pub mod store;
