//! Captures one still photo from an attached camera and uploads it to the
//! backend's hardware ingestion endpoint.

pub mod app_config;
pub mod backend_config;
pub mod camera;
pub mod cli;
pub mod common;
pub mod config_loader;
pub mod core;
pub mod errors;
pub mod operations;
