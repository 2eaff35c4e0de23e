//! Infrastructure layer (filesystem-backed settings).

pub mod app_config;
