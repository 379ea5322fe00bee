pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod fields;
pub mod output;
pub mod record;
pub mod reference;
pub mod statusdb;
pub mod store;
