// Library exports for the CLI and integration tests

pub mod client;
pub mod config;
pub mod content;
pub mod database;
pub mod draft;
pub mod error;
pub mod events;
pub mod logging;
pub mod publish;
pub mod upload;
pub mod validation;
pub mod wizard;
