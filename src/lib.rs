pub mod config;
pub mod entity;
pub mod error;
pub mod export;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod query;
pub mod scoring;
pub mod signals;
pub mod source;
pub mod tui;
