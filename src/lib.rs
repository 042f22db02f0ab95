pub mod cli;
pub mod config;
pub mod observability;
pub mod store;
