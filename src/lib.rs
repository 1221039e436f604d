pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod menu;
pub mod parser;
pub mod query;
pub mod types;

// Use cases and the ports they depend on
pub mod app;
// Adapters implementing those ports over the network
pub mod infra;
