pub mod cli;
pub mod clients;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod services;
pub mod state;
pub mod types;
pub mod validation;

/// In-memory store for exercising handlers and services without MySQL
pub mod testing;
