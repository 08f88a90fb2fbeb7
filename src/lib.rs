// Scrawl - minimal note/wiki service

// Leaf capabilities
pub mod id_generator;
pub mod render;

// Versioned page storage and slug resolution
pub mod models;
pub mod resolver;
pub mod store;

// Live edit protocol
pub mod session;

// HTTP surface and bootstrapping
pub mod app_state;
pub mod config;
pub mod http;

// Common utilities
pub mod error;

// Re-exports for convenience
pub use error::{AppError, AppResult};
