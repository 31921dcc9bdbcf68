// Public API for integration tests and potential library usage

pub mod api;
pub mod config;
pub mod hub;
pub mod registry;
pub mod ws;
