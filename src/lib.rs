pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod session;
pub mod session_factory;
pub mod startup;
