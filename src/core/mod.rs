pub mod config;
pub mod errors;
pub mod startup;

pub use config::{AppConfig, Credentials};
pub use errors::{AdapterError, Outcome, Service};
