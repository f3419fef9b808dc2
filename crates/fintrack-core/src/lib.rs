pub mod config;
pub mod error;

pub use config::FintrackConfig;
pub use error::{FintrackError, Result};
