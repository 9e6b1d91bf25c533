mod config;
mod error;

pub use config::DistrictingConfig;
pub use error::{DistrictError, Result};
