pub mod config;
pub mod error;
pub mod types;

pub use config::ScalerefConfig;
pub use error::{AccessError, AccessResult, AnalysisError};
pub use types::*;
