pub mod config;
pub mod constants;
pub mod dump;
pub mod error;
pub mod sql_diff;

pub use config::{CaseSensitivity, DiffScope, SyncConfig};
pub use error::{Result, SyncError};
