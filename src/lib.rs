pub mod backend;
pub mod batch;
pub mod config;
pub mod error;
pub mod record;
pub mod server;
pub mod views;

pub use error::{ApiError, Error, InputFileError, Result};
