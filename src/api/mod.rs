//! Client for the external receipt extraction service.

pub mod error;
pub mod extract;

pub use error::ApiError;
pub use extract::ExtractionClient;
