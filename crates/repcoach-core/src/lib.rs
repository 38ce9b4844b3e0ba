pub mod analysis;
pub mod error;
pub mod persona;
pub mod services;
pub mod session;
pub mod transcript;

// Re-export common error type
pub use error::{CoachError, Result};
