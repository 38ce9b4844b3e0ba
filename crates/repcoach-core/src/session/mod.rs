//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Session` record and its lifecycle states
//! - `registry`: the guarded in-memory session store

mod model;
mod registry;

pub use model::{Session, SessionState};
pub use registry::SessionRegistry;
