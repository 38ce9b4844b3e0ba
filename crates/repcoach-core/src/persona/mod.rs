//! Persona domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Persona` value type
//! - `preset`: the built-in customer archetypes
//! - `catalog`: the read-only `PersonaCatalog` loaded at startup

mod catalog;
mod model;
mod preset;

pub use catalog::PersonaCatalog;
pub use model::Persona;
pub use preset::get_default_presets;
