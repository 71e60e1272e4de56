//! Core traits, settings, and module registry for Libris.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module, SchemaFragment};
pub use registry::ModuleRegistry;
