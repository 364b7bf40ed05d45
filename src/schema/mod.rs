//! Schema interpretation
//!
//! Parsing of schema markup into the immutable model, and
//! classification of declared types into presentation kinds.

pub mod loader;
pub mod model;
pub mod types;

pub use loader::SchemaLoader;
pub use model::{ComplexTypeDef, ElementDef, EnumerationDef, Schema};
pub use types::{classify, length_suffix, Kind, ResolvedType, TypeResolver};
