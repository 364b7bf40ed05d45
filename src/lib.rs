//! # xsdform
//!
//! Interprets a constrained subset of XML Schema (named element/type
//! declarations, ordered content sequences, simple-type enumerations,
//! documentation annotations) for three purposes:
//!
//! - derive a presentation-ready field model from a schema,
//! - serialize user-supplied values back into a schema-shaped document,
//! - pair an instance document with its governing schema to produce an
//!   annotated structural view.
//!
//! ## Example
//!
//! ```rust,ignore
//! use xsdform::{build_field_model, generate, load_schema, validate};
//!
//! let schema = load_schema(&std::fs::read("person.xsd")?)?;
//! let groups = build_field_model(&schema);
//!
//! let errors = validate(&groups, &values);
//! if errors.is_empty() {
//!     let document = generate(&groups, &values)?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Names and markup
pub mod documents;
pub mod names;
pub mod namespaces;

// Schema interpretation
pub mod schema;

// Field model and the operations built on it
pub mod fields;
pub mod generate;
pub mod render;
pub mod validate;

// External collaborator
pub mod store;

// Re-exports for convenience
pub use error::{Error, Result};
pub use fields::{build_field_model, Field, FieldGroup, FieldGroups, FieldValue, SubmittedValues};
pub use generate::DocumentGenerator;
pub use limits::Limits;
pub use render::DocumentRenderer;
pub use schema::{Kind, Schema, SchemaLoader};
pub use validate::validate;

/// Version of the xsdform library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Parse raw schema markup into an immutable [`Schema`]
pub fn load_schema(bytes: &[u8]) -> Result<Schema> {
    SchemaLoader::new().parse(bytes)
}

/// Serialize submitted values into a schema-shaped document
pub fn generate(groups: &FieldGroups, values: &SubmittedValues) -> Result<Vec<u8>> {
    DocumentGenerator::new().generate(groups, values)
}

/// Render an instance document annotated by its governing schema
pub fn render(instance: &[u8], schema: &Schema) -> Result<String> {
    DocumentRenderer::new().render(instance, schema)
}
