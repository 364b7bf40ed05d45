//! Schema model
//!
//! The parsed structural model derived from schema markup: named
//! complex types, named enumerations and top-level element
//! declarations, all in declaration order. The model is built once per
//! operation and is read-only afterwards; sequence order inside a
//! complex type is canonical and is reused both for field listing and
//! for positional pairing against instance documents.

use crate::error::Result;
use crate::schema::loader::SchemaLoader;
use indexmap::IndexMap;

/// A named, ordered structure: a sequence of child element declarations
#[derive(Debug, Clone)]
pub struct ComplexTypeDef {
    /// Type name; inline types carry their owning element's name
    pub name: String,
    /// Child element declarations in document order
    pub sequence: Vec<ElementDef>,
}

/// An element declaration
#[derive(Debug, Clone)]
pub struct ElementDef {
    /// Element name
    pub name: String,
    /// Declared type reference, as written (possibly prefixed)
    pub type_ref: Option<String>,
    /// Complex type declared inline within this element
    pub inline_complex: Option<ComplexTypeDef>,
    /// Enumeration declared inline within this element
    pub inline_enum: Option<EnumerationDef>,
    /// Documentation annotation text
    pub documentation: Option<String>,
}

/// An enumeration restriction: ordered value -> label mapping
///
/// Duplicate values overwrite: the label of the last occurrence wins
/// while the position of the first is kept.
#[derive(Debug, Clone)]
pub struct EnumerationDef {
    /// Enumeration name; inline enumerations carry their owning
    /// element's name
    pub name: String,
    /// Value -> documentation label, in document order
    pub options: IndexMap<String, String>,
}

/// The parsed schema: types and elements in declaration order
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Target namespace of the schema, if declared
    pub target_namespace: Option<String>,
    /// Named complex types, plus inline complex types registered under
    /// their owning element's name
    pub complex_types: IndexMap<String, ComplexTypeDef>,
    /// Named simple types carrying an enumeration restriction
    pub enumerations: IndexMap<String, EnumerationDef>,
    /// Top-level element declarations
    pub elements: IndexMap<String, ElementDef>,
}

impl Schema {
    /// Parse a schema from raw markup bytes with default limits
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        SchemaLoader::new().parse(bytes)
    }

    /// Parse a schema from a string with default limits
    pub fn from_string(markup: &str) -> Result<Self> {
        Self::from_bytes(markup.as_bytes())
    }

    /// Look up a complex type by name
    pub fn complex_type(&self, name: &str) -> Option<&ComplexTypeDef> {
        self.complex_types.get(name)
    }

    /// Look up an enumeration by name
    pub fn enumeration(&self, name: &str) -> Option<&EnumerationDef> {
        self.enumerations.get(name)
    }

    /// Look up a top-level element declaration by name
    pub fn element(&self, name: &str) -> Option<&ElementDef> {
        self.elements.get(name)
    }
}
