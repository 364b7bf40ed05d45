//! Presentation field model
//!
//! Flattens a [`Schema`] into ordered groups of self-contained field
//! descriptors. After this stage no schema access is needed to render
//! a form, validate submitted values, or regenerate a document; the
//! group and field order mirrors the schema's declaration order, which
//! the generator reuses for its emission order.

use crate::schema::model::{ElementDef, Schema};
use crate::schema::types::{Kind, TypeResolver};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// A self-contained field descriptor
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    /// Field name (the element name)
    pub name: String,
    /// Presentation kind
    pub kind: Kind,
    /// Minimum length constraint
    pub min_length: Option<usize>,
    /// Maximum length constraint
    pub max_length: Option<usize>,
    /// Pattern constraint (regular expression)
    pub pattern: Option<String>,
    /// Enumeration options (Enum kind only), value -> label
    pub options: IndexMap<String, String>,
    /// Documentation annotation text
    pub documentation: Option<String>,
}

/// An ordered group of fields named after the owning complex type (or
/// element)
#[derive(Debug, Clone, Serialize)]
pub struct FieldGroup {
    /// Group name
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<Field>,
}

/// Ordered mapping of group name to field group
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FieldGroups {
    groups: IndexMap<String, FieldGroup>,
}

impl FieldGroups {
    /// Create an empty field group collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a group, replacing any existing group of the same name
    /// (the original position is kept on replacement)
    pub fn insert(&mut self, group: FieldGroup) {
        self.groups.insert(group.name.clone(), group);
    }

    /// Look up a group by name
    pub fn get(&self, name: &str) -> Option<&FieldGroup> {
        self.groups.get(name)
    }

    /// Whether a group with the given name exists
    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Iterate groups in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &FieldGroup> {
        self.groups.values()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// A submitted value for one field: the value itself plus an optional
/// free-text annotation carried through to the generated document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// The submitted value
    #[serde(default)]
    pub value: String,
    /// Free-text annotation, emitted as a `description` attribute
    #[serde(default)]
    pub annotation: String,
}

impl FieldValue {
    /// Create a value with no annotation
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            annotation: String::new(),
        }
    }

    /// Set the annotation
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = annotation.into();
        self
    }

    /// Whether both the value and the annotation are empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.annotation.is_empty()
    }
}

/// Submitted values grouped identically to [`FieldGroups`]:
/// group name -> field name -> value
pub type SubmittedValues = IndexMap<String, IndexMap<String, FieldValue>>;

/// Flatten a schema into ordered field groups
///
/// One group per complex type (one field per sequence child, in
/// order); then singleton fallback groups for top-level elements that
/// neither own a group nor appear as any sequence child; then
/// singleton groups for named enumerations, replacing any same-named
/// group.
pub fn build_field_model(schema: &Schema) -> FieldGroups {
    let resolver = TypeResolver::new(schema);
    let mut groups = FieldGroups::new();

    for ct in schema.complex_types.values() {
        let fields = ct
            .sequence
            .iter()
            .map(|def| field_from(def, &resolver))
            .collect();
        groups.insert(FieldGroup {
            name: ct.name.clone(),
            fields,
        });
    }

    // Names already accounted for as some complex type's child
    let covered: HashSet<&str> = schema
        .complex_types
        .values()
        .flat_map(|ct| ct.sequence.iter().map(|def| def.name.as_str()))
        .collect();

    for def in schema.elements.values() {
        if groups.contains(&def.name) || covered.contains(def.name.as_str()) {
            continue;
        }
        groups.insert(FieldGroup {
            name: def.name.clone(),
            fields: vec![field_from(def, &resolver)],
        });
    }

    for en in schema.enumerations.values() {
        groups.insert(FieldGroup {
            name: en.name.clone(),
            fields: vec![Field {
                name: en.name.clone(),
                kind: Kind::Enum,
                min_length: None,
                max_length: None,
                pattern: None,
                options: en.options.clone(),
                documentation: None,
            }],
        });
    }

    debug!(groups = groups.len(), "built field model");
    groups
}

fn field_from(def: &ElementDef, resolver: &TypeResolver) -> Field {
    let resolved = resolver.resolve(def);
    Field {
        name: def.name.clone(),
        kind: resolved.kind,
        min_length: resolved.min_length,
        max_length: resolved.max_length,
        pattern: resolved.pattern,
        options: resolved.options,
        documentation: def.documentation.clone(),
    }
}
