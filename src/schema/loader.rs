//! Schema loading
//!
//! Parses raw schema markup into the immutable [`Schema`] model. The
//! walk covers named complex types, complex types declared inline
//! within elements (at any depth, registered under their owning
//! element's name), named simple types carrying an enumeration
//! restriction, and top-level element declarations. De-duplication is
//! by name with the first occurrence winning.

use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::names::is_valid_ncname;
use crate::schema::model::{ComplexTypeDef, ElementDef, EnumerationDef, Schema};
use indexmap::IndexMap;
use tracing::debug;

/// Schema element local names
mod xsd_elements {
    pub const SCHEMA: &str = "schema";
    pub const ELEMENT: &str = "element";
    pub const COMPLEX_TYPE: &str = "complexType";
    pub const SIMPLE_TYPE: &str = "simpleType";
    pub const SEQUENCE: &str = "sequence";
    pub const RESTRICTION: &str = "restriction";
    pub const ENUMERATION: &str = "enumeration";
    pub const ANNOTATION: &str = "annotation";
    pub const DOCUMENTATION: &str = "documentation";
    // Content models outside the supported subset
    pub const CHOICE: &str = "choice";
    pub const ALL: &str = "all";
    pub const GROUP: &str = "group";
}

/// Schema attribute names
mod xsd_attrs {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const VALUE: &str = "value";
    pub const TARGET_NAMESPACE: &str = "targetNamespace";
}

/// Parses schema markup into a [`Schema`]
#[derive(Debug, Default)]
pub struct SchemaLoader {
    limits: Limits,
}

impl SchemaLoader {
    /// Create a loader with default limits
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse schema markup bytes into a [`Schema`]
    pub fn parse(&self, bytes: &[u8]) -> Result<Schema> {
        let doc = Document::parse_with_limits(bytes, &self.limits).map_err(|e| match e {
            Error::Xml(msg) => Error::SchemaParse(msg),
            other => other,
        })?;

        let root = doc
            .root()
            .ok_or_else(|| Error::SchemaParse("schema document has no root element".into()))?;
        if root.local_name() != xsd_elements::SCHEMA {
            return Err(Error::SchemaParse(format!(
                "expected a 'schema' root element, found '{}'",
                root.local_name()
            )));
        }

        let mut schema = Schema {
            target_namespace: root
                .get_attribute(xsd_attrs::TARGET_NAMESPACE)
                .map(String::from),
            ..Default::default()
        };

        for child in &root.children {
            match child.local_name() {
                xsd_elements::ELEMENT => {
                    let def = self.parse_element_def(child, &mut schema)?;
                    if !schema.elements.contains_key(&def.name) {
                        schema.elements.insert(def.name.clone(), def);
                    }
                }
                xsd_elements::COMPLEX_TYPE => {
                    let name = required_attr(child, xsd_attrs::NAME)?;
                    let def = self.parse_complex_type(child, &name, &mut schema)?;
                    if !schema.complex_types.contains_key(&name) {
                        schema.complex_types.insert(name, def);
                    }
                }
                xsd_elements::SIMPLE_TYPE => {
                    let name = required_attr(child, xsd_attrs::NAME)?;
                    if let Some(def) = parse_enumeration(child, &name)? {
                        schema.enumerations.insert(name, def);
                    }
                }
                _ => {}
            }
        }

        debug!(
            complex_types = schema.complex_types.len(),
            enumerations = schema.enumerations.len(),
            elements = schema.elements.len(),
            "parsed schema"
        );

        Ok(schema)
    }

    /// Parse an element declaration, registering any inline complex
    /// type under the element's own name
    fn parse_element_def(&self, el: &Element, schema: &mut Schema) -> Result<ElementDef> {
        let name = required_attr(el, xsd_attrs::NAME)?;
        if !is_valid_ncname(&name) {
            return Err(Error::SchemaParse(format!(
                "'{}' is not a valid element name",
                name
            )));
        }

        let type_ref = el.get_attribute(xsd_attrs::TYPE).map(String::from);
        let documentation = annotation_text(el);

        let inline_complex = match el.find_child(xsd_elements::COMPLEX_TYPE) {
            Some(ct_el) => {
                let def = self.parse_complex_type(ct_el, &name, schema)?;
                if !schema.complex_types.contains_key(&name) {
                    schema.complex_types.insert(name.clone(), def.clone());
                }
                Some(def)
            }
            None => None,
        };

        let inline_enum = match el.find_child(xsd_elements::SIMPLE_TYPE) {
            Some(st_el) => parse_enumeration(st_el, &name)?,
            None => None,
        };

        Ok(ElementDef {
            name,
            type_ref,
            inline_complex,
            inline_enum,
            documentation,
        })
    }

    /// Parse a complex type body into an ordered sequence of element
    /// declarations
    fn parse_complex_type(
        &self,
        ct: &Element,
        owner: &str,
        schema: &mut Schema,
    ) -> Result<ComplexTypeDef> {
        for child in &ct.children {
            if matches!(
                child.local_name(),
                xsd_elements::CHOICE | xsd_elements::ALL | xsd_elements::GROUP
            ) {
                return Err(Error::UnsupportedContentModel(format!(
                    "complex type '{}' uses '{}'; only plain sequences are supported",
                    owner,
                    child.local_name()
                )));
            }
        }

        let mut sequence = Vec::new();
        if let Some(seq) = ct.find_child(xsd_elements::SEQUENCE) {
            for el in seq.children_named(xsd_elements::ELEMENT) {
                sequence.push(self.parse_element_def(el, schema)?);
            }
        }

        Ok(ComplexTypeDef {
            name: owner.to_string(),
            sequence,
        })
    }
}

/// Get a required attribute or fail with a schema parse error
fn required_attr(el: &Element, attr: &str) -> Result<String> {
    el.get_attribute(attr).map(String::from).ok_or_else(|| {
        Error::SchemaParse(format!(
            "'{}' is missing required attribute '{}'",
            el.local_name(),
            attr
        ))
    })
}

/// Extract annotation/documentation text from a declaration
fn annotation_text(el: &Element) -> Option<String> {
    el.find_child(xsd_elements::ANNOTATION)?
        .find_child(xsd_elements::DOCUMENTATION)?
        .text
        .clone()
}

/// Parse a simple type into an enumeration entry, if it carries an
/// enumeration restriction; simple types restricting anything else are
/// outside the subset and are ignored
fn parse_enumeration(st: &Element, name: &str) -> Result<Option<EnumerationDef>> {
    let Some(restriction) = st.find_child(xsd_elements::RESTRICTION) else {
        return Ok(None);
    };

    let mut options = IndexMap::new();
    let mut found = false;
    for en in restriction.children_named(xsd_elements::ENUMERATION) {
        found = true;
        let value = required_attr(en, xsd_attrs::VALUE)?;
        let label = annotation_text(en).unwrap_or_default();
        // Duplicate values overwrite: label last-wins, position first-wins
        options.insert(value, label);
    }

    if !found {
        return Ok(None);
    }

    Ok(Some(EnumerationDef {
        name: name.to_string(),
        options,
    }))
}
