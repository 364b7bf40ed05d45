//! Annotated structural rendering
//!
//! Pairs an instance document with its governing schema type and
//! produces an annotated text view: one line per visited element
//! carrying its documentation, leaf text and attributes. Instance
//! children are paired with the schema sequence positionally by index,
//! not by tag name; this mirrors the generator's own emission order.
//! Pairing stops at the shorter side, so missing trailing children are
//! not an error and extra instance children are not visited.

use crate::documents::{Document, Element};
use crate::error::{Error, Result};
use crate::generate::DEFAULT_ROOT_NAME;
use crate::limits::Limits;
use crate::schema::model::{ComplexTypeDef, ElementDef, Schema};
use tracing::trace;

/// Produces the annotated structural view of an instance document
#[derive(Debug)]
pub struct DocumentRenderer {
    limits: Limits,
    container_name: String,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer {
    /// Create a renderer with default limits and the default generator
    /// container name
    pub fn new() -> Self {
        Self {
            limits: Limits::default(),
            container_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the generator container name recognized as a synthetic root
    pub fn with_container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    /// Render an instance document against its governing schema
    ///
    /// The root must match a top-level element declaration by local
    /// name and namespace. A root bearing the generator's container
    /// name is rendered against the schema's complex types in
    /// declaration order, which makes documents produced by
    /// [`crate::generate::DocumentGenerator`] renderable; any other
    /// unmatched root fails with [`Error::RootNotFound`].
    pub fn render(&self, instance: &[u8], schema: &Schema) -> Result<String> {
        let doc = Document::parse_with_limits(instance, &self.limits)?;
        let root = doc
            .root()
            .ok_or_else(|| Error::Xml("instance document has no root element".into()))?;

        let mut out = String::new();

        if let Some(def) = find_root_declaration(schema, root) {
            let type_def = root_type(def, schema)?;
            let mut visiting = vec![type_def.name.clone()];
            self.visit(root, Some(def), Some(type_def), schema, 0, &mut out, &mut visiting)?;
        } else if root.local_name() == self.container_name {
            let synthetic = container_type(&self.container_name, schema);
            let mut visiting = Vec::new();
            self.visit(root, None, Some(&synthetic), schema, 0, &mut out, &mut visiting)?;
        } else {
            return Err(Error::RootNotFound(root.qname.to_string()));
        }

        Ok(out)
    }

    /// Emit one line for the node, then recurse into its children
    /// paired positionally with the sequence's declared children
    #[allow(clippy::too_many_arguments)]
    fn visit(
        &self,
        node: &Element,
        def: Option<&ElementDef>,
        type_def: Option<&ComplexTypeDef>,
        schema: &Schema,
        depth: usize,
        out: &mut String,
        visiting: &mut Vec<String>,
    ) -> Result<()> {
        self.limits.check_depth(depth + 1)?;
        trace!(element = node.local_name(), depth, "visiting");

        out.push_str(&"  ".repeat(depth));
        out.push_str(node.local_name());
        if let Some(doc_text) = def.and_then(|d| d.documentation.as_deref()) {
            if !doc_text.is_empty() {
                out.push_str(&format!(" ({})", doc_text));
            }
        }
        if node.is_leaf() {
            if let Some(text) = &node.text {
                out.push_str(&format!(": {}", text));
            }
        }
        for (name, value) in &node.attributes {
            out.push_str(&format!(" {}: {};", name, value));
        }
        out.push('\n');

        let Some(type_def) = type_def else {
            return Ok(());
        };

        // Positional pairing, stopping at the shorter side
        let paired = node.children.len().min(type_def.sequence.len());
        for i in 0..paired {
            let child_node = &node.children[i];
            let child_def = &type_def.sequence[i];

            match child_type(child_def, schema) {
                Some(ct) => {
                    if visiting.iter().any(|name| name == &ct.name) {
                        return Err(Error::TypeResolution(format!(
                            "cyclic reference through type '{}'",
                            ct.name
                        )));
                    }
                    visiting.push(ct.name.clone());
                    self.visit(child_node, Some(child_def), Some(ct), schema, depth + 1, out, visiting)?;
                    visiting.pop();
                }
                None => {
                    self.visit(child_node, Some(child_def), None, schema, depth + 1, out, visiting)?;
                }
            }
        }

        Ok(())
    }
}

/// Find the top-level element declaration matching the instance root
/// by local name and namespace
fn find_root_declaration<'a>(schema: &'a Schema, root: &Element) -> Option<&'a ElementDef> {
    schema
        .elements
        .values()
        .find(|def| def.name == root.local_name() && schema.target_namespace.as_deref() == root.namespace())
}

/// Locate the complex type governing a root element declaration:
/// inline first, then by name among known complex types
fn root_type<'a>(def: &'a ElementDef, schema: &'a Schema) -> Result<&'a ComplexTypeDef> {
    if let Some(ct) = &def.inline_complex {
        return Ok(ct);
    }
    let Some(type_ref) = &def.type_ref else {
        return Err(Error::TypeNotFound(def.name.clone()));
    };
    let local = crate::names::local_name(type_ref);
    schema
        .complex_types
        .get(local)
        .ok_or_else(|| Error::TypeNotFound(local.to_string()))
}

/// Locate the complex type governing a sequence child, if any; a child
/// whose declared type is simple or built-in is a leaf
fn child_type<'a>(def: &'a ElementDef, schema: &'a Schema) -> Option<&'a ComplexTypeDef> {
    if let Some(ct) = &def.inline_complex {
        return Some(ct);
    }
    let type_ref = def.type_ref.as_deref()?;
    schema.complex_types.get(crate::names::local_name(type_ref))
}

/// Synthetic type pairing a generator container's children with the
/// schema's complex types in declaration order
fn container_type(name: &str, schema: &Schema) -> ComplexTypeDef {
    ComplexTypeDef {
        name: name.to_string(),
        sequence: schema
            .complex_types
            .values()
            .map(|ct| ElementDef {
                name: ct.name.clone(),
                type_ref: Some(ct.name.clone()),
                inline_complex: None,
                inline_enum: None,
                documentation: None,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INVOICE_XSD: &str = r#"
        <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
            <xs:element name="invoice" type="InvoiceType">
                <xs:annotation>
                    <xs:documentation>An invoice</xs:documentation>
                </xs:annotation>
            </xs:element>
            <xs:complexType name="InvoiceType">
                <xs:sequence>
                    <xs:element name="number" type="digits-6">
                        <xs:annotation>
                            <xs:documentation>Invoice number</xs:documentation>
                        </xs:annotation>
                    </xs:element>
                    <xs:element name="customer" type="CustomerType"/>
                </xs:sequence>
            </xs:complexType>
            <xs:complexType name="CustomerType">
                <xs:sequence>
                    <xs:element name="name" type="string-20"/>
                </xs:sequence>
            </xs:complexType>
        </xs:schema>"#;

    fn render_invoice(xml: &str) -> Result<String> {
        let schema = Schema::from_string(INVOICE_XSD).unwrap();
        DocumentRenderer::new().render(xml.as_bytes(), &schema)
    }

    #[test]
    fn test_render_nested_document() {
        let out = render_invoice(
            "<invoice><number>000042</number><customer><name>Bob</name></customer></invoice>",
        )
        .unwrap();

        assert_eq!(
            out,
            "invoice (An invoice)\n\
             \x20\x20number (Invoice number): 000042\n\
             \x20\x20customer\n\
             \x20\x20\x20\x20name: Bob\n"
        );
    }

    #[test]
    fn test_short_pairing_missing_trailing_child() {
        let out = render_invoice("<invoice><number>000042</number></invoice>").unwrap();

        assert!(out.contains("number"));
        assert!(!out.contains("customer"));
    }

    #[test]
    fn test_extra_instance_children_not_visited() {
        let out = render_invoice(
            "<invoice><number>1</number><customer><name>B</name></customer><extra>x</extra></invoice>",
        )
        .unwrap();

        assert!(!out.contains("extra"));
    }

    #[test]
    fn test_attributes_rendered_in_order() {
        let out = render_invoice(
            r#"<invoice><number currency="EUR" paid="yes">7</number></invoice>"#,
        )
        .unwrap();

        assert!(out.contains("number (Invoice number): 7 currency: EUR; paid: yes;"));
    }

    #[test]
    fn test_root_not_found() {
        let err = render_invoice("<receipt/>").unwrap_err();
        assert!(matches!(err, Error::RootNotFound(_)));
    }

    #[test]
    fn test_root_namespace_must_match_target_namespace() {
        let xsd = r#"
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
                       targetNamespace="http://example.com/inv">
                <xs:element name="invoice" type="InvoiceType"/>
                <xs:complexType name="InvoiceType">
                    <xs:sequence>
                        <xs:element name="number" type="xs:int"/>
                    </xs:sequence>
                </xs:complexType>
            </xs:schema>"#;
        let schema = Schema::from_string(xsd).unwrap();
        let renderer = DocumentRenderer::new();

        let ok = renderer.render(
            br#"<invoice xmlns="http://example.com/inv"><number>1</number></invoice>"#,
            &schema,
        );
        assert!(ok.is_ok());

        let err = renderer.render(b"<invoice><number>1</number></invoice>", &schema);
        assert!(matches!(err, Err(Error::RootNotFound(_))));
    }

    #[test]
    fn test_type_not_found() {
        let xsd = r#"
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                <xs:element name="invoice" type="MissingType"/>
            </xs:schema>"#;
        let schema = Schema::from_string(xsd).unwrap();

        let err = DocumentRenderer::new().render(b"<invoice/>", &schema);
        assert!(matches!(err, Err(Error::TypeNotFound(_))));
    }

    #[test]
    fn test_generator_container_root_renders() {
        let schema = Schema::from_string(INVOICE_XSD).unwrap();
        let out = DocumentRenderer::new()
            .render(
                b"<data><InvoiceType><number>000042</number></InvoiceType></data>",
                &schema,
            )
            .unwrap();

        assert!(out.starts_with("data\n"));
        assert!(out.contains("  InvoiceType\n"));
        assert!(out.contains("    number (Invoice number): 000042\n"));
    }

    #[test]
    fn test_cyclic_type_reference_fails_fast() {
        let xsd = r#"
            <xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
                <xs:element name="node" type="NodeType"/>
                <xs:complexType name="NodeType">
                    <xs:sequence>
                        <xs:element name="child" type="NodeType"/>
                    </xs:sequence>
                </xs:complexType>
            </xs:schema>"#;
        let schema = Schema::from_string(xsd).unwrap();

        let err = DocumentRenderer::new().render(
            b"<node><child><child/></child></node>",
            &schema,
        );
        assert!(matches!(err, Err(Error::TypeResolution(_))));
    }

    #[test]
    fn test_depth_limit_enforced() {
        // Deep but acyclic chain of inline types, driven by a strict depth limit
        let mut xsd = String::from(
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"><xs:element name="l0">"#,
        );
        let levels = 30;
        for i in 1..=levels {
            xsd.push_str(&format!(
                r#"<xs:complexType><xs:sequence><xs:element name="l{}">"#,
                i
            ));
        }
        xsd.push_str(r#"<xs:complexType><xs:sequence/></xs:complexType>"#);
        for _ in 1..=levels {
            xsd.push_str("</xs:element></xs:sequence></xs:complexType>");
        }
        xsd.push_str("</xs:element></xs:schema>");
        let schema = Schema::from_string(&xsd).unwrap();

        let mut instance = String::new();
        for i in 0..=levels {
            instance.push_str(&format!("<l{}>", i));
        }
        for i in (0..=levels).rev() {
            instance.push_str(&format!("</l{}>", i));
        }

        let err = DocumentRenderer::new()
            .with_limits(Limits::strict())
            .render(instance.as_bytes(), &schema);
        assert!(matches!(err, Err(Error::LimitExceeded(_))));
    }
}
