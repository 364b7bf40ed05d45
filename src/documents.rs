//! XML document handling
//!
//! This module parses instance and schema markup into an ordered
//! element tree. Child order and attribute order are both preserved:
//! child order drives positional pairing against a schema sequence,
//! and attribute order drives the annotated rendering.

use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::{NamespaceContext, QName};
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML Element in the document tree
#[derive(Debug, Clone)]
pub struct Element {
    /// Element qualified name, with the namespace resolved from the
    /// declarations in scope at parse time
    pub qname: QName,
    /// Element attributes in document order, keyed by their as-written name
    pub attributes: IndexMap<String, String>,
    /// Text content; the first non-empty text node wins, trimmed
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element
    pub fn new(qname: QName) -> Self {
        Self {
            qname,
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        &self.qname.local_name
    }

    /// Get the namespace of the element
    pub fn namespace(&self) -> Option<&str> {
        self.qname.namespace.as_deref()
    }

    /// Get an attribute value by name
    ///
    /// Matches the as-written attribute name first, then falls back to
    /// matching the local part of prefixed attribute names.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.attributes.get(name) {
            return Some(value);
        }
        for (key, value) in &self.attributes {
            if key.rsplit(':').next() == Some(name) {
                return Some(value);
            }
        }
        None
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Whether this element has no child elements
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Find the first child element with the given local name
    pub fn find_child(&self, local_name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.local_name() == local_name)
    }

    /// Iterate child elements with the given local name
    pub fn children_named<'a>(&'a self, local_name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children
            .iter()
            .filter(move |e| e.local_name() == local_name)
    }
}

/// XML Document representation
#[derive(Debug)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse an XML document from bytes with default limits
    pub fn parse(xml: &[u8]) -> Result<Self> {
        Self::parse_with_limits(xml, &Limits::default())
    }

    /// Parse an XML document from bytes, enforcing the given limits
    pub fn parse_with_limits(xml: &[u8], limits: &Limits) -> Result<Self> {
        limits.check_document_size(xml.len())?;

        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut context_stack: Vec<NamespaceContext> = vec![NamespaceContext::new()];
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let parent_ctx = context_stack.last().cloned().unwrap_or_default();
                    let (element, ctx) = Self::parse_element(&e, &parent_ctx)?;
                    element_stack.push(element);
                    context_stack.push(ctx);
                    limits.check_depth(element_stack.len())?;
                }
                Ok(Event::End(_)) => {
                    context_stack.pop();
                    if let Some(current) = element_stack.pop() {
                        if let Some(parent) = element_stack.last_mut() {
                            parent.add_child(current);
                        } else {
                            // This is the root element
                            doc.root = Some(current);
                        }
                    }
                }
                Ok(Event::Empty(e)) => {
                    let parent_ctx = context_stack.last().cloned().unwrap_or_default();
                    let (element, _ctx) = Self::parse_element(&e, &parent_ctx)?;
                    if let Some(parent) = element_stack.last_mut() {
                        parent.add_child(element);
                    } else {
                        // Empty root element
                        doc.root = Some(element);
                    }
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("failed to unescape text: {}", e)))?;
                        let trimmed = text.trim();
                        if current.text.is_none() && !trimmed.is_empty() {
                            current.text = Some(trimmed.to_string());
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // Ignore other events (comments, processing instructions, etc.)
            }
            buf.clear();
        }

        Ok(doc)
    }

    /// Parse element from a BytesStart event, resolving its namespace
    /// against the declarations in scope
    fn parse_element(
        start: &BytesStart,
        parent_ctx: &NamespaceContext,
    ) -> Result<(Element, NamespaceContext)> {
        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Xml(format!("invalid element name: {}", e)))?
            .to_string();

        let mut ctx = parent_ctx.clone();
        let mut attributes = IndexMap::new();

        for attr_result in start.attributes() {
            let attr =
                attr_result.map_err(|e| Error::Xml(format!("failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("invalid attribute name: {}", e)))?;

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("failed to unescape attribute value: {}", e)))?
                .to_string();

            // Namespace declarations update the context and are not
            // kept as regular attributes
            if attr_name == "xmlns" {
                ctx.set_default_namespace(&attr_value);
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                ctx.add_prefix(prefix, &attr_value);
            } else {
                attributes.insert(attr_name.to_string(), attr_value);
            }
        }

        // An undeclared prefix degrades to a local-only name rather
        // than failing the whole parse
        let qname = ctx
            .resolve(&name)
            .unwrap_or_else(|_| QName::local(crate::names::local_name(&name)));

        let mut element = Element::new(qname);
        element.attributes = attributes;

        Ok((element, ctx))
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
