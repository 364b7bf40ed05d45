//! Document generation
//!
//! Serializes submitted values into a schema-shaped document. The
//! emission order follows the field model's declaration order, which
//! is the same order the renderer later relies on for positional
//! pairing.

use crate::error::{Error, Result};
use crate::fields::{Field, FieldGroups, FieldValue, SubmittedValues};
use crate::names::is_valid_ncname;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Default name of the root container element
pub const DEFAULT_ROOT_NAME: &str = "data";

/// Serializes submitted values into schema-shaped document bytes
#[derive(Debug)]
pub struct DocumentGenerator {
    root_name: String,
}

impl Default for DocumentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentGenerator {
    /// Create a generator with the default root container name
    pub fn new() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }

    /// Set the root container name
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Generate document bytes from the field model and submitted
    /// values
    ///
    /// A group is omitted entirely when every one of its fields has an
    /// empty value and an empty annotation; within an emitted group,
    /// only fields with a non-empty value or annotation appear. An
    /// all-empty submission still produces a well-formed document with
    /// an empty root.
    pub fn generate(&self, groups: &FieldGroups, values: &SubmittedValues) -> Result<Vec<u8>> {
        check_element_name(&self.root_name)?;

        // Pair each group's fields with their submitted values, in
        // field model order, keeping only entries with content
        let mut populated: Vec<(&str, Vec<(&Field, &FieldValue)>)> = Vec::new();
        for group in groups.iter() {
            let Some(group_values) = values.get(&group.name) else {
                continue;
            };
            let entries: Vec<(&Field, &FieldValue)> = group
                .fields
                .iter()
                .filter_map(|field| {
                    group_values
                        .get(&field.name)
                        .filter(|value| !value.is_empty())
                        .map(|value| (field, value))
                })
                .collect();
            if !entries.is_empty() {
                populated.push((group.name.as_str(), entries));
            }
        }

        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_err)?;

        if populated.is_empty() {
            writer
                .write_event(Event::Empty(BytesStart::new(self.root_name.as_str())))
                .map_err(write_err)?;
            return Ok(writer.into_inner());
        }

        writer
            .write_event(Event::Start(BytesStart::new(self.root_name.as_str())))
            .map_err(write_err)?;

        for (group_name, entries) in populated {
            check_element_name(group_name)?;
            writer
                .write_event(Event::Start(BytesStart::new(group_name)))
                .map_err(write_err)?;

            for (field, value) in entries {
                check_element_name(&field.name)?;
                let mut start = BytesStart::new(field.name.as_str());
                if !value.annotation.is_empty() {
                    start.push_attribute(("description", value.annotation.as_str()));
                }
                writer.write_event(Event::Start(start)).map_err(write_err)?;
                if !value.value.is_empty() {
                    writer
                        .write_event(Event::Text(BytesText::new(&value.value)))
                        .map_err(write_err)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(field.name.as_str())))
                    .map_err(write_err)?;
            }

            writer
                .write_event(Event::End(BytesEnd::new(group_name)))
                .map_err(write_err)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new(self.root_name.as_str())))
            .map_err(write_err)?;

        Ok(writer.into_inner())
    }
}

fn check_element_name(name: &str) -> Result<()> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(Error::Xml(format!(
            "'{}' is not a valid element name",
            name
        )))
    }
}

fn write_err(e: impl std::fmt::Display) -> Error {
    Error::Xml(format!("failed to write document: {}", e))
}
