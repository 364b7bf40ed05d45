//! Declared type classification
//!
//! Maps a declared type string to a presentation kind. Classification
//! proper is keyword-based; the project-specific `-N` length suffix
//! (`string-20`, `digits-6`) is layered on afterwards as a separate
//! extraction step, because it is a local naming convention and not
//! part of any schema standard. Enumerations, inline or named,
//! override both.

use crate::names::local_name;
use crate::schema::model::{ElementDef, Schema};
use indexmap::IndexMap;
use serde::Serialize;

/// The closed classification a field is resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    /// Free text
    Text,
    /// Decimal digits only
    Digits,
    /// Calendar date
    Date,
    /// Date with time of day
    DateTime,
    /// Time of day
    Time,
    /// True/false
    Boolean,
    /// One of a fixed set of values
    Enum,
}

/// Type names classified as text-like
pub const TEXT_KEYWORDS: &[&str] = &["string", "normalizedString", "token"];

/// Type names classified as numeric-like
///
/// `digits` is this project's own alias, required by the `digits-N`
/// naming convention; the rest are the schema built-ins and their
/// signedness variants.
pub const NUMERIC_KEYWORDS: &[&str] = &[
    "digits",
    "decimal",
    "float",
    "double",
    "integer",
    "long",
    "int",
    "short",
    "byte",
    "nonNegativeInteger",
    "nonPositiveInteger",
    "negativeInteger",
    "positiveInteger",
    "unsignedLong",
    "unsignedInt",
    "unsignedShort",
    "unsignedByte",
];

/// Strip a trailing `-N` suffix, returning the base keyword
fn strip_length_suffix(local: &str) -> &str {
    match local.rsplit_once('-') {
        Some((base, digits))
            if !base.is_empty() && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => local,
    }
}

/// Classify a declared type string into a presentation kind
///
/// Prefixes are stripped first; exact keyword matches take precedence,
/// then keyword-set membership. Anything unmatched defaults to Text.
pub fn classify(type_ref: &str) -> Kind {
    let local = local_name(type_ref);
    match local {
        "date" => Kind::Date,
        "dateTime" => Kind::DateTime,
        "time" => Kind::Time,
        "boolean" => Kind::Boolean,
        _ => {
            let base = strip_length_suffix(local);
            if TEXT_KEYWORDS.contains(&base) {
                Kind::Text
            } else if NUMERIC_KEYWORDS.contains(&base) {
                Kind::Digits
            } else {
                Kind::Text
            }
        }
    }
}

/// Extract the `-N` length encoded in a declared type name, if any
///
/// This is a distinct post-classification pass: `string-20` encodes a
/// maximum length of 20, `digits-6` an exact length of 6.
pub fn length_suffix(type_ref: &str) -> Option<usize> {
    let local = local_name(type_ref);
    let (base, digits) = local.rsplit_once('-')?;
    if base.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A declared type resolved to a kind plus its extracted constraints
#[derive(Debug, Clone)]
pub struct ResolvedType {
    /// Presentation kind
    pub kind: Kind,
    /// Minimum length constraint
    pub min_length: Option<usize>,
    /// Maximum length constraint
    pub max_length: Option<usize>,
    /// Pattern constraint (regular expression)
    pub pattern: Option<String>,
    /// Enumeration options (Enum kind only)
    pub options: IndexMap<String, String>,
}

impl Default for ResolvedType {
    fn default() -> Self {
        Self {
            kind: Kind::Text,
            min_length: None,
            max_length: None,
            pattern: None,
            options: IndexMap::new(),
        }
    }
}

impl ResolvedType {
    fn enumeration(options: IndexMap<String, String>) -> Self {
        Self {
            kind: Kind::Enum,
            options,
            ..Default::default()
        }
    }
}

/// Resolves element declarations against a schema's named types
#[derive(Debug)]
pub struct TypeResolver<'a> {
    schema: &'a Schema,
}

impl<'a> TypeResolver<'a> {
    /// Create a resolver over the given schema
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Resolve an element declaration to a kind and constraints
    ///
    /// An inline enumeration overrides everything; a declared type
    /// naming a known enumeration comes next; otherwise the declared
    /// type string is classified and the `-N` convention applied. An
    /// element with no declared type at all (a structural node) is
    /// presented as plain text.
    pub fn resolve(&self, def: &ElementDef) -> ResolvedType {
        if let Some(en) = &def.inline_enum {
            return ResolvedType::enumeration(en.options.clone());
        }

        let Some(type_ref) = &def.type_ref else {
            return ResolvedType::default();
        };

        if let Some(en) = self.schema.enumerations.get(local_name(type_ref)) {
            return ResolvedType::enumeration(en.options.clone());
        }

        let kind = classify(type_ref);
        let mut resolved = ResolvedType {
            kind,
            ..Default::default()
        };

        if let Some(n) = length_suffix(type_ref) {
            match kind {
                Kind::Text => resolved.max_length = Some(n),
                Kind::Digits => {
                    resolved.min_length = Some(n);
                    resolved.max_length = Some(n);
                    resolved.pattern = Some(format!(r"\d{{{}}}", n));
                }
                _ => {}
            }
        }

        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::model::EnumerationDef;

    fn element(name: &str, type_ref: &str) -> ElementDef {
        ElementDef {
            name: name.to_string(),
            type_ref: Some(type_ref.to_string()),
            inline_complex: None,
            inline_enum: None,
            documentation: None,
        }
    }

    #[test]
    fn test_exact_keyword_matches() {
        assert_eq!(classify("xs:date"), Kind::Date);
        assert_eq!(classify("dateTime"), Kind::DateTime);
        assert_eq!(classify("xs:time"), Kind::Time);
        assert_eq!(classify("boolean"), Kind::Boolean);
    }

    #[test]
    fn test_text_and_numeric_classification() {
        assert_eq!(classify("xs:string"), Kind::Text);
        assert_eq!(classify("normalizedString"), Kind::Text);
        assert_eq!(classify("token"), Kind::Text);

        assert_eq!(classify("xs:int"), Kind::Digits);
        assert_eq!(classify("unsignedLong"), Kind::Digits);
        assert_eq!(classify("nonNegativeInteger"), Kind::Digits);
        assert_eq!(classify("digits"), Kind::Digits);
    }

    #[test]
    fn test_unmatched_defaults_to_text() {
        assert_eq!(classify("PersonType"), Kind::Text);
        assert_eq!(classify("anyURI"), Kind::Text);
        assert_eq!(classify(""), Kind::Text);
    }

    #[test]
    fn test_suffixed_names_classify_by_base_keyword() {
        assert_eq!(classify("string-20"), Kind::Text);
        assert_eq!(classify("digits-6"), Kind::Digits);
        assert_eq!(classify("xs:string-5"), Kind::Text);
    }

    #[test]
    fn test_length_suffix_extraction() {
        assert_eq!(length_suffix("string-20"), Some(20));
        assert_eq!(length_suffix("digits-6"), Some(6));
        assert_eq!(length_suffix("xs:string-5"), Some(5));

        assert_eq!(length_suffix("string"), None);
        assert_eq!(length_suffix("string-"), None);
        assert_eq!(length_suffix("-20"), None);
        assert_eq!(length_suffix("my-element"), None);
    }

    #[test]
    fn test_resolve_text_with_max_length() {
        let schema = Schema::default();
        let resolver = TypeResolver::new(&schema);

        let resolved = resolver.resolve(&element("name", "string-5"));
        assert_eq!(resolved.kind, Kind::Text);
        assert_eq!(resolved.max_length, Some(5));
        assert_eq!(resolved.min_length, None);
        assert!(resolved.pattern.is_none());
    }

    #[test]
    fn test_resolve_digits_with_exact_length() {
        let schema = Schema::default();
        let resolver = TypeResolver::new(&schema);

        let resolved = resolver.resolve(&element("age", "digits-3"));
        assert_eq!(resolved.kind, Kind::Digits);
        assert_eq!(resolved.min_length, Some(3));
        assert_eq!(resolved.max_length, Some(3));
        assert_eq!(resolved.pattern.as_deref(), Some(r"\d{3}"));
    }

    #[test]
    fn test_resolve_no_declared_type() {
        let schema = Schema::default();
        let resolver = TypeResolver::new(&schema);

        let def = ElementDef {
            name: "wrapper".to_string(),
            type_ref: None,
            inline_complex: None,
            inline_enum: None,
            documentation: None,
        };
        assert_eq!(resolver.resolve(&def).kind, Kind::Text);
    }

    #[test]
    fn test_inline_enum_overrides_declared_type() {
        let schema = Schema::default();
        let resolver = TypeResolver::new(&schema);

        let mut options = IndexMap::new();
        options.insert("yes".to_string(), "Yes".to_string());
        let def = ElementDef {
            name: "answer".to_string(),
            type_ref: Some("xs:string".to_string()),
            inline_complex: None,
            inline_enum: Some(EnumerationDef {
                name: "answer".to_string(),
                options: options.clone(),
            }),
            documentation: None,
        };

        let resolved = resolver.resolve(&def);
        assert_eq!(resolved.kind, Kind::Enum);
        assert_eq!(resolved.options, options);
    }

    #[test]
    fn test_named_enumeration_reference_resolves_to_enum() {
        let mut schema = Schema::default();
        let mut options = IndexMap::new();
        options.insert("RED".to_string(), "Red".to_string());
        schema.enumerations.insert(
            "ColorType".to_string(),
            EnumerationDef {
                name: "ColorType".to_string(),
                options,
            },
        );
        let resolver = TypeResolver::new(&schema);

        let resolved = resolver.resolve(&element("color", "tns:ColorType"));
        assert_eq!(resolved.kind, Kind::Enum);
        assert_eq!(resolved.options["RED"], "Red");
    }
}
