//! XML name validation and utilities
//!
//! Declared schema names and generated element names must be NCNames;
//! this module provides that check plus prefix splitting for
//! namespace-qualified type references.

use once_cell::sync::Lazy;
use regex::Regex;

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\-\.0-9]*$")
        .unwrap()
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Split a possibly prefixed name into prefix and local name
pub fn split_qname(qname: &str) -> (Option<&str>, &str) {
    if let Some((prefix, local)) = qname.split_once(':') {
        (Some(prefix), local)
    } else {
        (None, qname)
    }
}

/// The local part of a possibly prefixed name (`xs:string` -> `string`)
pub fn local_name(qname: &str) -> &str {
    split_qname(qname).1
}
