//! Constraint validation
//!
//! Checks submitted values against field descriptors, returning
//! human-readable error messages. Validation findings are never fatal:
//! they accumulate into an ordered list and the caller decides how to
//! present them. Pure function, no I/O.

use crate::fields::{FieldGroups, SubmittedValues};
use crate::schema::types::Kind;

/// Validate submitted values against the field model
///
/// Walks groups and fields in declaration order, so the returned
/// errors are deterministically ordered. A field submitted with an
/// empty value is skipped: emptiness is handled by the generator,
/// which omits empty fields and groups entirely.
///
/// A Digits value must consist solely of decimal digits and, when an
/// exact length is configured, be exactly that long. A Text value must
/// not exceed a configured maximum length unless it is purely numeric;
/// numeric values are exempt from the length cap.
pub fn validate(groups: &FieldGroups, values: &SubmittedValues) -> Vec<String> {
    let mut errors = Vec::new();

    for group in groups.iter() {
        let Some(group_values) = values.get(&group.name) else {
            continue;
        };
        for field in &group.fields {
            let Some(submitted) = group_values.get(&field.name) else {
                continue;
            };
            let value = submitted.value.as_str();
            if value.is_empty() {
                continue;
            }

            let numeric = value.chars().all(|c| c.is_ascii_digit());
            match field.kind {
                Kind::Digits => match (field.min_length, field.max_length) {
                    (Some(min), Some(max)) if min == max => {
                        if !numeric || value.chars().count() != min {
                            errors.push(format!(
                                "'{}' must be numeric and exactly {} digits",
                                field.name, min
                            ));
                        }
                    }
                    _ => {
                        if !numeric {
                            errors.push(format!("'{}' must be numeric", field.name));
                        }
                    }
                },
                Kind::Text => {
                    if let Some(max) = field.max_length {
                        if value.chars().count() > max && !numeric {
                            errors.push(format!(
                                "'{}' must not exceed {} characters",
                                field.name, max
                            ));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    errors
}
