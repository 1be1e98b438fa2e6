//! Native type expressions to property descriptions
//!
//! Recognised forms: `T`, `?T`, `A|B|null`. `true` and `false` collapse to
//! `bool`, collection types only set the collection flag, and a missing
//! expression means `mixed`.

use apigen_core::Property;

use crate::catalog::{normalize_identifier, TypeCatalog};

const MIXED: &str = "mixed";

/// Build a property from its native type expression
pub fn property_from_expression(
    name: impl Into<String>,
    expression: Option<&str>,
    catalog: &TypeCatalog,
) -> Property {
    let mut property = Property::new(name).nullable(false);

    let expression = expression.map(str::trim).filter(|e| !e.is_empty());
    let Some(mut expression) = expression else {
        property.push_type(MIXED);
        return property.nullable(true);
    };

    if let Some(rest) = expression.strip_prefix('?') {
        property.nullable = true;
        expression = rest;
    }

    for candidate in expression.split('|') {
        let candidate = candidate.trim().trim_matches(|c: char| c == '(' || c == ')');
        let candidate = normalize_identifier(candidate);
        match candidate {
            "" => {}
            "true" | "false" => property.push_type("bool"),
            "null" => property.nullable = true,
            MIXED => {
                property.nullable = true;
                property.push_type(MIXED);
            }
            other if catalog.is_collection(other) => property.collection = true,
            other => property.push_type(other),
        }
    }

    property.is_sum_type = property.types.len() > 1;
    property
}
