//! Type and identifier normalization.
//!
//! Vendor definitions spell types the way the Apps Script runtime reports
//! them (`Integer[]`, `Peopleapi_v1.Peopleapi.V1.Schema.Person`). These
//! functions rewrite them into TypeScript vocabulary.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::ConvertError;
use crate::registry::Registry;

static DASH_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)-([A-Za-z0-9_])([A-Za-z0-9_]+)").expect("dash pattern is valid")
});

/// Map a vendor primitive to its TypeScript spelling. Exact and case-sensitive.
pub fn primitive(token: &str) -> Option<&'static str> {
    let ty = match token {
        "Integer" => "number",
        "Integer[]" => "number[]",
        "Number" => "number",
        "String" => "string",
        "String[]" => "string[]",
        "String[][]" => "string[][]",
        "Byte[]" => "string",
        "Boolean" => "boolean",
        "Boolean[]" => "boolean[]",
        "Object" => "object",
        "Object[]" => "object[]",
        "Object[][]" => "object[][]",
        "Blob" => "Blob",
        "void" => "void",
        _ => return None,
    };
    Some(ty)
}

/// Convert the first `word-word` pair of a dash-case name to camelCase.
///
/// Only the first occurrence is rewritten: `foo-bar-baz` becomes
/// `fooBar-baz`. Callers decide what to do with any dash that remains.
pub fn camel_case(name: &str) -> String {
    DASH_SEGMENT
        .replacen(name, 1, |caps: &Captures<'_>| {
            format!("{}{}{}", &caps[1], caps[2].to_uppercase(), &caps[3])
        })
        .into_owned()
}

/// Name usable as an interface property key or method name.
pub fn property_key(name: &str) -> String {
    let name = camel_case(name);
    if name.contains('-') {
        format!("\"{name}\"")
    } else {
        name
    }
}

/// Name usable as a method parameter. Parameters cannot be quoted, so any
/// dash left after camel-casing becomes an underscore.
pub fn parameter_name(name: &str) -> String {
    camel_case(name).replace('-', "_")
}

/// Rewrites vendor type tokens using an injected registry.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'r> {
    registry: &'r Registry,
}

#[derive(Debug)]
struct Candidate {
    matched: usize,
    resolved: String,
}

impl<'r> Normalizer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Normalize a raw type token.
    ///
    /// Precedence: primitives, then irregular overrides, then registry
    /// package prefixes. Anything else is a [`ConvertError::UnresolvedType`].
    pub fn normalize_type(&self, token: &str) -> Result<String, ConvertError> {
        if let Some(ty) = primitive(token) {
            return Ok(ty.to_string());
        }
        if let Some(ty) = self.registry.irregular(token) {
            return Ok(ty.to_string());
        }
        match self.resolve_package(token)? {
            Some(resolved) => Ok(resolved),
            None => Err(ConvertError::UnresolvedType {
                token: token.to_string(),
            }),
        }
    }

    /// Resolve a token against registry package prefixes.
    ///
    /// Every entry is tested and the longest matched prefix wins. Equal
    /// matches that disagree on the result are reported as ambiguous.
    fn resolve_package(&self, token: &str) -> Result<Option<String>, ConvertError> {
        let candidates: Vec<Candidate> = self.candidates(token).collect();
        let Some(longest) = candidates.iter().map(|c| c.matched).max() else {
            return Ok(None);
        };

        let mut best = candidates.into_iter().filter(|c| c.matched == longest);
        let Some(first) = best.next() else {
            return Ok(None);
        };
        if let Some(other) = best.find(|c| c.resolved != first.resolved) {
            return Err(ConvertError::RegistryAmbiguity {
                token: token.to_string(),
                first: first.resolved,
                second: other.resolved,
            });
        }

        Ok(Some(first.resolved))
    }

    fn candidates<'a>(&'a self, token: &'a str) -> impl Iterator<Item = Candidate> + 'a {
        self.registry.definitions().iter().flat_map(move |def| {
            let mut found = Vec::new();

            if def.inner_name.as_deref() == Some(token) {
                found.push(Candidate {
                    matched: token.len(),
                    resolved: def.id.clone(),
                });
            }

            if let Some(prefix) = def.qualified_prefix() {
                if let Some(rest) = token.strip_prefix(prefix.as_str()) {
                    let resolved = if rest.is_empty() {
                        def.id.clone()
                    } else {
                        format!("{}.{rest}", def.id)
                    };
                    found.push(Candidate {
                        matched: prefix.len(),
                        resolved,
                    });
                }
            }

            if let Some(abbrev) = def.abbreviated_name.as_deref() {
                if let Some(rest) = token.strip_prefix(abbrev) {
                    if !rest.is_empty() {
                        found.push(Candidate {
                            matched: abbrev.len(),
                            resolved: rest.to_string(),
                        });
                    }
                }
            }

            found
        })
    }
}
