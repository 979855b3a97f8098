//! Declaration tree types.

use std::fmt;

use crate::error::ConvertError;

/// A dotted, fully-qualified name such as `GoogleAppsScript.People.Schema.Person`.
///
/// Always has at least one segment and no empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Parse a dotted name.
    pub fn parse(name: &str) -> Result<Self, ConvertError> {
        let segments: Vec<String> = name.split('.').map(String::from).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ConvertError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// Name nested one level below `self`.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// Name nested below `self` by every segment of `relative`.
    pub fn join(&self, relative: &QualifiedName) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        Self { segments }
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The last segment.
    pub fn local_name(&self) -> &str {
        // Construction guarantees at least one segment.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// An interface declaration: `export interface Name { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    pub name: QualifiedName,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub comment: Option<String>,
}

impl Interface {
    pub fn local_name(&self) -> &str {
        self.name.local_name()
    }
}

/// An optional property: `name?: Type;`
///
/// Also used for method parameters, rendered as `name: Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub comment: Option<String>,
}

/// A method signature: `name(params): ReturnType;`
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    pub params: Vec<Field>,
    pub comment: Option<String>,
}
