//! TypeScript declaration generator for Google Apps Script advanced services.
//!
//! The Apps Script editor describes each advanced service as a JSON tree of
//! key-numbered records. This crate decodes those records, normalizes their
//! type names and identifiers, rebuilds the namespace hierarchy implied by
//! the dotted names, and renders a `.d.ts` file.

mod ast;
mod convert;
mod error;
mod hierarchy;
mod normalize;
mod record;
mod registry;
mod render;

pub mod batch;
pub mod config;
pub mod diagnostic;
pub mod download;

pub use ast::{Field, Interface, Method, QualifiedName};
pub use convert::{ConvertOptions, Converter, Declarations, DEFAULT_ROOT_NAMESPACE};
pub use error::ConvertError;
pub use hierarchy::{Insertion, Namespace};
pub use normalize::{camel_case, parameter_name, primitive, property_key, Normalizer};
pub use record::{DefinitionFile, FieldRecord, MethodRecord, ObjectRecord};
pub use registry::{Definition, Registry};
pub use render::{render, wrap_comment, RenderOptions};
