//! Definition file to declaration text pipeline.

use tracing::debug;

use crate::ast::{Field, Interface, Method, QualifiedName};
use crate::error::ConvertError;
use crate::hierarchy::Namespace;
use crate::normalize::{parameter_name, property_key, Normalizer};
use crate::record::{DefinitionFile, FieldRecord, MethodRecord, ObjectRecord};
use crate::registry::Registry;
use crate::render::{render, RenderOptions};

/// Namespace that wraps every generated declaration by default.
pub const DEFAULT_ROOT_NAMESPACE: &str = "GoogleAppsScript";

/// Options for conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Name of the top-level `declare namespace`.
    pub root_namespace: String,
    pub render: RenderOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_string(),
            render: RenderOptions::default(),
        }
    }
}

/// A built declaration tree and the qualified name of its main interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarations {
    pub root: Namespace,
    pub main: QualifiedName,
}

impl Declarations {
    pub fn render(&self, options: &RenderOptions) -> String {
        render(&self.root, &self.main, options)
    }
}

/// Converts decoded definition files using one registry.
#[derive(Debug, Clone)]
pub struct Converter<'r> {
    normalizer: Normalizer<'r>,
    root: QualifiedName,
    options: ConvertOptions,
}

impl<'r> Converter<'r> {
    pub fn new(registry: &'r Registry, options: ConvertOptions) -> Result<Self, ConvertError> {
        let root = QualifiedName::parse(&options.root_namespace)?;
        Ok(Self {
            normalizer: Normalizer::new(registry),
            root,
            options,
        })
    }

    /// Parse, build and render a definition file in one step.
    pub fn convert_str(&self, source: &str) -> Result<String, ConvertError> {
        let file = DefinitionFile::from_json(source)?;
        let declarations = self.build(&file)?;
        Ok(declarations.render(&self.options.render))
    }

    /// Build the namespace tree for a decoded file.
    ///
    /// Every record is normalized before anything is inserted, so a single
    /// bad type aborts the whole file.
    pub fn build(&self, file: &DefinitionFile) -> Result<Declarations, ConvertError> {
        let main = self.interface(&file.main)?;
        let classes = file
            .classes
            .iter()
            .map(|record| self.interface(record))
            .collect::<Result<Vec<_>, _>>()?;

        let main_name = main.name.clone();
        let mut root = Namespace::new(self.root.clone());
        // Every name sits below the root, so nothing is dropped here.
        for interface in std::iter::once(main).chain(classes) {
            root.insert(interface);
        }
        debug!(main = %main_name, interfaces = root.interface_count(), "built declaration tree");

        Ok(Declarations {
            root,
            main: main_name,
        })
    }

    /// Build an interface from an object record, normalizing every name and type.
    pub fn interface(&self, record: &ObjectRecord) -> Result<Interface, ConvertError> {
        let relative = QualifiedName::parse(&self.normalizer.normalize_type(&record.name)?)?;
        let fields = record
            .fields
            .iter()
            .map(|field| self.field(field))
            .collect::<Result<Vec<_>, _>>()?;
        let methods = record
            .methods
            .iter()
            .map(|method| self.method(method))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Interface {
            name: self.root.join(&relative),
            fields,
            methods,
            comment: record.comment.clone(),
        })
    }

    fn field(&self, record: &FieldRecord) -> Result<Field, ConvertError> {
        Ok(Field {
            name: property_key(&record.name),
            ty: self.normalizer.normalize_type(&record.type_name)?,
            comment: record.comment.clone(),
        })
    }

    fn method(&self, record: &MethodRecord) -> Result<Method, ConvertError> {
        let params = record
            .args
            .iter()
            .map(|arg| {
                Ok(Field {
                    name: parameter_name(&arg.name),
                    ty: self.normalizer.normalize_type(&arg.type_name)?,
                    comment: arg.comment.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConvertError>>()?;

        Ok(Method {
            name: property_key(&record.name),
            return_type: self.normalizer.normalize_type(&record.return_type)?,
            params,
            comment: record.comment.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(json: &str) -> Result<String, ConvertError> {
        let registry = Registry::builtin();
        Converter::new(&registry, ConvertOptions::default())?.convert_str(json)
    }

    #[test]
    fn main_record_becomes_service_interface() {
        let registry = Registry::builtin();
        let converter = Converter::new(&registry, ConvertOptions::default()).unwrap();
        let record: ObjectRecord = serde_json::from_str(
            r#"{"1": "Peopleapi_v1", "2": [{"1": "ContactGroups", "2": "Peopleapi_v1.Peopleapi.V1.Collection.ContactGroupsCollection", "3": 1}]}"#,
        )
        .unwrap();
        let interface = converter.interface(&record).unwrap();
        assert_eq!(interface.local_name(), "People");
        assert_eq!(interface.name.to_string(), "GoogleAppsScript.People");
        assert_eq!(
            interface.fields[0].ty,
            "People.Collection.ContactGroupsCollection"
        );
    }

    #[test]
    fn renders_field_and_commented_method() {
        let out = convert(
            r#"{
                "1": {
                    "1": "Tasks_v1",
                    "2": [{"1": "Tasklists", "2": "Tasks_v1.Tasks.V1.Collection.TasklistsCollection"}],
                    "3": [{"1": "newTask", "2": "Tasks_v1.Tasks.V1.Schema.Task", "6": "Create a new instance of Task"}]
                },
                "2": []
            }"#,
        )
        .unwrap();

        assert_eq!(
            out.matches("Tasklists?: Tasks.Collection.TasklistsCollection;").count(),
            1
        );
        assert!(out.contains(
            "    // Create a new instance of Task\n    newTask(): Tasks.Schema.Task;\n"
        ));
        assert!(out.ends_with("declare const Tasks: GoogleAppsScript.Tasks;\n"));
    }

    #[test]
    fn dashed_names_are_sanitized() {
        let out = convert(
            r#"{
                "1": {
                    "1": "Groupssettings_v1",
                    "2": [
                        {"1": "group-id", "2": "String"},
                        {"1": "who-can-post-message", "2": "String"}
                    ],
                    "3": [{"1": "get", "2": "void", "3": [{"1": "group-unique-id", "2": "String"}]}]
                }
            }"#,
        )
        .unwrap();
        assert!(out.contains("groupId?: string;"));
        assert!(out.contains("\"whoCan-post-message\"?: string;"));
        assert!(out.contains("get(groupUnique_id: string): void;"));
    }

    #[test]
    fn unresolved_type_aborts_file() {
        let err = convert(
            r#"{"1": {"1": "Tasks_v1", "2": [{"1": "x", "2": "Mystery.Type"}]}, "2": []}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::UnresolvedType { ref token } if token == "Mystery.Type"));
    }

    #[test]
    fn unresolved_class_type_aborts_file() {
        let err = convert(
            r#"{"1": {"1": "Tasks_v1"}, "2": [{"1": "Tasks_v1.Tasks.V1.Schema.Task", "3": [{"1": "f", "2": "Nope"}]}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), "UnresolvedType");
    }

    #[test]
    fn every_record_is_attached_below_root() {
        let registry = Registry::builtin();
        let converter = Converter::new(&registry, ConvertOptions::default()).unwrap();
        let file = DefinitionFile::from_json(
            r#"{"1": {"1": "Tasks_v1"}, "2": [{"1": "Tasks_v1"}, {"1": "Tasks.V1.Schema.Task"}]}"#,
        )
        .unwrap();
        let decls = converter.build(&file).unwrap();
        assert_eq!(decls.root.interface_count(), 3);
        assert_eq!(decls.root.interfaces.len(), 2);
        assert_eq!(
            decls.root.namespace(&["Schema"]).unwrap().interfaces[0].local_name(),
            "Task"
        );
    }

    #[test]
    fn custom_root_namespace() {
        let registry = Registry::builtin();
        let options = ConvertOptions {
            root_namespace: "Gas".to_string(),
            ..ConvertOptions::default()
        };
        let out = Converter::new(&registry, options)
            .unwrap()
            .convert_str(r#"{"1": {"1": "Tasks_v1"}}"#)
            .unwrap();
        assert!(out.starts_with("declare namespace Gas {\n"));
        assert!(out.ends_with("declare const Tasks: Gas.Tasks;\n"));
    }

    #[test]
    fn invalid_root_namespace_is_rejected() {
        let registry = Registry::builtin();
        let options = ConvertOptions {
            root_namespace: "Bad..Root".to_string(),
            ..ConvertOptions::default()
        };
        assert!(matches!(
            Converter::new(&registry, options),
            Err(ConvertError::InvalidName { .. })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = convert("{not json").unwrap_err();
        assert_eq!(err.kind(), "MalformedInput");
    }
}
