//! Typed view of the vendor's key-numbered definition records.
//!
//! The raw JSON uses positional string keys whose meaning depends on the
//! record kind: `"1"` is always the name and `"6"` the comment, while `"2"`
//! and `"3"` hold fields and methods on an object, a type on a field, and a
//! return type and arguments on a method.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A whole definition file: the main object and the secondary classes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DefinitionFile {
    #[serde(rename = "1")]
    pub main: ObjectRecord,
    #[serde(rename = "2", default, deserialize_with = "lenient_list")]
    pub classes: Vec<ObjectRecord>,
}

/// An object (interface) definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectRecord {
    #[serde(rename = "1")]
    pub name: String,
    #[serde(rename = "2", default, deserialize_with = "lenient_list")]
    pub fields: Vec<FieldRecord>,
    #[serde(rename = "3", default, deserialize_with = "lenient_list")]
    pub methods: Vec<MethodRecord>,
    #[serde(rename = "6", default)]
    pub comment: Option<String>,
}

/// A property of an object, or an argument of a method.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldRecord {
    #[serde(rename = "1")]
    pub name: String,
    #[serde(rename = "2")]
    pub type_name: String,
    #[serde(rename = "6", default)]
    pub comment: Option<String>,
}

/// A method of an object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodRecord {
    #[serde(rename = "1")]
    pub name: String,
    #[serde(rename = "2")]
    pub return_type: String,
    #[serde(rename = "3", default, deserialize_with = "lenient_list")]
    pub args: Vec<FieldRecord>,
    #[serde(rename = "6", default)]
    pub comment: Option<String>,
}

impl DefinitionFile {
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

/// Lists may be missing, `null`, or a bare scalar standing in for "none".
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_object_with_members() {
        let json = r#"{
            "1": "Tasks_v1",
            "2": [{"1": "kind", "2": "String", "6": "Type of the resource."}],
            "3": [
                {"1": "newTask", "2": "Tasks_v1.Tasks.V1.Schema.Task", "6": "Create a new Task."},
                {"1": "move", "2": "void", "3": [{"1": "task", "2": "String"}]}
            ],
            "6": "Tasks service."
        }"#;
        let record: ObjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Tasks_v1");
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.fields[0].type_name, "String");
        assert_eq!(record.fields[0].comment.as_deref(), Some("Type of the resource."));
        assert_eq!(record.methods.len(), 2);
        assert!(record.methods[0].args.is_empty());
        assert_eq!(record.methods[1].args[0].name, "task");
        assert_eq!(record.comment.as_deref(), Some("Tasks service."));
    }

    #[test]
    fn missing_null_and_scalar_lists_are_empty() {
        let json = r#"{
            "1": "Peopleapi_v1",
            "2": [{"1": "ContactGroups", "2": "Peopleapi_v1.Peopleapi.V1.Collection.ContactGroupsCollection", "3": 1}],
            "3": null
        }"#;
        let record: ObjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fields.len(), 1);
        assert!(record.methods.is_empty());
        assert_eq!(record.comment, None);

        let method: MethodRecord = serde_json::from_str(r#"{"1": "list", "2": "void", "3": 0}"#).unwrap();
        assert!(method.args.is_empty());
    }

    #[test]
    fn decodes_file() {
        let json = r#"{"1": {"1": "Main"}, "2": [{"1": "A"}, {"1": "B"}]}"#;
        let file = DefinitionFile::from_json(json).unwrap();
        assert_eq!(file.main.name, "Main");
        let names: Vec<_> = file.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn file_without_classes_decodes() {
        let file = DefinitionFile::from_json(r#"{"1": {"1": "Main"}}"#).unwrap();
        assert!(file.classes.is_empty());
    }

    #[test]
    fn field_without_type_is_an_error() {
        let json = r#"{"1": "X", "2": [{"1": "broken"}]}"#;
        assert!(serde_json::from_str::<ObjectRecord>(json).is_err());
    }
}
