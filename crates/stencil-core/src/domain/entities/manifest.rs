use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// A parsed `package.json`. Key order is preserved on write.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageManifest {
    root: Map<String, Value>,
}

impl PackageManifest {
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| DomainError::ManifestInvalid {
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(DomainError::ManifestInvalid {
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.root.get("name").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.root.get("description").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: &str) {
        self.root.insert("name".into(), Value::String(name.into()));
    }

    pub fn set_description(&mut self, description: &str) {
        self.root
            .insert("description".into(), Value::String(description.into()));
    }

    pub fn has_script(&self, key: &str) -> bool {
        self.root
            .get("scripts")
            .and_then(Value::as_object)
            .is_some_and(|s| s.contains_key(key))
    }

    /// Remove `scripts.<key>`, leaving every other script in place.
    /// Returns whether anything was removed.
    pub fn remove_script(&mut self, key: &str) -> bool {
        self.root
            .get_mut("scripts")
            .and_then(Value::as_object_mut)
            .and_then(|s| s.shift_remove(key))
            .is_some()
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut out = serde_json::to_string_pretty(&self.root).map_err(|e| {
            DomainError::ManifestInvalid {
                reason: e.to_string(),
            }
        })?;
        out.push('\n');
        Ok(out)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
