//! Generic document tree consumed by the manifest decoder.
//!
//! The decoder never sees manifest text; it walks any tree of mappings, sequences and
//! scalars through [`Document`]. Implementations are provided for `serde_yaml::Value`
//! and, with the `json` feature, `serde_json::Value`.

use crate::value::ConfigValue;

pub trait Document: Sized {
    fn is_null(&self) -> bool;

    fn as_str(&self) -> Option<&str>;

    fn as_sequence(&self) -> Option<&[Self]>;

    /// Entries of a mapping whose keys are strings, in document order; other keys are dropped.
    /// `None` when the node is not a mapping.
    fn string_entries(&self) -> Option<Vec<(&str, &Self)>>;

    /// Opaque copy of the node as a configuration value.
    fn to_config_value(&self) -> ConfigValue;

    /// Node kind for error messages.
    fn kind(&self) -> &'static str;

    fn is_mapping(&self) -> bool {
        self.string_entries().is_some()
    }

    fn get(&self, key: &str) -> Option<&Self> {
        self.string_entries()?
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

fn untag(value: &serde_yaml::Value) -> &serde_yaml::Value {
    match value {
        serde_yaml::Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn yaml_number(n: &serde_yaml::Number) -> ConfigValue {
    match n.as_i64() {
        Some(i) => ConfigValue::Int(i),
        None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

impl Document for serde_yaml::Value {
    fn is_null(&self) -> bool {
        untag(self).is_null()
    }

    fn as_str(&self) -> Option<&str> {
        untag(self).as_str()
    }

    fn as_sequence(&self) -> Option<&[Self]> {
        untag(self).as_sequence().map(Vec::as_slice)
    }

    fn string_entries(&self) -> Option<Vec<(&str, &Self)>> {
        let mapping = untag(self).as_mapping()?;
        Some(
            mapping
                .iter()
                .filter_map(|(k, v)| untag(k).as_str().map(|k| (k, v)))
                .collect(),
        )
    }

    fn to_config_value(&self) -> ConfigValue {
        use serde_yaml::Value;
        match untag(self) {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(*b),
            Value::Number(n) => yaml_number(n),
            Value::String(s) => ConfigValue::String(s.clone()),
            Value::Sequence(items) => {
                ConfigValue::Sequence(items.iter().map(Document::to_config_value).collect())
            }
            Value::Mapping(mapping) => ConfigValue::Mapping(
                mapping
                    .iter()
                    .map(|(k, v)| (k.to_config_value(), v.to_config_value()))
                    .collect(),
            ),
            // untag() never returns a tagged node
            Value::Tagged(tagged) => tagged.value.to_config_value(),
        }
    }

    fn kind(&self) -> &'static str {
        use serde_yaml::Value;
        match untag(self) {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) | Value::Tagged(_) => "mapping",
        }
    }
}

#[cfg(feature = "json")]
impl Document for serde_json::Value {
    fn is_null(&self) -> bool {
        serde_json::Value::is_null(self)
    }

    fn as_str(&self) -> Option<&str> {
        serde_json::Value::as_str(self)
    }

    fn as_sequence(&self) -> Option<&[Self]> {
        self.as_array().map(Vec::as_slice)
    }

    fn string_entries(&self) -> Option<Vec<(&str, &Self)>> {
        let object = self.as_object()?;
        Some(object.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }

    fn to_config_value(&self) -> ConfigValue {
        use serde_json::Value;
        match self {
            Value::Null => ConfigValue::Null,
            Value::Bool(b) => ConfigValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Int(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ConfigValue::String(s.clone()),
            Value::Array(items) => {
                ConfigValue::Sequence(items.iter().map(Document::to_config_value).collect())
            }
            Value::Object(object) => ConfigValue::Mapping(
                object
                    .iter()
                    .map(|(k, v)| (ConfigValue::String(k.clone()), v.to_config_value()))
                    .collect(),
            ),
        }
    }

    fn kind(&self) -> &'static str {
        use serde_json::Value;
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "sequence",
            Value::Object(_) => "mapping",
        }
    }
}
