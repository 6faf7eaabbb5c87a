//! Data types carried by signal and configuration pins.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ManifestError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    String,
    Int,
    Bool,
    List(Box<DataType>),
    /// Key and value types.
    Map(Box<DataType>, Box<DataType>),
    Record(Record),
}

/// Named fields. Field order carries no meaning: equality compares the field sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub fields: HashMap<String, DataType>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.fields.get(name)
    }
}

impl<S: Into<String>> FromIterator<(S, DataType)> for Record {
    fn from_iter<I: IntoIterator<Item = (S, DataType)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl DataType {
    pub fn list(element: DataType) -> Self {
        DataType::List(Box::new(element))
    }

    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map(Box::new(key), Box::new(value))
    }

    pub fn record<S: Into<String>>(fields: impl IntoIterator<Item = (S, DataType)>) -> Self {
        DataType::Record(fields.into_iter().collect())
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, DataType::String | DataType::Int | DataType::Bool)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::String => f.write_str("string"),
            DataType::Int => f.write_str("int"),
            DataType::Bool => f.write_str("bool"),
            DataType::List(element) => write!(f, "list<{}>", element),
            DataType::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            DataType::Record(record) => record.fmt(f),
        }
    }
}

/// Renders `record<T1 f1, T2 f2>` in map iteration order.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("record<")?;
        for (i, (name, data_type)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", data_type, name)?;
        }
        f.write_str(">")
    }
}

impl FromStr for DataType {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_type(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_scalars_and_containers() {
        let cases = [
            (DataType::String, "string"),
            (DataType::Int, "int"),
            (DataType::Bool, "bool"),
            (DataType::list(DataType::Bool), "list<bool>"),
            (DataType::list(DataType::list(DataType::Bool)), "list<list<bool>>"),
            (DataType::map(DataType::Int, DataType::Bool), "map<int, bool>"),
        ];
        for (data_type, expected) in cases {
            assert_eq!(data_type.to_string(), expected);
        }
    }

    #[test]
    fn render_record_any_field_order() {
        let record = DataType::record([("a", DataType::Int), ("b", DataType::list(DataType::Bool))]);
        let text = record.to_string();
        assert!(
            text == "record<int a, list<bool> b>" || text == "record<list<bool> b, int a>",
            "unexpected rendering {}",
            text
        );
    }

    #[test]
    fn record_equality_ignores_insertion_order() {
        let ab = DataType::record([("a", DataType::Int), ("b", DataType::String)]);
        let ba = DataType::record([("b", DataType::String), ("a", DataType::Int)]);
        assert_eq!(ab, ba);
        assert_ne!(ab, DataType::record([("a", DataType::Int)]));
    }

    #[test]
    fn scalars_and_field_lookup() {
        assert!(DataType::Int.is_scalar());
        assert!(DataType::String.is_scalar());
        assert!(!DataType::list(DataType::Bool).is_scalar());

        let DataType::Record(record) =
            DataType::record([("id", DataType::Int), ("tags", DataType::list(DataType::String))])
        else {
            panic!("expected record");
        };
        assert_eq!(record.get("id"), Some(&DataType::Int));
        assert!(record.get("tags").is_some_and(|t| !t.is_scalar()));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn empty_record_renders_and_is_empty() {
        let record = Record::new();
        assert!(record.is_empty());
        assert_eq!(record.to_string(), "record<>");
    }
}
