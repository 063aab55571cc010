use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// A value some resource property points at: either an identifier handed in
/// by the metadata or an intrinsic function the platform resolves against a
/// resource of this template.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// Used verbatim: an ARN string or an intrinsic function.
    External(Value),
    /// `Fn::GetAtt: Logical.Attribute`
    GetAtt(String, String),
    /// `Fn::Sub: ${Logical}`
    Sub(String),
    /// `Ref: Logical`
    Ref(String),
}

impl Reference {
    pub fn arn_of(logical_name: &str) -> Self {
        Reference::GetAtt(logical_name.to_string(), String::from("Arn"))
    }

    pub fn name_of(logical_name: &str) -> Self {
        Reference::Sub(logical_name.to_string())
    }

    pub fn external(id: &str) -> Self {
        Reference::External(Value::String(id.to_string()))
    }
}

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Reference::External(id) => id.serialize(serializer),
            Reference::GetAtt(name, attr) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &format!("{name}.{attr}"))?;
                map.end()
            }
            Reference::Sub(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Sub", &format!("${{{name}}}"))?;
                map.end()
            }
            Reference::Ref(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", name)?;
                map.end()
            }
        }
    }
}
