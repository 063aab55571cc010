use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

pub const FORMAT_VERSION: &str = "2010-09-09";
pub const TRANSFORM: &str = "AWS::Serverless-2016-10-31";
pub const DEFAULT_DESCRIPTION: &str = "Security Log & Alert Management: Log Collectors";

/// The rendered SAM document. `resources` keeps insertion order so the same
/// metadata always renders the same text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(rename = "Transform")]
    pub transform: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Resources")]
    pub resources: IndexMap<String, Value>,
}

impl Default for Template {
    fn default() -> Self {
        Template {
            format_version: String::from(FORMAT_VERSION),
            transform: String::from(TRANSFORM),
            description: String::from(DEFAULT_DESCRIPTION),
            resources: IndexMap::new(),
        }
    }
}

impl Template {
    /// Block-style YAML. serde_yaml never emits anchors or aliases, which
    /// CloudFormation rejects, so repeated structures are written out in full.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn resource(&self, logical_name: &str) -> Option<&Value> {
        self.resources.get(logical_name)
    }

    /// Logical names referenced through `Ref`, `Fn::GetAtt` or `${..}`
    /// substitutions anywhere in the resources, pseudo parameters excluded.
    pub fn referenced_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for resource in self.resources.values() {
            collect_references(resource, &mut names);
        }
        names.sort();
        names.dedup();
        names
    }
}

fn collect_references(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                match (key.as_str(), inner) {
                    ("Ref", Value::String(name)) => names.push(name.clone()),
                    ("Fn::GetAtt", Value::String(path)) => {
                        if let Some(name) = path.split('.').next() {
                            names.push(name.to_string());
                        }
                    }
                    ("Fn::GetAtt", Value::Array(parts)) => {
                        if let Some(Value::String(name)) = parts.first() {
                            names.push(name.clone());
                        }
                    }
                    ("Fn::Sub", Value::String(text)) => substitutions(text, &[], names),
                    ("Fn::Sub", Value::Array(parts)) => {
                        let locals: Vec<String> = match parts.get(1) {
                            Some(Value::Object(vars)) => vars.keys().cloned().collect(),
                            _ => vec![],
                        };
                        if let Some(Value::String(text)) = parts.first() {
                            substitutions(text, &locals, names);
                        }
                        for part in parts.iter().skip(1) {
                            collect_references(part, names);
                        }
                    }
                    _ => collect_references(inner, names),
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_references(item, names)),
        _ => {}
    }
}

fn substitutions(text: &str, locals: &[String], names: &mut Vec<String>) {
    let mut rest = text;
    while let Some(start) = rest.find("${") {
        rest = &rest[start + 2..];
        let end = match rest.find('}') {
            Some(end) => end,
            None => break,
        };
        let name = rest[..end].split('.').next().unwrap_or_default();
        // `${!Literal}` is an escape, not a reference
        if !name.starts_with("AWS::")
            && !name.starts_with('!')
            && !locals.iter().any(|local| local == name)
        {
            names.push(name.to_string());
        }
        rest = &rest[end + 1..];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_escaped_substitutions_are_not_references() {
        let mut template = Template::default();
        template.resources.insert(
            String::from("Dashboard"),
            json!({ "Fn::Sub": "${!Literal} ${Widget.Arn} ${!AlsoLiteral}" }),
        );

        assert_eq!(vec![String::from("Widget")], template.referenced_names());
    }

    #[test]
    fn test_referenced_names() {
        let mut template = Template::default();
        template.resources.insert(
            String::from("Func"),
            json!({
                "Properties": {
                    "Role": { "Fn::GetAtt": "FuncRole.Arn" },
                    "Topic": { "Ref": "Topic" },
                    "Invoke": { "Fn::GetAtt": [ "Other", "Arn" ] },
                    "Name": { "Fn::Sub": "${Stream}-${AWS::Region}" },
                    "Table": { "Fn::Sub": [ "${TableARN}*", { "TableARN": { "Fn::GetAtt": "Table.Arn" } } ] },
                    "Plain": "arn:aws:sns:us-east-1:123:external",
                },
            }),
        );

        assert_eq!(
            vec!["FuncRole", "Other", "Stream", "Table", "Topic"],
            template.referenced_names()
        );
    }

    #[test]
    fn test_yaml_has_no_aliases_and_round_trips() {
        let shared = json!({ "Effect": "Allow", "Action": [ "s3:GetObject" ] });
        let mut template = Template {
            description: String::from("aliasing check"),
            ..Default::default()
        };
        template.resources.insert(String::from("A"), shared.clone());
        template.resources.insert(String::from("B"), shared);

        let yaml = template.to_yaml().unwrap();
        assert!(!yaml.contains('&'));
        assert!(!yaml.contains('*'));
        assert!(!yaml.contains('{'));
        assert_eq!(template, Template::from_yaml(&yaml).unwrap());
    }
}
