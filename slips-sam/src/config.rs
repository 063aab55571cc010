//! Typed view of the pipeline metadata file.
//!
//! The metadata is normally kept in a YAML file next to the handler code and
//! carries keys used by other tooling too (`base`, `aws`, ...). Only the keys
//! below take part in rendering; anything else is ignored.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Error, Result};

pub const DEFAULT_CONCURRENCY: u32 = 5;
pub const DEFAULT_BATCH_SIZE: u32 = 1;
pub const DEFAULT_DELAY: u64 = 0;
// Kinesis event source mappings accept at most this many records per batch.
pub const MAX_BATCH_SIZE: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub backend: Backend,
    pub handler: Handler,
    pub bucket_mapping: IndexMap<String, Vec<BucketRule>>,
    #[serde(default = "default_routing")]
    pub routing: Vec<Route>,
    pub stack_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Backend resources shared by every function of the stack. Each `*_arn`
/// points at an existing resource; when absent the template creates one.
/// Stream and table ARNs must be plain strings since names are derived from
/// them. The topic and role identifiers may also be intrinsic functions such
/// as `{Fn::ImportValue: ...}` and are passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinesis_stream_fast_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinesis_stream_slow_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamodb_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dlq_sns_arn: Option<Value>,
    pub role_arn: RoleOverrides,
    pub lane: Lanes,
    pub sns_topics: Vec<SnsTopic>,
}

impl Backend {
    pub fn stream_arn(&self, lane: Lane) -> Option<&str> {
        match lane {
            Lane::Fast => self.kinesis_stream_fast_arn.as_deref(),
            Lane::Slow => self.kinesis_stream_slow_arn.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatcher: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_pusher: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drain: Option<Value>,
}

impl RoleOverrides {
    pub fn get(&self, purpose: RolePurpose) -> Option<&Value> {
        match purpose {
            RolePurpose::Reporter => self.reporter.as_ref(),
            RolePurpose::Dispatcher => self.dispatcher.as_ref(),
            RolePurpose::EventPusher => self.event_pusher.as_ref(),
            RolePurpose::Drain => self.drain.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolePurpose {
    Reporter,
    Dispatcher,
    EventPusher,
    Drain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Fast,
    Slow,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lanes {
    pub fast: LaneConfig,
    pub slow: LaneConfig,
}

impl Lanes {
    pub fn get(&self, lane: Lane) -> &LaneConfig {
        match lane {
            Lane::Fast => &self.fast,
            Lane::Slow => &self.slow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    pub batch_size: u32,
    pub delay: u64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        LaneConfig {
            batch_size: DEFAULT_BATCH_SIZE,
            delay: DEFAULT_DELAY,
        }
    }
}

/// An SNS topic the event pusher subscribes to, keyed by the event name used
/// in the function's `Events` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnsTopic {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handler {
    pub path: String,
    #[serde(default = "empty_args")]
    pub args: Value,
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
}

/// One prefix rule of a bucket. Keys other than `prefix` (the parser
/// `format` for instance) belong to the main handler and are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRule {
    pub prefix: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub dest: Destination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Fast,
    Slow,
    Drop,
}

fn default_routing() -> Vec<Route> {
    vec![Route {
        dest: Destination::Fast,
        bucket: None,
        prefix: None,
    }]
}

fn default_concurrency() -> u32 {
    DEFAULT_CONCURRENCY
}

fn empty_args() -> Value {
    Value::Object(Map::new())
}

impl Metadata {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let metadata: Metadata = serde_yaml::from_str(content)?;
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let metadata: Metadata = serde_json::from_str(content)?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Checks the values the deserializer cannot: required strings must not
    /// be blank and lane batch sizes must fit a Kinesis event source.
    pub fn validate(&self) -> Result<()> {
        if self.stack_name.trim().is_empty() {
            return Err(Error::MissingProperty(String::from("stack_name")));
        }
        if self.handler.path.trim().is_empty() {
            return Err(Error::MissingProperty(String::from("handler.path")));
        }

        for (name, lane) in [("fast", &self.backend.lane.fast), ("slow", &self.backend.lane.slow)] {
            if lane.batch_size == 0 || lane.batch_size > MAX_BATCH_SIZE {
                return Err(Error::IllegalArguments(format!(
                    "backend.lane.{name}.batch_size must be between 1 and {MAX_BATCH_SIZE}, found {}",
                    lane.batch_size
                )));
            }
        }

        if self.bucket_mapping.is_empty() {
            return Err(Error::IllegalArguments(String::from(
                "bucket_mapping must name at least one bucket",
            )));
        }
        for (bucket, rules) in &self.bucket_mapping {
            if bucket.trim().is_empty() {
                return Err(Error::MissingProperty(String::from("bucket_mapping.<bucket>")));
            }
            if rules.is_empty() {
                return Err(Error::IllegalArguments(format!(
                    "bucket_mapping.{bucket} has no prefix rules"
                )));
            }
        }

        let mut topic_names = HashSet::new();
        for topic in &self.backend.sns_topics {
            if !topic_names.insert(topic.name.as_str()) {
                return Err(Error::IllegalArguments(format!(
                    "backend.sns_topics has more than one topic named {}",
                    topic.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
