use serde_json::{json, Value};

use crate::sam::ERROR_NOTIFY;

const STREAM_RETENTION_HOURS: u32 = 24;
const STREAM_SHARD_COUNT: u32 = 1;
const TABLE_CAPACITY_UNITS: u32 = 10;

pub fn kinesis_stream() -> Value {
    json!({
        "Type": "AWS::Kinesis::Stream",
        "Properties": {
            "RetentionPeriodHours": STREAM_RETENTION_HOURS,
            "ShardCount": STREAM_SHARD_COUNT,
        },
    })
}

/// Failed main function invocations, keyed by request id.
pub fn error_table() -> Value {
    dynamodb_table(&[("request_id", "HASH")], None)
}

/// Per-object task state, expired through the `ttl` attribute.
pub fn task_table() -> Value {
    dynamodb_table(&[("request_id", "HASH"), ("s3_key", "RANGE")], Some("ttl"))
}

// Every key attribute is a string.
fn dynamodb_table(keys: &[(&str, &str)], ttl_attribute: Option<&str>) -> Value {
    let attributes = keys
        .iter()
        .map(|(name, _)| json!({ "AttributeName": name, "AttributeType": "S" }))
        .collect::<Vec<_>>();
    let key_schema = keys
        .iter()
        .map(|(name, key_type)| json!({ "AttributeName": name, "KeyType": key_type }))
        .collect::<Vec<_>>();

    let mut table = json!({
        "Type": "AWS::DynamoDB::Table",
        "Properties": {
            "AttributeDefinitions": attributes,
            "KeySchema": key_schema,
            "ProvisionedThroughput": {
                "ReadCapacityUnits": TABLE_CAPACITY_UNITS,
                "WriteCapacityUnits": TABLE_CAPACITY_UNITS,
            },
        },
    });

    if let Some(attribute) = ttl_attribute {
        table["Properties"]["TimeToLiveSpecification"] = json!({
            "AttributeName": attribute,
            "Enabled": true,
        });
    }

    table
}

pub fn error_notification_topic() -> Value {
    json!({ "Type": "AWS::SNS::Topic" })
}

pub fn error_notification_policy() -> Value {
    let topic = format!("arn:aws:sns:${{AWS::Region}}:${{AWS::AccountId}}:${{{ERROR_NOTIFY}}}");
    json!({
        "Type": "AWS::SNS::TopicPolicy",
        "Properties": {
            "Topics": [
                { "Fn::Sub": topic },
            ],
        },
    })
}
