use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::config::{BucketRule, Handler, LaneConfig, Route, SnsTopic};
use crate::errors::Result;
use crate::sam::reference::Reference;
use crate::sam::MAIN_FUNC;

const RUNTIME: &str = "python3.6";
const MEMORY_SIZE: u32 = 128;
const MAIN_MEMORY_SIZE: u32 = 1024;
const TIMEOUT: u32 = 300;
const STARTING_POSITION: &str = "TRIM_HORIZON";

/// The serverless function skeleton every pipeline function starts from.
fn function(code_uri: &str, handler: &str, role: &Reference, variables: Value) -> Value {
    json!({
        "Type": "AWS::Serverless::Function",
        "Properties": {
            "CodeUri": code_uri,
            "Handler": handler,
            "Runtime": RUNTIME,
            "Role": role,
            "MemorySize": MEMORY_SIZE,
            "Timeout": TIMEOUT,
            "Environment": {
                "Variables": variables,
            },
        },
    })
}

fn sns_event(topic: impl serde::Serialize) -> Value {
    json!({
        "Type": "SNS",
        "Properties": { "Topic": topic },
    })
}

pub fn event_pusher(
    code_uri: &str,
    routing: &[Route],
    sns_topics: &[SnsTopic],
    fast_stream_name: &Reference,
    slow_stream_name: &Reference,
    role: &Reference,
) -> Result<Value> {
    let mut config = function(
        code_uri,
        "event_pusher.lambda_handler",
        role,
        json!({
            "DST_KINESIS_STREAM_FAST": fast_stream_name,
            "DST_KINESIS_STREAM_SLOW": slow_stream_name,
            "ROUTING_POLICY": serde_json::to_string(routing)?,
        }),
    );

    if !sns_topics.is_empty() {
        let events = sns_topics
            .iter()
            .map(|topic| (topic.name.clone(), sns_event(&topic.arn)))
            .collect::<Map<String, Value>>();
        config["Properties"]["Events"] = Value::Object(events);
    }

    Ok(config)
}

pub fn dispatcher(
    code_uri: &str,
    lane: &LaneConfig,
    stream_arn: &Reference,
    role: &Reference,
) -> Value {
    let mut config = function(
        code_uri,
        "dispatcher.lambda_handler",
        role,
        json!({
            "FUNC_NAME": Reference::name_of(MAIN_FUNC),
            "DELAY": lane.delay,
        }),
    );
    config["Properties"]["Events"] = json!({
        "StreamEvent": {
            "Type": "Kinesis",
            "Properties": {
                "Stream": stream_arn,
                "StartingPosition": STARTING_POSITION,
                "BatchSize": lane.batch_size,
            },
        },
    });

    config
}

pub fn main_func(
    code_uri: &str,
    bucket_mapping: &IndexMap<String, Vec<BucketRule>>,
    handler: &Handler,
    topic_arn: &Reference,
    role: &Reference,
) -> Result<Value> {
    let mut config = function(
        code_uri,
        "main.lambda_handler",
        role,
        json!({
            "HANDLER_PATH": handler.path,
            "HANDLER_ARGS": serde_json::to_string(&handler.args)?,
            "BUCKET_MAPPING": serde_json::to_string(bucket_mapping)?,
        }),
    );

    let props = &mut config["Properties"];
    props["DeadLetterQueue"] = json!({
        "Type": "SNS",
        "TargetArn": topic_arn,
    });
    props["MemorySize"] = json!(MAIN_MEMORY_SIZE);
    props["ReservedConcurrentExecutions"] = json!(handler.concurrency);

    // Placement needs both lists; one alone is ignored.
    if let (Some(security_groups), Some(subnets)) =
        (&handler.security_group_ids, &handler.subnet_ids)
    {
        props["VpcConfig"] = json!({
            "SecurityGroupIds": security_groups,
            "SubnetIds": subnets,
        });
    }

    Ok(config)
}

pub fn reporter(
    code_uri: &str,
    topic_arn: &Reference,
    table_name: &Reference,
    role: &Reference,
) -> Value {
    let mut config = function(
        code_uri,
        "reporter.lambda_handler",
        role,
        json!({ "ERROR_TABLE": table_name }),
    );
    config["Properties"]["Events"] = json!({
        "FailedMainFunc": sns_event(topic_arn),
    });

    config
}

pub fn drain(code_uri: &str, table_name: &Reference, role: &Reference) -> Value {
    function(
        code_uri,
        "drain.lambda_handler",
        role,
        json!({ "ERROR_TABLE": table_name }),
    )
}

#[cfg(test)]
#[path = "functions_tests.rs"]
mod functions_tests;
