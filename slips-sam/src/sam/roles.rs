//! IAM roles of the pipeline functions.
//!
//! Every role shares the same trust policy and basic execution managed
//! policy, then gets inline policies scoped to what its function touches.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::BucketRule;
use crate::sam::reference::Reference;
use crate::sam::MAIN_FUNC;

const POLICY_VERSION: &str = "2012-10-17";
const LAMBDA_PRINCIPAL: &str = "lambda.amazonaws.com";
const BASIC_EXECUTION_POLICY: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

const KINESIS_WRITE_ACTIONS: [&str; 2] = ["kinesis:PutRecord", "kinesis:PutRecords"];
const KINESIS_READ_ACTIONS: [&str; 3] = [
    "kinesis:GetShardIterator",
    "kinesis:GetRecords",
    "kinesis:DescribeStream",
];

/// An inline policy holding a single `Allow` statement.
fn inline_policy<R: Serialize>(name: &str, actions: &[&str], resource: R) -> Value {
    json!({
        "PolicyName": name,
        "PolicyDocument": {
            "Version": POLICY_VERSION,
            "Statement": [ {
                "Effect": "Allow",
                "Action": actions,
                "Resource": resource,
            } ],
        },
    })
}

fn role(policies: Vec<Value>) -> Value {
    json!({
        "Type": "AWS::IAM::Role",
        "Properties": {
            "AssumeRolePolicyDocument": {
                "Version": POLICY_VERSION,
                "Statement": [ {
                    "Effect": "Allow",
                    "Principal": {
                        "Service": [ LAMBDA_PRINCIPAL ],
                    },
                    "Action": [ "sts:AssumeRole" ],
                } ],
            },
            "Path": "/",
            "ManagedPolicyArns": [ BASIC_EXECUTION_POLICY ],
            "Policies": policies,
        },
    })
}

// `${TableARN}*` also covers the table's indexes.
fn table_pattern(table_arn: &Reference) -> Value {
    json!({ "Fn::Sub": [ "${TableARN}*", { "TableARN": table_arn } ] })
}

/// Object ARN patterns for every bucket prefix, in mapping order.
pub fn readable_objects(bucket_mapping: &IndexMap<String, Vec<BucketRule>>) -> Vec<String> {
    bucket_mapping
        .iter()
        .flat_map(|(bucket, rules)| {
            rules
                .iter()
                .map(move |rule| format!("arn:aws:s3:::{}/{}*", bucket, rule.prefix))
        })
        .collect()
}

pub fn main_func_role(
    bucket_mapping: &IndexMap<String, Vec<BucketRule>>,
    topic_arn: &Reference,
) -> Value {
    role(vec![
        inline_policy(
            "S3ObjectReadable",
            &["s3:GetObject"],
            readable_objects(bucket_mapping),
        ),
        inline_policy("SNSPublishable", &["sns:Publish"], topic_arn),
    ])
}

pub fn event_pusher_role(streams: &[&Reference]) -> Value {
    role(vec![inline_policy(
        "KinesisPutRecord",
        &KINESIS_WRITE_ACTIONS,
        streams,
    )])
}

pub fn dispatcher_role(streams: &[&Reference]) -> Value {
    role(vec![
        inline_policy("KinesisReadable", &KINESIS_READ_ACTIONS, streams),
        inline_policy(
            "LambdaInvoke",
            &["lambda:InvokeFunction"],
            json!({ "Fn::GetAtt": [ MAIN_FUNC, "Arn" ] }),
        ),
    ])
}

pub fn reporter_role(table_arn: &Reference) -> Value {
    role(vec![inline_policy(
        "DynamoDBWriteable",
        &[
            "dynamodb:BatchWriteItem",
            "dynamodb:PutItem",
            "dynamodb:UpdateItem",
        ],
        vec![table_pattern(table_arn)],
    )])
}

pub fn drain_role(table_arn: &Reference, streams: &[&Reference]) -> Value {
    role(vec![
        inline_policy("KinesisPutRecord", &KINESIS_WRITE_ACTIONS, streams),
        inline_policy(
            "DynamoDBWriteable",
            &["dynamodb:DeleteItem", "dynamodb:Scan"],
            vec![table_pattern(table_arn)],
        ),
    ])
}

#[cfg(test)]
#[path = "roles_tests.rs"]
mod roles_tests;
