// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use lambda_runtime::{Error, LambdaEvent};
use log::{error, info};
use serde::{Deserialize, Serialize};
use slips_sam::config::Metadata;
use slips_sam::sam;

fn default_as_empty() -> String {
    "".to_string()
}

fn default_as_false() -> bool {
    false
}

#[derive(Deserialize, Debug)]
pub struct RenderEvent {
    #[serde(rename = "metadata")]
    pub metadata: Metadata,
    #[serde(rename = "code_uri")]
    pub code_uri: String,
    #[serde(rename = "print_json", default = "default_as_false")]
    pub print_json: bool,
    #[serde(rename = "s3_output_bucket", default = "default_as_empty")]
    pub s3_output_bucket: String,
}

#[derive(Debug, Serialize)]
pub struct RenderOutput {
    /// the rendered template, empty when it was stored in S3
    pub template: String,
    /// `s3://bucket/key` of the stored template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
struct FailureResponse {
    pub body: String,
}

impl std::fmt::Display for FailureResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.body)
    }
}

// Lets `?` turn a failed upload into the lambda's error response.
impl std::error::Error for FailureResponse {}

pub async fn upload_object_to_s3(
    client: &aws_sdk_s3::Client,
    bucket_name: &str,
    key: &str,
    b: &str,
) -> Result<String, Error> {
    client
        .put_object()
        .bucket(bucket_name)
        .key(key)
        .body(b.as_bytes().to_owned().into())
        .content_type("text/plain")
        .send()
        .await
        .map_err(|err| {
            error!("failed to upload file '{}' to S3 with error: {}", &key, err);
            FailureResponse {
                body: "The lambda encountered an error and the template was not saved".to_owned(),
            }
        })?;

    let s3_location = format!("s3://{}/{}", bucket_name, key);
    info!("Successfully stored the template in S3 with the name '{}'", &s3_location);

    Ok(s3_location)
}

/// Renders the template for the event. The template is returned inline unless
/// an output bucket is given, in which case only its location is returned.
pub async fn call_slips_sam(event: LambdaEvent<RenderEvent>) -> Result<RenderOutput, Error> {
    let (e, _context) = event.into_parts();
    info!("Rendering stack {} with code at {}", e.metadata.stack_name, e.code_uri);

    e.metadata.validate()?;
    let template = sam::build(&e.metadata, &e.code_uri)?;
    let (body, extension) = if e.print_json {
        (template.to_json()?, "json")
    } else {
        (template.to_yaml()?, "yaml")
    };

    if e.s3_output_bucket.is_empty() {
        return Ok(RenderOutput {
            template: body,
            location: None,
        });
    }

    let config = aws_config::from_env().load().await;
    let client = aws_sdk_s3::Client::new(&config);

    // keyed by stack and request time so repeated renders do not overwrite
    let filename = format!(
        "{}-{}.{}",
        e.metadata.stack_name,
        time::OffsetDateTime::now_utc().unix_timestamp(),
        extension
    );
    let location = upload_object_to_s3(&client, &e.s3_output_bucket, &filename, &body).await?;

    Ok(RenderOutput {
        template: String::new(),
        location: Some(location),
    })
}
