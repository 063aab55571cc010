use crate::errors::{Error, Result};

/// Stream name from a Kinesis stream ARN,
/// `arn:aws:kinesis:<region>:<account>:stream/<name>`.
pub fn stream_name(arn: &str) -> Result<String> {
    arn.split(':')
        .nth(5)
        .and_then(|resource| resource.split('/').nth(1))
        .filter(|name| !name.is_empty())
        .map(String::from)
        .ok_or_else(|| Error::InvalidArn(arn.to_string()))
}

/// Table name from a DynamoDB table ARN: whatever follows the last `/`.
pub fn table_name(arn: &str) -> Result<String> {
    match arn.rsplit('/').next() {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(Error::InvalidArn(arn.to_string())),
    }
}
