// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use lambda_runtime::{service_fn, Error};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use slips_sam_lambda::call_slips_sam;

#[tokio::main]
async fn main() -> Result<(), Error> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    let func = service_fn(call_slips_sam);
    lambda_runtime::run(func).await?;
    Ok(())
}
