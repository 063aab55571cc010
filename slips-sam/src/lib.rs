// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod commands;
pub mod config;
pub mod errors;
pub mod sam;
pub mod utils;

pub use crate::commands::render::{Render, RenderBuilder};
pub use crate::config::Metadata;
pub use crate::errors::{Error, Result};
pub use crate::sam::{build, render, Template};

/// Renders the template for `metadata` (YAML or JSON text) with every
/// function pointing at `code_uri`.
pub fn render_template(metadata: &str, code_uri: &str) -> Result<String> {
    let metadata = Metadata::from_yaml_str(metadata)?;
    sam::render(&metadata, code_uri)
}
