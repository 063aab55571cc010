use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use clap::Args;
use log::info;

use crate::commands::{
    Executable, CODE_URI, JSON_FILE_EXTENSIONS, METADATA, OUTPUT, PRINT_JSON, SUCCESS_STATUS_CODE,
};
use crate::config::Metadata;
use crate::errors::{Error, Result};
use crate::sam;
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

const ABOUT: &str = "Render the SAM template for the pipeline described by a metadata file.";
const METADATA_HELP: &str =
    "Provide path to the metadata file in YAML or JSON. Reads from stdin when absent";
const CODE_URI_HELP: &str = "Location of the packaged function code, used as CodeUri of every function";
const OUTPUT_HELP: &str = "Write to output file";
const PRINT_JSON_HELP: &str = "Print the template in JSON format instead of YAML";

#[derive(Debug, Clone, Eq, PartialEq, Args)]
#[clap(about=ABOUT)]
/// .
/// The Render command turns pipeline metadata into a deployable SAM template
pub struct Render {
    /// path of the metadata file, stdin when None
    #[arg(short = METADATA.1, long = METADATA.0, help = METADATA_HELP)]
    pub(crate) metadata: Option<String>,
    /// CodeUri of every function, typically the zip produced by packaging
    #[arg(short = CODE_URI.1, long = CODE_URI.0, help = CODE_URI_HELP)]
    pub(crate) code_uri: String,
    /// path the template is written to, stdout when None
    #[arg(short = OUTPUT.1, long = OUTPUT.0, help = OUTPUT_HELP)]
    pub(crate) output: Option<String>,
    #[arg(short = PRINT_JSON.1, long = PRINT_JSON.0, help = PRINT_JSON_HELP)]
    pub(crate) print_json: bool,
}

impl Executable for Render {
    /// .
    /// render the template and write it out
    ///
    /// This function will return an error if
    /// - the metadata file does not exist or cannot be read
    /// - the metadata is not valid YAML/JSON or lacks required keys
    /// - an existing resource ARN in the metadata is malformed
    fn execute(&self, writer: &mut Writer, reader: &mut Reader) -> Result<i32> {
        let metadata = match &self.metadata {
            Some(path) => read_metadata_file(path)?,
            None => {
                let mut content = String::new();
                reader.read_to_string(&mut content)?;
                Metadata::from_yaml_str(&content)?
            }
        };

        let template = sam::build(&metadata, &self.code_uri)?;
        let rendered = if self.print_json {
            template.to_json()?
        } else {
            template.to_yaml()?
        };

        match &self.output {
            Some(path) => {
                let mut file = File::create(path)?;
                file.write_all(rendered.as_bytes())?;
                info!("Wrote template for {} to {}", metadata.stack_name, path);
            }
            None => write!(writer, "{}", rendered)?,
        }

        Ok(SUCCESS_STATUS_CODE)
    }
}

fn read_metadata_file(path: &str) -> Result<Metadata> {
    if !Path::new(path).is_file() {
        return Err(Error::FileNotFoundError(path.to_string()));
    }

    info!("Loading metadata from {}", path);
    let content = fs::read_to_string(path)?;
    if JSON_FILE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        Metadata::from_json_str(&content)
    } else {
        Metadata::from_yaml_str(&content)
    }
}

/// Builds a [`Render`] command for library callers.
#[derive(Debug, Default)]
pub struct RenderBuilder {
    metadata: Option<String>,
    code_uri: Option<String>,
    output: Option<String>,
    print_json: bool,
}

impl RenderBuilder {
    pub fn metadata(mut self, path: Option<String>) -> Self {
        self.metadata = path;
        self
    }

    pub fn code_uri(mut self, code_uri: &str) -> Self {
        self.code_uri = Some(code_uri.to_string());
        self
    }

    pub fn output(mut self, path: Option<String>) -> Self {
        self.output = path;
        self
    }

    pub fn print_json(mut self, arg: bool) -> Self {
        self.print_json = arg;
        self
    }

    pub fn try_build(self) -> Result<Render> {
        let code_uri = match self.code_uri {
            Some(code_uri) if !code_uri.trim().is_empty() => code_uri,
            _ => {
                return Err(Error::IllegalArguments(String::from(
                    "a code uri is required to render a template",
                )))
            }
        };

        Ok(Render {
            metadata: self.metadata,
            code_uri,
            output: self.output,
            print_json: self.print_json,
        })
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
