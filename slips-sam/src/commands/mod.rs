pub mod completions;
pub mod render;

use clap::{ArgAction, Parser, Subcommand};

use crate::errors::Result;
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

//
// Constants
//
// Application metadata
pub const APP_NAME: &str = "slips-sam";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
// Commands
pub const RENDER: &str = "render";
pub const COMPLETIONS: &str = "completions";
// Arguments for render
pub const METADATA: (&str, char) = ("metadata", 'c');
pub const CODE_URI: (&str, char) = ("code-uri", 'p');
pub const OUTPUT: (&str, char) = ("output", 'o');
pub const PRINT_JSON: (&str, char) = ("print-json", 'j');
// Arguments for completions
pub const SHELL: (&str, char) = ("shell", 's');
// Global arguments
pub const VERBOSE: (&str, char) = ("verbose", 'v');

pub(crate) const JSON_FILE_EXTENSIONS: [&str; 2] = [".json", ".jsn"];

pub const SUCCESS_STATUS_CODE: i32 = 0;
pub const ERROR_STATUS_CODE: i32 = 5;

const ABOUT: &str = r#"
  slips-sam renders the AWS SAM template of the slips log-collection pipeline.
  Streams, the error table, the dead letter topic and IAM roles are created by
  the template unless the metadata points at existing ones."#;
const VERBOSE_HELP: &str = "Sets the level of verbosity - add v's to increase output";

#[derive(Debug, Parser)]
#[command(name = APP_NAME, version = APP_VERSION, about = ABOUT, arg_required_else_help = true)]
pub struct SlipsSam {
    #[arg(short = VERBOSE.1, long = VERBOSE.0, action = ArgAction::Count, global = true, help = VERBOSE_HELP)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(name = RENDER)]
    Render(render::Render),
    #[command(name = COMPLETIONS)]
    Completions(completions::Completions),
}

pub trait Executable {
    fn execute(&self, writer: &mut Writer, reader: &mut Reader) -> Result<i32>;
}

impl Executable for Commands {
    fn execute(&self, writer: &mut Writer, reader: &mut Reader) -> Result<i32> {
        match self {
            Commands::Render(cmd) => cmd.execute(writer, reader),
            Commands::Completions(cmd) => cmd.execute(writer, reader),
        }
    }
}

impl SlipsSam {
    pub fn log_level(&self) -> log::Level {
        match self.verbose {
            0 => log::Level::Error,
            1 => log::Level::Info,
            2 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}
