use std::fs::File;
use std::io::Write;
use std::path::Path;

use clap::{Args, CommandFactory, ValueEnum};

use crate::commands::{Executable, SlipsSam, APP_NAME, SHELL, SUCCESS_STATUS_CODE};
use crate::errors::{Error, Result};
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

#[derive(Copy, Clone, Eq, PartialEq, ValueEnum, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

const LOCATION: &str = "location";

#[derive(Debug, Clone, Eq, PartialEq, Args)]
#[clap(about = "Generate an auto-completions script for your shell")]
pub struct Completions {
    #[arg(
        long,
        short,
        value_name = LOCATION,
        help = "the directory the completions script is written to, if no value is present the script will be written to stdout",
    )]
    pub(crate) location: Option<String>,
    #[arg(
        long = SHELL.0,
        short = SHELL.1,
        value_name = "shell",
        required = true,
        help = "the shell you are currently running"
    )]
    pub(crate) shell: Shell,
}

impl Executable for Completions {
    fn execute(&self, writer: &mut Writer, _: &mut Reader) -> Result<i32> {
        let mut app = SlipsSam::command();
        let mut script: Vec<u8> = vec![];

        match self.shell {
            Shell::Bash => {
                clap_complete::generate(clap_complete::shells::Bash, &mut app, APP_NAME, &mut script)
            }
            Shell::Zsh => {
                clap_complete::generate(clap_complete::shells::Zsh, &mut app, APP_NAME, &mut script)
            }
            Shell::Fish => {
                clap_complete::generate(clap_complete::shells::Fish, &mut app, APP_NAME, &mut script)
            }
            Shell::PowerShell => clap_complete::generate(
                clap_complete::shells::PowerShell,
                &mut app,
                APP_NAME,
                &mut script,
            ),
        }

        match &self.location {
            Some(location) => {
                let path = Path::new(location);
                if !path.is_dir() {
                    return Err(Error::FileNotFoundError(location.clone()));
                }
                File::create(path.join(format!("{APP_NAME}.sh")))?.write_all(&script)?;
            }
            None => writer.write_all(&script)?,
        }

        Ok(SUCCESS_STATUS_CODE)
    }
}
