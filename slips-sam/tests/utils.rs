// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use clap::Parser;
use slips_sam::commands::{Executable, SlipsSam, APP_NAME};
use slips_sam::utils::reader::Reader;
use slips_sam::utils::writer::Writer;

#[non_exhaustive]
pub struct StatusCode;

#[allow(dead_code)]
impl StatusCode {
    pub const SUCCESS: i32 = 0;
    pub const INTERNAL_FAILURE: i32 = -1;
    pub const PARSING_ERROR: i32 = -2;
}

#[allow(dead_code)]
pub fn read_from_resource_file(path: &str) -> String {
    let mut content = String::new();
    let mut reader = BufReader::new(File::open(get_full_path_for_resource_file(path)).unwrap());
    reader.read_to_string(&mut content).unwrap();

    content
}

pub fn get_full_path_for_resource_file(path: &str) -> String {
    let mut resource = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    resource.push(path);
    resource.display().to_string()
}

pub trait CommandTestRunner {
    fn build_args(&self) -> Vec<String>;

    fn run(&self, writer: &mut Writer, reader: &mut Reader) -> i32 {
        let args = self.build_args();
        let command_options = std::iter::once(String::from(APP_NAME)).chain(args);

        let cli = match SlipsSam::try_parse_from(command_options) {
            Ok(cli) => cli,
            Err(e) => {
                writer
                    .write_err(e.to_string())
                    .expect("failed to write to stderr");
                return StatusCode::PARSING_ERROR;
            }
        };

        match cli.command.execute(writer, reader) {
            Err(e) => {
                writer
                    .write_err(format!("Error occurred {e}"))
                    .expect("failed to write to stderr");

                StatusCode::INTERNAL_FAILURE
            }
            Ok(code) => code,
        }
    }
}
