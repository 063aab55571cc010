use std::process::exit;

use clap::Parser;
use slips_sam::commands::{Executable, SlipsSam, ERROR_STATUS_CODE};
use slips_sam::errors::Error;
use slips_sam::utils::reader::{ReadBuffer, Reader};
use slips_sam::utils::writer::{WriteBuffer, Writer};

fn main() -> Result<(), Error> {
    let args = SlipsSam::parse();

    if let Err(e) = simple_logger::init_with_level(args.log_level()) {
        eprintln!("Unable to initialise logging {e}");
    }
    log::trace!("Arguments are {:?}", args);

    let mut writer = Writer::new_with_err(
        WriteBuffer::Stdout(std::io::stdout()),
        WriteBuffer::Stderr(std::io::stderr()),
    )?;
    let mut reader = Reader::new(ReadBuffer::Stdin(std::io::stdin()));

    match args.command.execute(&mut writer, &mut reader) {
        Err(e) => {
            writer
                .write_err(format!("Error occurred {e}"))
                .expect("failed to write to stderr");

            exit(ERROR_STATUS_CODE);
        }
        Ok(code) => exit(code),
    }
}
