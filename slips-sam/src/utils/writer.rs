use std::fs::File;
use std::io::{Stderr, Stdout, Write};
use std::string::FromUtf8Error;

use crate::errors::{Error, Result};

pub struct Writer {
    buffer: WriteBuffer,
    err: WriteBuffer,
}

impl Default for Writer {
    fn default() -> Self {
        Self {
            buffer: WriteBuffer::Stdout(std::io::stdout()),
            err: WriteBuffer::Stderr(std::io::stderr()),
        }
    }
}

impl Writer {
    pub fn new(buffer: WriteBuffer) -> Self {
        Self {
            buffer,
            err: WriteBuffer::Stderr(std::io::stderr()),
        }
    }

    pub fn new_with_err(buffer: WriteBuffer, err: WriteBuffer) -> Result<Self> {
        if matches!(err, WriteBuffer::Stdout(_)) {
            return Err(Error::IllegalArguments(String::from(
                "STDOUT is not allowed as an error buffer",
            )));
        }

        Ok(Self { buffer, err })
    }

    pub fn write_err(&mut self, s: String) -> std::io::Result<()> {
        writeln!(self.err, "{}", s)
    }

    /// What was written so far, for in-memory buffers only.
    pub fn contents(&self) -> std::result::Result<String, FromUtf8Error> {
        self.buffer.contents()
    }

    pub fn err_contents(&self) -> std::result::Result<String, FromUtf8Error> {
        self.err.contents()
    }
}

impl Write for Writer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.buffer.flush()
    }
}

pub enum WriteBuffer {
    Stdout(Stdout),
    Stderr(Stderr),
    Vec(Vec<u8>),
    File(File),
}

impl WriteBuffer {
    fn contents(&self) -> std::result::Result<String, FromUtf8Error> {
        match self {
            WriteBuffer::Vec(vec) => String::from_utf8(vec.clone()),
            _ => Ok(String::new()),
        }
    }
}

impl Write for WriteBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.write(buf),
            WriteBuffer::Stderr(stderr) => stderr.write(buf),
            WriteBuffer::Vec(vec) => vec.write(buf),
            WriteBuffer::File(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            WriteBuffer::Stdout(stdout) => stdout.flush(),
            WriteBuffer::Stderr(stderr) => stderr.flush(),
            WriteBuffer::Vec(vec) => vec.flush(),
            WriteBuffer::File(file) => file.flush(),
        }
    }
}
