//! Compact binary event stream
//!
//! Each event is a self-delimiting `bincode` record appended to the stream.

use crate::event::Event;
use crate::output::EventSink;
use scribe_core::{ScribeError, ScribeResult};
use std::io::{self, Read, Write};

/// Sink appending `bincode`-encoded events
pub struct BinarySink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> BinarySink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for BinarySink<W> {
    fn write_event(&mut self, event: &Event) -> io::Result<()> {
        bincode::serialize_into(&mut self.writer, event).map_err(into_io_error)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Iterator decoding events from a binary stream until end of input
pub struct BinaryReader<R: Read> {
    reader: R,
    done: bool,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: Read> Iterator for BinaryReader<R> {
    type Item = ScribeResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match bincode::deserialize_from::<_, Event>(&mut self.reader) {
            Ok(event) => Some(Ok(event)),
            Err(err) => {
                self.done = true;
                // EOF between records is the normal end of the stream
                match *err {
                    bincode::ErrorKind::Io(ref io) if io.kind() == io::ErrorKind::UnexpectedEof => {
                        None
                    }
                    _ => Some(Err(ScribeError::SerializationError(err.to_string()))),
                }
            }
        }
    }
}

fn into_io_error(err: bincode::Error) -> io::Error {
    match *err {
        bincode::ErrorKind::Io(io) => io,
        other => io::Error::other(other.to_string()),
    }
}
