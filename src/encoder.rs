use std::io;

use log::trace;
use serde::Serialize;

use crate::error::Result;
use crate::options::EncodeOptions;
use crate::ser;

/// Writes one Storable stream per [`Encoder::encode`] call to an output sink.
///
/// The encoder keeps a scratch buffer between calls, so encoding many values only allocates
/// when a value is larger than any before it. Each stream is written to the sink with a single
/// `write_all` after the whole value has been encoded.
pub struct Encoder<W> {
    writer: W,
    options: EncodeOptions,
    buf: Vec<u8>,
    last_error: Option<io::ErrorKind>,
}

impl<W: io::Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, EncodeOptions::default())
    }

    pub fn with_options(writer: W, options: EncodeOptions) -> Self {
        Self {
            writer,
            options,
            buf: Vec::new(),
            last_error: None,
        }
    }

    /// Encode `value` and write the resulting stream to the sink.
    pub fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let buf = ser::encode_into(std::mem::take(&mut self.buf), value, &self.options)?;
        trace!("Writing Storable stream of {} bytes", buf.len());
        let res = self.writer.write_all(&buf);
        self.buf = buf;
        if let Err(ref err) = res {
            self.last_error = Some(err.kind());
        }
        Ok(res?)
    }

    /// Kind of the most recent write failure, if the sink ever rejected a stream.
    pub fn last_error(&self) -> Option<io::ErrorKind> {
        self.last_error
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
