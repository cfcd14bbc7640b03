use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::GeneratedEmail;

const HEADER: [&str; 5] = ["index", "kind", "language", "sender_name", "formatted_message"];

/// Write generated emails as CSV, one row per email. Returns bytes written.
///
/// Orders and declarations carry no text, so their `language` and
/// `formatted_message` cells stay empty.
pub fn write_messages_csv(path: &Path, messages: &[GeneratedEmail]) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let counting = CountingWriter::new(writer);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(counting);

    writer.write_record(HEADER)?;
    for message in messages {
        let content = &message.content;
        writer.write_record([
            message.index.to_string().as_str(),
            content.kind().as_str(),
            content.language().map(|lang| lang.as_str()).unwrap_or_default(),
            content.sender_name().unwrap_or_default(),
            content.formatted_message().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    let counting = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(counting.bytes_written())
}

struct CountingWriter<W: Write> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, bytes: 0 }
    }

    fn bytes_written(&self) -> u64 {
        self.bytes
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let size = self.inner.write(buf)?;
        self.bytes = self.bytes.saturating_add(size as u64);
        Ok(size)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
