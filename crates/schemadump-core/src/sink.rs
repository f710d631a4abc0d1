//! Append-only stream of emitted identifiers.
//!
//! Every class, field, enum and enumerator name is appended in emission
//! order, without deduplication. The stream is consumed by an external tool.

use std::io::{self, Write};

pub trait IdentifierSink {
    fn append_line(&mut self, line: &str);
}

impl IdentifierSink for Vec<String> {
    fn append_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Writes one identifier per line to any writer.
///
/// Write failures never interrupt a dump; the first one is kept and further
/// writes are skipped.
pub struct LineWriterSink<W: Write> {
    writer: W,
    lines: usize,
    error: Option<io::Error>,
}

impl<W: Write> LineWriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines: 0,
            error: None,
        }
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Flush the writer and report the first failure, if any.
    pub fn into_result(mut self) -> io::Result<usize> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.lines)
    }
}

impl<W: Write> IdentifierSink for LineWriterSink<W> {
    fn append_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        let result = self
            .writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"));
        match result {
            Ok(()) => self.lines += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_identifier_per_line() {
        let mut sink = LineWriterSink::new(Vec::new());
        sink.append_line("Widget");
        sink.append_line("count");
        sink.append_line("count");
        assert_eq!(sink.lines_written(), 3);
        let mut buffer = Vec::new();
        {
            let mut sink = LineWriterSink::new(&mut buffer);
            sink.append_line("A");
            sink.append_line("b");
            assert_eq!(sink.into_result().unwrap(), 2);
        }
        assert_eq!(buffer, b"A\nb\n");
    }

    #[test]
    fn keeps_first_error() {
        let mut sink = LineWriterSink::new(FailingWriter);
        sink.append_line("Widget");
        sink.append_line("count");
        assert_eq!(sink.lines_written(), 0);
        assert!(sink.into_result().is_err());
    }
}
