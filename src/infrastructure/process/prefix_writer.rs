use std::io::{self, Write};

use tokio::io::{AsyncRead, AsyncReadExt};

/// Line-buffered writer that tags every line with a fixed prefix.
///
/// A line is written to the inner sink in a single `write_all`, so lines from
/// two writers sharing a terminal never interleave mid-line.
#[derive(Debug)]
pub struct PrefixWriter<W: Write> {
    inner: W,
    prefix: String,
    pending: Vec<u8>,
}

impl<W: Write> PrefixWriter<W> {
    pub fn new(inner: W, prefix: impl Into<String>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
            pending: Vec::new(),
        }
    }

    fn emit_line(&mut self) -> io::Result<()> {
        let mut line = Vec::with_capacity(self.prefix.len() + self.pending.len() + 2);
        line.extend_from_slice(self.prefix.as_bytes());
        line.push(b' ');
        line.append(&mut self.pending);
        line.push(b'\n');
        self.inner.write_all(&line)
    }

    /// Writes out an unterminated last line and flushes the sink.
    fn flush_pending(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.emit_line()?;
        }
        self.inner.flush()
    }

    /// Writes out an unterminated last line and returns the sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush_pending()?;
        Ok(self.inner)
    }

    /// Returns the sink, dropping any unterminated line.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for PrefixWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rest = buf;
        while let Some(newline) = rest.iter().position(|b| *b == b'\n') {
            self.pending.extend_from_slice(&rest[..newline]);
            self.emit_line()?;
            rest = &rest[newline + 1..];
        }
        self.pending.extend_from_slice(rest);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Copies `reader` into `sink` until end of stream.
///
/// Once the sink reports a broken pipe nothing more is written, but the
/// reader is still consumed to the end so the child never blocks on a full pipe.
pub async fn drain<R, W>(mut reader: R, mut sink: PrefixWriter<W>) -> io::Result<W>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut buf = [0u8; 8192];
    let mut closed = false;
    loop {
        let read = reader.read(&mut buf).await?;
        if read == 0 {
            break;
        }
        if closed {
            continue;
        }
        closed = ignore_broken_pipe(sink.write_all(&buf[..read]))?;
    }

    if !closed {
        ignore_broken_pipe(sink.flush_pending())?;
    }
    Ok(sink.into_inner())
}

/// `Ok(true)` when the sink has gone away.
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<bool> {
    match result {
        Ok(()) => Ok(false),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(true),
        Err(e) => Err(e),
    }
}
