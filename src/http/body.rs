//! Message bodies.
//!
//! A [`Body`] is a byte stream that can be read exactly once. Ownership
//! decides who may read it; dropping it closes the underlying reader.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::TryStreamExt;
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio_util::io::{ReaderStream, StreamReader};

/// Single-use byte stream carried by requests and responses.
pub struct Body {
    reader: Pin<Box<dyn AsyncRead + Send>>,
}

impl Body {
    /// A body that yields no bytes.
    pub fn empty() -> Self {
        Self::from_reader(tokio::io::empty())
    }

    /// Wrap any async reader.
    pub fn from_reader(reader: impl AsyncRead + Send + 'static) -> Self {
        Self {
            reader: Box::pin(reader),
        }
    }

    /// Read the whole stream into memory.
    pub async fn collect(mut self) -> io::Result<Bytes> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf).await?;
        Ok(Bytes::from(buf))
    }

    /// Read the whole stream as UTF-8 text, replacing invalid sequences.
    pub async fn text(self) -> io::Result<String> {
        let bytes = self.collect().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Turn the body into a stream of chunks of at most `capacity` bytes.
    pub fn into_stream(self, capacity: usize) -> ReaderStream<Body> {
        ReaderStream::with_capacity(self, capacity)
    }
}

impl AsyncRead for Body {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        self.reader.as_mut().poll_read(cx, buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body").finish_non_exhaustive()
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::from_reader(io::Cursor::new(bytes))
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::from(Bytes::from(text))
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Self::from(Bytes::from_static(text.as_bytes()))
    }
}

/// Adapt an inbound axum body. Transport errors surface as `io::Error`s.
impl From<axum::body::Body> for Body {
    fn from(body: axum::body::Body) -> Self {
        let stream = body.into_data_stream().map_err(io::Error::other);
        Self::from_reader(StreamReader::new(stream))
    }
}
