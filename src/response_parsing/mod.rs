use std::io::{self, BufRead, BufReader, Read};

use async_compression::tokio::bufread::GzipDecoder;
use futures::TryStreamExt;
use reqwest::header::{HeaderMap, CONTENT_ENCODING};
use tokio::io::{AsyncBufReadExt, AsyncReadExt};
use tokio_util::io::StreamReader;

use crate::error::{Error, Result};

/// Returns `true` if the response declares `Content-Encoding: gzip`.
///
/// Responses already decoded by `reqwest` (when the client has its own gzip support switched on)
/// no longer carry the header and are returned as they are.
pub fn is_gzip(headers: &HeaderMap) -> bool {
    headers.get(CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("gzip"))
}

/// Reads the whole body, decoding it on the fly if it is gzip-encoded.
///
/// Concatenated gzip members are all decoded. An empty body (`HEAD`, `204`) stays empty even if
/// the response claims to be gzip-encoded.
pub async fn read_body(response: reqwest::Response) -> Result<Vec<u8>> {
    if !is_gzip(response.headers()) {
        return Ok(response.bytes().await?.to_vec());
    }

    let stream = response
        .bytes_stream()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err));
    let reader = StreamReader::new(stream);
    tokio::pin!(reader);

    if reader.as_mut().fill_buf().await.map_err(body_read_error)?.is_empty() {
        return Ok(Vec::new());
    }

    let mut decoder = GzipDecoder::new(reader);
    decoder.multiple_members(true);

    let mut body = Vec::new();
    decoder.read_to_end(&mut body).await.map_err(body_read_error)?;
    Ok(body)
}

/// Blocking counterpart of [`read_body`].
pub fn read_body_blocking(response: reqwest::blocking::Response) -> Result<Vec<u8>> {
    if !is_gzip(response.headers()) {
        return Ok(response.bytes()?.to_vec());
    }

    let mut reader = BufReader::new(response);
    if reader.fill_buf().map_err(body_read_error)?.is_empty() {
        return Ok(Vec::new());
    }

    let mut decoder = flate2::read::MultiGzDecoder::new(reader);

    let mut body = Vec::new();
    decoder.read_to_end(&mut body).map_err(body_read_error)?;
    Ok(body)
}

/// The decoders only see `io::Error`s. Failures of the underlying connection are handed back
/// as `reqwest::Error` (or [`Error::Body`] when there is none to unwrap), everything else is a broken gzip stream.
fn body_read_error(err: io::Error) -> Error {
    let wraps_reqwest = err.get_ref()
        .is_some_and(|inner| inner.is::<reqwest::Error>());

    if wraps_reqwest {
        let kind = err.kind();
        return match err.into_inner().map(|inner| inner.downcast::<reqwest::Error>()) {
            Some(Ok(inner)) => Error::Request(*inner),
            _ => Error::Body(io::Error::new(kind, "response body stream failed")),
        };
    }

    match err.kind() {
        io::ErrorKind::TimedOut
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe => Error::Body(err),
        _ => Error::Decompression(err),
    }
}
