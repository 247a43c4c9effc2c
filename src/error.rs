use thiserror::Error;

/// Result type alias used throughout `httptool`.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can be returned when building or sending a request.
///
/// The first four variants are request-construction failures and are returned before
/// anything touches the network. `Request` wraps the `reqwest::Error` exactly as the client reported it.
#[derive(Error, Debug)]
pub enum Error {
  /// The HTTP method contains characters that are not allowed in a method token.
  #[error("invalid HTTP method: {0:?}")]
  InvalidMethod(String),

  /// The URL couldn't be parsed.
  #[error("invalid URL: {0}")]
  UrlParsing(#[from] url::ParseError),

  /// The URL is missing the hostname.
  #[error("URL {0} is missing a hostname")]
  UrlMissingHostname(String),

  /// The URL uses an unsupported protocol.
  #[error("unsupported URL scheme: {0}")]
  UrlProtocol(String),

  /// `reqwest::Error` variant. See the nested error for more details.
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// The connection failed while the body was being read, and `reqwest` didn't hand back its own error.
  #[error("failed to read response body: {0}")]
  Body(#[source] std::io::Error),

  /// The response declared `Content-Encoding: gzip`, but its body couldn't be decoded.
  #[error("failed to decompress gzip response body: {0}")]
  Decompression(#[source] std::io::Error),

  /// The [`FetcherBuilder`](crate::fetcher::FetcherBuilder) settings couldn't be turned into a client.
  #[error("invalid client configuration: {0}")]
  Config(String),
}

impl Error {
  /// Returns `true` if the request couldn't be built (bad method or URL).
  pub fn is_construction(&self) -> bool {
    matches!(
      self,
      Error::InvalidMethod(_) | Error::UrlParsing(_) | Error::UrlMissingHostname(_) | Error::UrlProtocol(_)
    )
  }

  /// Returns `true` if the request was built, but sending it or reading the response failed.
  pub fn is_transport(&self) -> bool {
    matches!(self, Error::Request(_) | Error::Body(_))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_errors_are_construction_errors() {
    let err: Error = url::Url::parse("not a url").unwrap_err().into();

    assert!(err.is_construction());
    assert!(!err.is_transport());
  }

  #[test]
  fn decompression_error_keeps_its_source() {
    let err = Error::Decompression(std::io::Error::new(std::io::ErrorKind::InvalidData, "bad header"));

    assert!(!err.is_construction());
    assert!(std::error::Error::source(&err).is_some());
    assert!(err.to_string().contains("bad header"));
  }
}
