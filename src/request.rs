use reqwest::{header::HeaderMap, Method};
use url::Url;

use crate::{emulation::{apply_chrome_headers, apply_firefox_headers, Browser}, error::{Error, Result}};

/// Empty body, requests built with it are sent without one.
pub const NO_BODY: &[u8] = &[];

/// A request that hasn't been sent yet.
///
/// Built by [`Request::new`] or one of the preset constructors, handed to a
/// [`HeaderDecorator`](crate::emulation::HeaderDecorator) and finally consumed by
/// [`fetcher::send`](crate::fetcher::send) or [`blocking::send`](crate::blocking::send).
#[derive(Debug, Clone)]
pub struct Request {
  method: Method,
  url: Url,
  headers: HeaderMap,
  body: Option<Vec<u8>>,
}

impl Request {
  /// Builds a request with no headers.
  ///
  /// An empty `body` means the request is sent without one. An empty `method` is treated as `GET`.
  pub fn new(method: &str, url: &str, body: impl Into<Vec<u8>>) -> Result<Self> {
    let method = parse_method(method)?;
    let url = parse_url(url)?;
    let body = body.into();

    Ok(Request {
      method,
      url,
      headers: HeaderMap::new(),
      body: if body.is_empty() { None } else { Some(body) },
    })
  }

  pub fn method(&self) -> &Method {
    &self.method
  }

  pub fn url(&self) -> &Url {
    &self.url
  }

  pub fn headers(&self) -> &HeaderMap {
    &self.headers
  }

  pub fn headers_mut(&mut self) -> &mut HeaderMap {
    &mut self.headers
  }

  pub fn body(&self) -> Option<&[u8]> {
    self.body.as_deref()
  }

  pub(crate) fn into_reqwest(self, client: &reqwest::Client) -> reqwest::RequestBuilder {
    let request = client
      .request(self.method, self.url)
      .headers(self.headers);

    match self.body {
      Some(body) => request.body(body),
      None => request
    }
  }

  pub(crate) fn into_blocking(self, client: &reqwest::blocking::Client) -> reqwest::blocking::RequestBuilder {
    let request = client
      .request(self.method, self.url)
      .headers(self.headers);

    match self.body {
      Some(body) => request.body(body),
      None => request
    }
  }
}

fn parse_method(method: &str) -> Result<Method> {
  if method.is_empty() {
    return Ok(Method::GET);
  }

  Method::from_bytes(method.as_bytes())
    .map_err(|_| Error::InvalidMethod(method.to_string()))
}

fn parse_url(url: &str) -> Result<Url> {
  let url = Url::parse(url)?;

  if url.host_str().is_none() {
    return Err(Error::UrlMissingHostname(url.to_string()));
  }

  match url.scheme() {
    "http" | "https" => Ok(url),
    protocol => Err(Error::UrlProtocol(protocol.to_string())),
  }
}

/// Builds a request and applies the header preset of `browser` to it.
///
/// The preset is only applied once the request has been built successfully.
pub fn new_browser_request(browser: Browser, method: &str, url: &str, body: impl Into<Vec<u8>>) -> Result<Request> {
  let mut request = Request::new(method, url, body)?;
  match browser {
    Browser::Firefox => apply_firefox_headers(&mut request),
    Browser::Chrome => apply_chrome_headers(&mut request),
  };

  Ok(request)
}

/// `GET` request with the Firefox headers.
pub fn new_firefox_get(url: &str) -> Result<Request> {
  new_browser_request(Browser::Firefox, "GET", url, NO_BODY)
}

/// `POST` request with the Firefox headers.
pub fn new_firefox_post(url: &str, body: impl Into<Vec<u8>>) -> Result<Request> {
  new_browser_request(Browser::Firefox, "POST", url, body)
}

/// `GET` request with the Chrome headers.
pub fn new_chrome_get(url: &str) -> Result<Request> {
  new_browser_request(Browser::Chrome, "GET", url, NO_BODY)
}

/// `POST` request with the Chrome headers.
pub fn new_chrome_post(url: &str, body: impl Into<Vec<u8>>) -> Result<Request> {
  new_browser_request(Browser::Chrome, "POST", url, body)
}
