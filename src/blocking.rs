//! Blocking versions of the [`fetcher`](crate::fetcher) functions.
//!
//! Each call performs a single round trip and blocks the current thread until the body has been read.
//! Like `reqwest::blocking`, these must not be called from within an async runtime.

use log::debug;

use crate::{
  emulation::{Browser, HeaderDecorator},
  error::Result,
  http_headers::{chain, form_encoded},
  request::{Request, NO_BODY},
  response_parsing,
};

/// See [`fetcher::execute_request`](crate::fetcher::execute_request).
pub fn execute_request<D: HeaderDecorator>(
  method: &str,
  url: &str,
  body: impl Into<Vec<u8>>,
  client: &reqwest::blocking::Client,
  decorator: D,
) -> Result<Vec<u8>> {
  let mut request = Request::new(method, url, body)?;
  decorator.decorate(&mut request);

  send(request, client)
}

/// See [`fetcher::send`](crate::fetcher::send).
pub fn send(request: Request, client: &reqwest::blocking::Client) -> Result<Vec<u8>> {
  debug!("Sending {} request to {}", request.method(), request.url());
  let url = request.url().to_string();

  let response = request.into_blocking(client).send()?;

  if response_parsing::is_gzip(response.headers()) {
    debug!("Response from {} is gzip-encoded, decompressing", url);
  }

  response_parsing::read_body_blocking(response)
}

/// See [`fetcher::get`](crate::fetcher::get).
pub fn get<D: HeaderDecorator>(url: &str, client: &reqwest::blocking::Client, decorator: D) -> Result<Vec<u8>> {
  execute_request("GET", url, NO_BODY, client, decorator)
}

/// See [`fetcher::post_form`](crate::fetcher::post_form).
pub fn post_form<D: HeaderDecorator>(
  url: &str,
  body: impl Into<Vec<u8>>,
  client: &reqwest::blocking::Client,
  decorator: D,
) -> Result<Vec<u8>> {
  execute_request("POST", url, body, client, form_encoded(decorator))
}

/// Blocking [`Fetcher`](crate::fetcher::Fetcher), built with
/// [`FetcherBuilder::build_blocking`](crate::fetcher::FetcherBuilder::build_blocking).
#[derive(Debug, Clone)]
pub struct Fetcher {
  client: reqwest::blocking::Client,
  browser: Option<Browser>,
}

impl Fetcher {
  pub(crate) fn new(client: reqwest::blocking::Client, browser: Option<Browser>) -> Self {
    Fetcher { client, browser }
  }

  pub fn client(&self) -> &reqwest::blocking::Client {
    &self.client
  }

  pub fn browser(&self) -> Option<Browser> {
    self.browser
  }

  pub fn execute<D: HeaderDecorator>(&self, method: &str, url: &str, body: impl Into<Vec<u8>>, decorator: D) -> Result<Vec<u8>> {
    execute_request(method, url, body, &self.client, chain(self.browser, decorator))
  }

  pub fn get<D: HeaderDecorator>(&self, url: &str, decorator: D) -> Result<Vec<u8>> {
    get(url, &self.client, chain(self.browser, decorator))
  }

  pub fn post_form<D: HeaderDecorator>(&self, url: &str, body: impl Into<Vec<u8>>, decorator: D) -> Result<Vec<u8>> {
    post_form(url, body, &self.client, chain(self.browser, decorator))
  }
}
