use std::time::Duration;
use log::debug;
use reqwest::redirect::Policy;

use crate::{
  emulation::{Browser, HeaderDecorator},
  error::{Error, Result},
  http_headers::{chain, form_encoded},
  request::{Request, NO_BODY},
  response_parsing,
};

/// Builds a request, lets `decorator` adjust it, sends it through `client` and returns the response body.
///
/// The body is only attached if `body` is non-empty. Gzip-encoded responses are decompressed
/// before they are returned. Construction and transport errors are returned as they are, there are no retries.
pub async fn execute_request<D: HeaderDecorator>(
  method: &str,
  url: &str,
  body: impl Into<Vec<u8>>,
  client: &reqwest::Client,
  decorator: D,
) -> Result<Vec<u8>> {
  let mut request = Request::new(method, url, body)?;
  decorator.decorate(&mut request);

  send(request, client).await
}

/// Sends an already built [`Request`], e.g. one returned by [`new_firefox_get`](crate::request::new_firefox_get).
pub async fn send(request: Request, client: &reqwest::Client) -> Result<Vec<u8>> {
  debug!("Sending {} request to {}", request.method(), request.url());
  let url = request.url().to_string();

  let response = request.into_reqwest(client).send().await?;

  if response_parsing::is_gzip(response.headers()) {
    debug!("Response from {} is gzip-encoded, decompressing", url);
  }

  response_parsing::read_body(response).await
}

/// Sends a `GET` request without a body.
pub async fn get<D: HeaderDecorator>(url: &str, client: &reqwest::Client, decorator: D) -> Result<Vec<u8>> {
  execute_request("GET", url, NO_BODY, client, decorator).await
}

/// Sends a `POST` request with `Content-Type: application/x-www-form-urlencoded`.
///
/// `decorator` runs after the content type is set and can add more headers on top of it.
/// The form content type stays on the request even if the decorator tries to replace it.
pub async fn post_form<D: HeaderDecorator>(
  url: &str,
  body: impl Into<Vec<u8>>,
  client: &reqwest::Client,
  decorator: D,
) -> Result<Vec<u8>> {
  execute_request("POST", url, body, client, form_encoded(decorator)).await
}

/// Customizes the behavior of the built client when following redirects.
#[derive(Debug, Clone)]
pub enum RedirectBehavior {
  /// Follow up to `usize` redirects.
  ///
  /// If the number of redirects is exceeded, the request fails with [`Error::Request`].
  FollowRedirect(usize),
  /// Don't follow any redirects, the body of the `3xx` response is returned.
  ManualRedirect,
}

/// A builder struct used to create a new [`Fetcher`] (or [`blocking::Fetcher`](crate::blocking::Fetcher)).
///
/// ### Example
/// ```rust,no_run
/// use std::time::Duration;
/// use httptool::{emulation::Browser, fetcher::Fetcher};
///
/// # async fn run() -> httptool::error::Result<()> {
/// let fetcher = Fetcher::builder()
///   .with_browser(Browser::Firefox)
///   .with_default_timeout(Duration::from_secs(10))
///   .build()?;
///
/// let body = fetcher.get("https://example.com", httptool::emulation::no_headers).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FetcherBuilder {
  browser: Option<Browser>,
  proxy_url: String,
  request_timeout: Duration,
  redirect: RedirectBehavior,
  native_decompression: bool,
}

impl Default for FetcherBuilder {
  fn default() -> Self {
    FetcherBuilder {
      browser: None,
      proxy_url: String::new(),
      request_timeout: Duration::from_secs(30),
      redirect: RedirectBehavior::FollowRedirect(10),
      native_decompression: false,
    }
  }
}

impl FetcherBuilder {
  /// Sets the browser whose header preset is added to every request, before the caller's decorator runs.
  pub fn with_browser(mut self, browser: Browser) -> Self {
    self.browser = Some(browser);
    self
  }

  /// Sets the proxy URL to use for requests.
  pub fn with_proxy(mut self, proxy_url: String) -> Self {
    self.proxy_url = proxy_url;
    self
  }

  /// Sets the timeout for requests. Defaults to 30 seconds.
  pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
    self.request_timeout = timeout;
    self
  }

  /// Sets the desired redirect behavior. By default, up to 10 redirects are followed.
  pub fn with_redirect(mut self, behavior: RedirectBehavior) -> Self {
    self.redirect = behavior;
    self
  }

  /// If set to `true`, `reqwest` decodes compressed bodies itself.
  ///
  /// Off by default, gzip bodies are then decoded by this crate.
  pub fn with_native_decompression(mut self, native_decompression: bool) -> Self {
    self.native_decompression = native_decompression;
    self
  }

  fn redirect_policy(&self) -> Policy {
    match self.redirect {
      RedirectBehavior::FollowRedirect(max) => Policy::limited(max),
      RedirectBehavior::ManualRedirect => Policy::none(),
    }
  }

  fn proxy(&self) -> Result<Option<reqwest::Proxy>> {
    if self.proxy_url.is_empty() {
      return Ok(None);
    }

    reqwest::Proxy::all(&self.proxy_url)
      .map(Some)
      .map_err(|err| Error::Config(format!("invalid proxy URL {:?}: {}", self.proxy_url, err)))
  }

  /// Builds the [`Fetcher`] instance.
  pub fn build(self) -> Result<Fetcher> {
    let mut client = reqwest::Client::builder()
      .timeout(self.request_timeout)
      .redirect(self.redirect_policy());

    if !self.native_decompression {
      client = client.no_gzip().no_deflate().no_brotli().no_zstd();
    }

    if let Some(proxy) = self.proxy()? {
      client = client.proxy(proxy);
    }

    let client = client.build()
      .map_err(|err| Error::Config(err.to_string()))?;

    Ok(Fetcher { client, browser: self.browser })
  }

  /// Builds a [`blocking::Fetcher`](crate::blocking::Fetcher) with the same settings.
  pub fn build_blocking(self) -> Result<crate::blocking::Fetcher> {
    let mut client = reqwest::blocking::Client::builder()
      .timeout(self.request_timeout)
      .redirect(self.redirect_policy());

    if !self.native_decompression {
      client = client.no_gzip().no_deflate().no_brotli().no_zstd();
    }

    if let Some(proxy) = self.proxy()? {
      client = client.proxy(proxy);
    }

    let client = client.build()
      .map_err(|err| Error::Config(err.to_string()))?;

    Ok(crate::blocking::Fetcher::new(client, self.browser))
  }
}

/// Owns a `reqwest::Client` and, optionally, the browser to impersonate.
///
/// To create a new [`Fetcher`] instance, use the [`Fetcher::builder()`](FetcherBuilder) method.
#[derive(Debug, Clone)]
pub struct Fetcher {
  client: reqwest::Client,
  browser: Option<Browser>,
}

impl Fetcher {
  pub fn builder() -> FetcherBuilder {
    FetcherBuilder::default()
  }

  pub fn client(&self) -> &reqwest::Client {
    &self.client
  }

  pub fn browser(&self) -> Option<Browser> {
    self.browser
  }

  pub async fn execute<D: HeaderDecorator>(&self, method: &str, url: &str, body: impl Into<Vec<u8>>, decorator: D) -> Result<Vec<u8>> {
    execute_request(method, url, body, &self.client, chain(self.browser, decorator)).await
  }

  pub async fn get<D: HeaderDecorator>(&self, url: &str, decorator: D) -> Result<Vec<u8>> {
    get(url, &self.client, chain(self.browser, decorator)).await
  }

  pub async fn post_form<D: HeaderDecorator>(&self, url: &str, body: impl Into<Vec<u8>>, decorator: D) -> Result<Vec<u8>> {
    post_form(url, body, &self.client, chain(self.browser, decorator)).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder_defaults() {
    let builder = FetcherBuilder::default();

    assert_eq!(builder.request_timeout, Duration::from_secs(30));
    assert!(builder.browser.is_none());
    assert!(!builder.native_decompression);
    assert!(matches!(builder.redirect, RedirectBehavior::FollowRedirect(10)));
  }

  #[test]
  fn invalid_proxy_is_a_config_error() {
    let err = Fetcher::builder()
      .with_proxy(String::from("not a proxy url"))
      .build()
      .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
  }

  #[test]
  fn builder_keeps_the_browser() {
    let fetcher = Fetcher::builder()
      .with_browser(Browser::Chrome)
      .with_redirect(RedirectBehavior::ManualRedirect)
      .build()
      .unwrap();

    assert_eq!(fetcher.browser(), Some(Browser::Chrome));
  }

  #[tokio::test]
  async fn construction_errors_never_reach_the_network() {
    let client = reqwest::Client::new();
    let err = get("ftp://example.test/file", &client, crate::emulation::no_headers).await.unwrap_err();

    assert!(err.is_construction());
  }
}
