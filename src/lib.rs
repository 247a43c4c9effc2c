//! # httptool | HTTP requests with browser-like headers
//!
//! `httptool` is a small helper library on top of `reqwest` for sending requests with custom headers
//! and reading their (transparently gunzipped) bodies. It also ships hardcoded header presets
//! that make a request look like it was sent by a desktop Firefox or Chrome.
//!
//! ```rust,no_run
//! use httptool::emulation::Browser;
//! use httptool::fetcher;
//!
//! #[tokio::main]
//! async fn main() {
//!    let client = reqwest::Client::new();
//!    let body = fetcher::get("https://example.com", &client, Browser::Firefox).await.unwrap();
//!
//!    println!("{}", String::from_utf8_lossy(&body));
//! }
//! ```
//!
//! ### Header decorators
//!
//! Every request passes through a [`HeaderDecorator`](emulation::HeaderDecorator) right before it is sent.
//! Any `Fn(&mut Request)` closure is a decorator, and so is a [`Browser`](emulation::Browser) value,
//! which appends that browser's header preset.
//!
//! ### Blocking usage
//!
//! The [`blocking`] module mirrors [`fetcher`] on top of `reqwest::blocking`. Use it outside of async runtimes.
//!
//! ### Compressed responses
//!
//! Bodies of responses with `Content-Encoding: gzip` are decompressed before they are returned.
//! A body that claims to be gzip but isn't fails with [`Error::Decompression`](error::Error::Decompression).

#![cfg_attr(not(test), deny(unused_crate_dependencies))]
mod http_headers;
mod response_parsing;

/// Async request helpers and the [`Fetcher`](fetcher::Fetcher) client wrapper.
pub mod fetcher;

/// Blocking request helpers.
pub mod blocking;

/// Building requests, with or without a browser preset.
pub mod request;

pub mod error;

/// Contains browser emulation-related types and functions.
pub mod emulation {
  pub use crate::http_headers::{apply_chrome_headers, apply_firefox_headers, no_headers, HeaderDecorator};

  /// The `Browser` enum is used to specify the browser that should be impersonated.
  ///
  /// It can be passed as a [`HeaderDecorator`] to any request helper, or to
  /// [`FetcherBuilder::with_browser`](crate::fetcher::FetcherBuilder::with_browser)
  /// to use the browser emulation with every request of the built [`Fetcher`](crate::fetcher::Fetcher).
  #[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
  pub enum Browser {
    /// Chrome 70 on macOS.
    #[default]
    Chrome,
    /// Firefox 64 on macOS.
    Firefox,
  }
}

pub use error::{Error, Result};
pub use request::Request;
