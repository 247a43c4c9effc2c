use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use crate::emulation::Browser;
use crate::request::Request;

mod statics;

pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Lets the caller add or modify headers on a [`Request`] right before it is sent.
///
/// Implemented for every `Fn(&mut Request)` closure and for [`Browser`], so a preset can be passed
/// anywhere a closure is expected.
pub trait HeaderDecorator {
    fn decorate(&self, request: &mut Request);
}

impl<F> HeaderDecorator for F
where
    F: Fn(&mut Request),
{
    fn decorate(&self, request: &mut Request) {
        self(request)
    }
}

impl HeaderDecorator for Browser {
    fn decorate(&self, request: &mut Request) {
        self.apply(request.headers_mut());
    }
}

/// Decorator that leaves the request untouched.
pub fn no_headers(_request: &mut Request) {}

impl Browser {
    /// The ordered `(name, value)` pairs sent by this browser profile.
    pub fn headers(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Browser::Chrome => statics::CHROME_HEADERS,
            Browser::Firefox => statics::FIREFOX_HEADERS,
        }
    }

    /// Appends the profile's headers to `headers`. Existing values are kept, so applying twice duplicates them.
    pub fn apply(self, headers: &mut HeaderMap) {
        for &(name, value) in self.headers() {
            headers.append(
                HeaderName::from_static(name),
                HeaderValue::from_static(value)
            );
        }
    }
}

/// Adds the Firefox 64 header set to the request.
pub fn apply_firefox_headers(request: &mut Request) -> &mut Request {
    Browser::Firefox.apply(request.headers_mut());
    request
}

/// Adds the Chrome 70 header set to the request.
pub fn apply_chrome_headers(request: &mut Request) -> &mut Request {
    Browser::Chrome.apply(request.headers_mut());
    request
}

/// Chains two decorators, `first` runs before `second`.
pub(crate) fn chain<'a>(first: Option<Browser>, second: impl HeaderDecorator + 'a) -> impl HeaderDecorator + 'a {
    move |request: &mut Request| {
        if let Some(browser) = first {
            browser.decorate(request);
        }
        second.decorate(request);
    }
}

/// Wraps `decorator` so the request always carries the form content type.
///
/// The form value is appended first and the caller's values are layered on top. If the caller replaced
/// or removed it, it is put back in front of whatever the caller left.
pub(crate) fn form_encoded<'a>(decorator: impl HeaderDecorator + 'a) -> impl HeaderDecorator + 'a {
    move |request: &mut Request| {
        request.headers_mut().append(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        decorator.decorate(request);
        restore_form_content_type(request.headers_mut());
    }
}

fn restore_form_content_type(headers: &mut HeaderMap) {
    if headers.get_all(CONTENT_TYPE).iter().any(|value| value == FORM_CONTENT_TYPE) {
        return;
    }

    let caller_values: Vec<HeaderValue> = headers.get_all(CONTENT_TYPE).iter().cloned().collect();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
    for value in caller_values {
        headers.append(CONTENT_TYPE, value);
    }
}
