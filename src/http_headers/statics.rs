// Header names are lowercase, `HeaderName::from_static` rejects anything else.

/// Firefox 64 on macOS 10.14.
pub static FIREFOX_HEADERS: &'static [(&'static str, &'static str)] = &[
    ("user-agent", "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.14; rv:64.0) Gecko/20100101 Firefox/64.0"),
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    ("accept-language", "ru"),
    ("accept-encoding", "gzip, deflate"),
    ("dnt", "1"),
    ("connection", "keep-alive"),
];

/// Chrome 70 on macOS 10.14.
pub static CHROME_HEADERS: &'static [(&'static str, &'static str)] = &[
    ("connection", "keep-alive"),
    ("cache-control", "max-age=0"),
    ("upgrade-insecure-requests", "1"),
    ("user-agent", "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_0) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.102 Safari/537.36"),
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    ("accept-language", "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7"),
    ("accept-encoding", "gzip, deflate"),
];
