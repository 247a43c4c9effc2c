use httptool::emulation::Browser;
use httptool::fetcher::Fetcher;

 #[tokio::main]
 async fn main() {
    let fetcher = Fetcher::builder()
        .with_browser(Browser::Firefox)
        .build()
        .expect("default settings should always build");

    let response = fetcher.get("https://example.com", httptool::emulation::no_headers).await;

    match response {
        Ok(body) => {
            println!("{}", String::from_utf8_lossy(&body));
        }
        Err(e) => {
            println!("{:#?}", e);
        }
    }
 }
