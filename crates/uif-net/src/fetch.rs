//! HTTP transport
//!
//! Fetches `<base>/<tag>.<ext>`. Any non-2xx status is treated as an
//! absent resource, not an error.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use reqwest::StatusCode;
use url::Url;

use crate::{FetchResult, NetError, ResourceLayout, ResourcePath, TextFetcher};

const USER_AGENT: &str = concat!("uif/", env!("CARGO_PKG_VERSION"));

/// Fetches component resources over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base: Url,
    layout: ResourceLayout,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher rooted at `base` (e.g. `https://host/components/`)
    pub fn new(base: &str) -> Result<Self, NetError> {
        Self::with_layout(base, ResourceLayout::default())
    }

    pub fn with_layout(base: &str, layout: ResourceLayout) -> Result<Self, NetError> {
        let mut base = Url::parse(base).map_err(|e| NetError::InvalidUrl(format!("{base}: {e}")))?;
        // Url::join drops the last segment unless the base ends in a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;
        Ok(Self { base, layout, client })
    }

    /// URL a resource resolves to
    pub fn url_for(&self, path: &ResourcePath) -> Result<Url, NetError> {
        let file = path.file_name(&self.layout);
        self.base
            .join(&file)
            .map_err(|e| NetError::InvalidUrl(format!("{file}: {e}")))
    }
}

impl TextFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, path: &'a ResourcePath) -> LocalBoxFuture<'a, FetchResult> {
        async move {
            let url = self.url_for(path)?;
            let client = self.client.clone();
            tracing::debug!("GET {}", url);

            smol::unblock(move || {
                let response = client
                    .get(url.clone())
                    .send()
                    .map_err(|e| NetError::Network(e.to_string()))?;
                let status = response.status();
                let body = body_for(status, || response.text());
                if let Ok(None) = body {
                    tracing::debug!("{} -> {}, treating as absent", url, status.as_u16());
                }
                body
            })
            .await
        }
        .boxed_local()
    }
}

/// Only a 2xx response carries a resource; any other status is absence
fn body_for(status: StatusCode, read: impl FnOnce() -> reqwest::Result<String>) -> FetchResult {
    if !status.is_success() {
        return Ok(None);
    }
    read().map(Some).map_err(|e| NetError::Network(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceKind;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Answer one request with `status` and `body`, returning the base URL
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/")
    }

    /// Fetcher for a loopback server, bypassing any proxy from the environment
    fn local_fetcher(base: &str) -> HttpFetcher {
        HttpFetcher {
            client: reqwest::blocking::Client::builder().no_proxy().build().unwrap(),
            ..HttpFetcher::new(base).unwrap()
        }
    }

    #[test]
    fn test_body_for_status() {
        assert_eq!(body_for(StatusCode::OK, || Ok("x".to_string())).unwrap(), Some("x".to_string()));
        assert_eq!(body_for(StatusCode::NOT_FOUND, || Ok("nope".to_string())).unwrap(), None);
        assert_eq!(body_for(StatusCode::INTERNAL_SERVER_ERROR, || Ok(String::new())).unwrap(), None);
        assert_eq!(body_for(StatusCode::MOVED_PERMANENTLY, || Ok(String::new())).unwrap(), None);
    }

    #[test]
    fn test_fetch_success_body() {
        let fetcher = local_fetcher(&serve_once("200 OK", "<b>hi</b>"));
        let path = ResourcePath::new("navbar", ResourceKind::Markup);
        let text = smol::block_on(fetcher.fetch(&path)).unwrap();
        assert_eq!(text.as_deref(), Some("<b>hi</b>"));
    }

    #[test]
    fn test_fetch_not_found_is_absent() {
        let fetcher = local_fetcher(&serve_once("404 Not Found", "missing"));
        let path = ResourcePath::new("navbar", ResourceKind::Style);
        assert_eq!(smol::block_on(fetcher.fetch(&path)).unwrap(), None);
    }

    #[test]
    fn test_fetch_server_error_is_absent() {
        let fetcher = local_fetcher(&serve_once("500 Internal Server Error", ""));
        let path = ResourcePath::new("navbar", ResourceKind::Behavior);
        assert_eq!(smol::block_on(fetcher.fetch(&path)).unwrap(), None);
    }

    #[test]
    fn test_url_for_appends_slash() {
        let fetcher = HttpFetcher::new("https://example.com/components").unwrap();
        let url = fetcher.url_for(&ResourcePath::new("navbar", ResourceKind::Style)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/components/navbar.css");
    }

    #[test]
    fn test_url_for_root_base() {
        let fetcher = HttpFetcher::new("http://localhost:8080/").unwrap();
        let url = fetcher.url_for(&ResourcePath::new("veggie-form", ResourceKind::Behavior)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/veggie-form.js");
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(HttpFetcher::new("not a url"), Err(NetError::InvalidUrl(_))));
    }
}
