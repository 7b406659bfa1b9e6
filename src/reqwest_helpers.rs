use http::Extensions;
use log::{debug, error};
use reqwest::header::{HeaderValue, CACHE_CONTROL};
use reqwest::{Client, Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware, Next};
use std::time::Instant;

pub fn create_client() -> ClientWithMiddleware {
    let reqwest_client = Client::builder().build().unwrap();

    ClientBuilder::new(reqwest_client)
        .with(CacheBypassMiddleware)
        .with(ErrorLoggingMiddleware)
        .build()
}

/// The exchange endpoint sits behind a CDN; a lookup must see the latest
/// published snapshot, not a cached copy.
struct CacheBypassMiddleware;

#[async_trait::async_trait]
impl Middleware for CacheBypassMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        req.headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        next.run(req, extensions).await
    }
}

struct ErrorLoggingMiddleware;

#[async_trait::async_trait]
impl Middleware for ErrorLoggingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let start = Instant::now();
        let method = req.method().clone();
        let url = req.url().clone();

        let result = next.run(req, extensions).await;

        let duration = start.elapsed();

        match &result {
            Ok(resp) if !resp.status().is_success() => {
                error!(
                    "Request failed: {} {} - Status: {}, Duration: {:?}",
                    method,
                    url,
                    resp.status(),
                    duration
                );
            }
            Err(e) => {
                error!(
                    "Request error: {} {} - Error: {}, Duration: {:?}",
                    method, url, e, duration
                );
            }
            _ => {
                debug!(
                    "Request succeeded: {} {} - Duration: {:?}",
                    method, url, duration
                );
            }
        }

        result
    }
}
