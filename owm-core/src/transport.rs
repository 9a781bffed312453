use async_trait::async_trait;
use reqwest::{Client, Proxy};
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{config::ProxyConfig, error::TransportError};

/// Performs a GET and hands back the body text of a 2xx response.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &str, proxy: Option<&ProxyConfig>) -> Result<String, TransportError>;
}

/// `reqwest`-backed transport. A fresh client is built for every request,
/// so the connection never outlives the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

impl ReqwestTransport {
    pub fn new() -> Self {
        Self
    }

    fn client(proxy: Option<&ProxyConfig>) -> Result<Client, TransportError> {
        let mut builder = Client::builder().gzip(true).deflate(true);

        if let Some(proxy) = proxy.filter(|p| p.is_enabled()) {
            let mut route = Proxy::all(proxy.url()).map_err(TransportError::Client)?;
            if let Some(credentials) = proxy.usable_credentials() {
                route = route.basic_auth(&credentials.user, &credentials.password);
            }
            debug!(proxy = %proxy.url(), "routing request through proxy");
            builder = builder.proxy(route);
        }

        builder.build().map_err(TransportError::Client)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, proxy: Option<&ProxyConfig>) -> Result<String, TransportError> {
        let client = Self::client(proxy)?;

        let res = client.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "OpenWeatherMap returned an error response");
            return Err(TransportError::Status { status: status.as_u16(), body });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
