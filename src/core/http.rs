use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING};
use reqwest::Client;
use tracing::debug;

use crate::core::error::{PackError, PackResult};
use crate::core::modplatform::index::{HttpMethod, RequestDescriptor};
use crate::core::state::ClientSettings;

const API_KEY_HEADER: &str = "x-api-key";

pub fn build_http_client(settings: &ClientSettings) -> PackResult<Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));
    default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(key) = &settings.api_key {
        let value = HeaderValue::from_str(key)
            .map_err(|_| PackError::Other("API key is not a valid header value".into()))?;
        default_headers.insert(API_KEY_HEADER, value);
    }

    Ok(Client::builder()
        .user_agent(settings.user_agent.as_str())
        .default_headers(default_headers)
        .build()?)
}

/// Issues one request and hands back the raw response body.
///
/// Retries, timeouts and cancellation belong to the implementation.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn fetch(&self, request: &RequestDescriptor) -> PackResult<Vec<u8>>;
}

/// `HttpFetch` backed by a shared reqwest client.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_settings(settings: &ClientSettings) -> PackResult<Self> {
        Ok(Self::new(build_http_client(settings)?))
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn fetch(&self, request: &RequestDescriptor) -> PackResult<Vec<u8>> {
        debug!("{:?} {}", request.method, request.url);

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PackError::Api {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
