use crate::apis::base::loggable_url;
use crate::app::ports::HttpTransport;
use crate::config::HttpConfig;
use crate::error::Result;
use crate::types::{HttpMethod, RawServiceResponse, SourceRequest};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// `HttpTransport` over a shared reqwest client. Every request carries the
/// configured timeout; a timeout surfaces as a transport error.
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttp {
    async fn call(&self, request: &SourceRequest) -> Result<RawServiceResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(url = %loggable_url(&request.url), status = status.as_u16(), bytes = body.len(), "HTTP call finished");

        Ok(RawServiceResponse {
            success: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }
}
