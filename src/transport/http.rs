use super::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::config::ApiConfig;
use async_trait::async_trait;

/// Production transport over a shared reqwest client.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().timeout(config.timeout);

        if config.danger_accept_invalid_certs {
            // Inherited upstream certificate issue; see
            // ApiConfig::danger_accept_invalid_certs before touching this.
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req = self.client.get(&request.url);
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: request.url,
            });
        }

        let body = response.text().await?;
        Ok(HttpResponse {
            status: status.as_u16(),
            body,
        })
    }
}
