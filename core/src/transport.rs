//! Blocking `HttpClient` implementation on top of `ureq`.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// Executes `HttpRequest` values over the network.
///
/// 4xx/5xx responses are returned as data so `DomainRecordClient::parse_*`
/// can interpret them. The agent is safe to share across threads.
pub struct UreqClient {
    agent: ureq::Agent,
    token: Option<SecretString>,
}

impl UreqClient {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self {
            agent,
            token: config
                .token
                .as_ref()
                .map(|t| SecretString::from(t.expose_secret().to_string())),
        }
    }

    fn headers(&self, request: &HttpRequest) -> Vec<(String, String)> {
        let mut headers = request.headers.clone();
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {}", token.expose_secret())));
        }
        headers
    }
}

impl fmt::Debug for UreqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl HttpClient for UreqClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let headers = self.headers(&request);

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.path);
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(&request.path);
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if request.method == HttpMethod::Post {
                    self.agent.post(&request.path)
                } else {
                    self.agent.put(&request.path)
                };
                for (name, value) in &headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        trace!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}
