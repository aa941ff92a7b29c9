use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use skyact_config::EngineConfig;
use skyact_core::{ApiRequest, ApiResponse, HttpMethod};
use std::time::{Duration, Instant};

use crate::error::{ConnectorError, ConnectorResult};

/// Performs one request and returns the raw response.
///
/// Implementations must not retry: a failure is final for the step.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: &ApiRequest) -> ConnectorResult<ApiResponse>;
}

/// Blocking `reqwest` transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeout and user agent
    pub fn new(config: &EngineConfig) -> ConnectorResult<Self> {
        let mut headers = HeaderMap::new();
        // The API answers in XML unless JSON is asked for explicitly
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| ConnectorError::InvalidConfig(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &ApiRequest) -> ConnectorResult<ApiResponse> {
        let start = Instant::now();
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let response = self
            .client
            .request(Self::method(request.method), &request.url)
            .header(AUTHORIZATION, request.authorization.expose())
            .send()
            .map_err(|e| {
                tracing::warn!(url = %request.url, error = %e, "Request could not complete");
                ConnectorError::Http(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text()?;

        tracing::debug!(
            url = %request.url,
            status = status,
            duration_ms = start.elapsed().as_millis() as u64,
            body_len = body.len(),
            "Received response"
        );

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use skyact_core::Credentials;

    fn transport() -> ReqwestTransport {
        ReqwestTransport::new(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_sends_method_auth_and_json_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path("/configurations/555")
                .header("authorization", "Basic dXNlcjprZXk=")
                .header("accept", "application/json");
            then.status(200).body(r#"{"id":"555"}"#);
        });

        let response = transport()
            .execute(&ApiRequest {
                method: HttpMethod::Delete,
                url: server.url("/configurations/555"),
                authorization: Credentials::new("Basic dXNlcjprZXk="),
            })
            .unwrap();

        mock.assert();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"id":"555"}"#);
    }

    #[test]
    fn test_error_status_is_not_a_transport_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/projects");
            then.status(401).body(r#"{"error":"Unauthorized"}"#);
        });

        let response = transport()
            .execute(&ApiRequest {
                method: HttpMethod::Get,
                url: server.url("/projects"),
                authorization: Credentials::new("Basic bad"),
            })
            .unwrap();

        assert_eq!(response.status, 401);
    }

    #[test]
    fn test_connection_refused_is_http_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let err = transport()
            .execute(&ApiRequest {
                method: HttpMethod::Get,
                url: format!("http://127.0.0.1:{}/projects", port),
                authorization: Credentials::new("t"),
            })
            .unwrap_err();

        assert!(matches!(err, ConnectorError::Http(_)));
    }
}
