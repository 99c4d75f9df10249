//! Executes request resources against the Parse server

use bridge_traits::http::HttpClient;
use core_runtime::logging::redact_headers;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::config::NetworkConfig;
use crate::error::{NetworkError, Result};
use crate::resource::{Downloadable, RequestResource, Uploadable};

/// Shared network service.
///
/// Cheap to clone; all clones share the host HTTP client. Every call is a
/// single attempt: failures are reported, never retried.
#[derive(Clone)]
pub struct NetworkService {
    http_client: Arc<dyn HttpClient>,
    config: NetworkConfig,
}

impl NetworkService {
    pub fn new(http_client: Arc<dyn HttpClient>, config: NetworkConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Fetch and decode a downloadable resource.
    pub async fn download<R: Downloadable>(&self, resource: &R) -> Result<R::Response> {
        self.execute(resource).await
    }

    /// Send an uploadable resource and decode the acknowledgement.
    pub async fn upload<R: Uploadable>(&self, resource: &R) -> Result<R::Response> {
        self.execute(resource).await
    }

    #[instrument(skip(self, resource), fields(method = resource.method().as_str()))]
    async fn execute<R: RequestResource>(&self, resource: &R) -> Result<R::Response> {
        let request = resource.to_http_request(self.config.request_timeout)?;
        debug!(
            url = %request.url,
            headers = ?redact_headers(&request.headers),
            "Sending Parse request"
        );

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            warn!(status = response.status, "Parse request failed");
            return Err(NetworkError::DataLoading {
                status_code: response.status,
                data: response.body,
            });
        }

        debug!(status = response.status, bytes = response.body.len(), "Parse request succeeded");
        resource.decode(&response.body)
    }
}

impl std::fmt::Debug for NetworkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkService")
            .field("base_url", &self.config.base_url.as_str())
            .field("request_timeout", &self.config.request_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{ConfigRequestResource, UploadFileRequestResource};
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpMethod, HttpRequest, HttpResponse};
    use bytes::Bytes;
    use mockall::mock;
    use std::collections::{BTreeMap, HashMap};
    use url::Url;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
            async fn is_connected(&self) -> bool;
        }
    }

    fn config() -> NetworkConfig {
        let mut headers = BTreeMap::new();
        headers.insert("X-Parse-Application-Id".to_string(), "osca".to_string());
        NetworkConfig::new(Url::parse("https://parse.example.com/parse").unwrap(), headers)
    }

    fn response(status: u16, body: &'static str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[tokio::test]
    async fn test_download_decodes_success() {
        let mut client = MockHttpClient::new();
        client
            .expect_execute()
            .withf(|request| {
                request.method == HttpMethod::Get
                    && request.url == "https://parse.example.com/parse/config"
                    && request.headers.get("X-Parse-Application-Id") == Some(&"osca".to_string())
            })
            .times(1)
            .returning(|_| Ok(response(200, r#"{"params":{}}"#)));

        let service = NetworkService::new(Arc::new(client), config());
        let resource =
            ConfigRequestResource::<serde_json::Value>::new(config().base_url, config().headers);

        let value = service.download(&resource).await.unwrap();
        assert_eq!(value["params"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_non_success_status_is_data_loading() {
        let mut client = MockHttpClient::new();
        client
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(403, r#"{"error":"unauthorized"}"#)));

        let service = NetworkService::new(Arc::new(client), config());
        let resource =
            ConfigRequestResource::<serde_json::Value>::new(config().base_url, config().headers);

        match service.download(&resource).await {
            Err(NetworkError::DataLoading { status_code, data }) => {
                assert_eq!(status_code, 403);
                assert_eq!(data, Bytes::from_static(br#"{"error":"unauthorized"}"#));
            }
            other => panic!("expected DataLoading, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_mapped() {
        let mut client = MockHttpClient::new();
        client
            .expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::NoConnectivity("offline".to_string())));

        let service = NetworkService::new(Arc::new(client), config());
        let resource =
            ConfigRequestResource::<serde_json::Value>::new(config().base_url, config().headers);

        assert!(matches!(
            service.download(&resource).await,
            Err(NetworkError::NoConnectivity)
        ));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_client() {
        let mut client = MockHttpClient::new();
        client.expect_execute().never();

        let service = NetworkService::new(Arc::new(client), config());
        let resource =
            UploadFileRequestResource::new(config().base_url, "defect.jpg", None, config().headers);

        assert!(matches!(
            service.upload(&resource).await,
            Err(NetworkError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_request_timeout_forwarded() {
        let mut client = MockHttpClient::new();
        client
            .expect_execute()
            .withf(|request| request.timeout == Some(std::time::Duration::from_secs(7)))
            .times(1)
            .returning(|_| Ok(response(200, r#"{"name":"a_defect.jpg","url":"https://f/a"}"#)));

        let service = NetworkService::new(
            Arc::new(client),
            config().with_request_timeout(std::time::Duration::from_secs(7)),
        );
        let resource = UploadFileRequestResource::new(
            config().base_url,
            "defect.jpg",
            Some(Bytes::from_static(b"jpeg")),
            config().headers,
        );

        let uploaded = service.upload(&resource).await.unwrap();
        assert_eq!(uploaded.name, "a_defect.jpg");
    }
}
