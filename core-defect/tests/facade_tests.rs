//! Defect facade against a mocked Parse backend

use async_trait::async_trait;
use bridge_desktop::{QueuedMainScheduler, SqliteSettingsStore};
use bridge_traits::analytics::{AnalyticsEvent, AnalyticsSink};
use bridge_traits::bundle::StaticBundleLocator;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use bridge_traits::storage::SettingsStore;
use bytes::Bytes;
use core_defect::{
    DefectDependencies, DefectError, DefectModule, FormData, ParseGeoPoint, BUNDLE_PREFIX,
    SESSION_TOKEN_HEADER, SESSION_TOKEN_KEY,
};
use core_network::{NetworkConfig, NetworkService};
use mockall::mock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

mock! {
    HttpClient {}

    #[async_trait]
    impl HttpClient for HttpClient {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        async fn is_connected(&self) -> bool;
    }
}

mock! {
    Analytics {}

    #[async_trait]
    impl AnalyticsSink for Analytics {
        async fn track(&self, event: AnalyticsEvent) -> BridgeResult<()>;
    }
}

const BASE_URL: &str = "https://parse-dev.example.org/parse";
const TOKEN: &str = "r:6df7e90b7f84cdddc71d6a330636d93b";

fn network_config(base_url: &str) -> NetworkConfig {
    let headers = [
        ("X-Parse-Application-Id".to_string(), "osca".to_string()),
        ("X-Parse-Client-Key".to_string(), "client-key".to_string()),
    ]
    .into_iter()
    .collect();
    NetworkConfig::new(Url::parse(base_url).unwrap(), headers)
}

fn bundles() -> StaticBundleLocator {
    StaticBundleLocator::new().with_bundle(BUNDLE_PREFIX, "/opt/osca/bundles/de.osca.defect")
}

fn json(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
        body: Bytes::from(body.to_string()),
    }
}

async fn store_with_token(token: Option<&str>) -> Arc<dyn SettingsStore> {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    if let Some(token) = token {
        store.set_string(SESSION_TOKEN_KEY, token).await.unwrap();
    }
    Arc::new(store)
}

async fn dependencies(client: impl HttpClient + 'static) -> DefectDependencies {
    let service = NetworkService::new(Arc::new(client), network_config(BASE_URL));
    DefectDependencies::new(service, store_with_token(Some(TOKEN)).await)
}

async fn module(client: MockHttpClient) -> DefectModule {
    DefectModule::create(dependencies(client).await, &bundles())
}

fn sample_form() -> FormData {
    FormData::new()
        .with_name("Erika Mustermann")
        .with_email("erika@example.org")
        .with_address("Grünewalder Str. 29")
        .with_postal_code("42657")
        .with_city("Solingen")
        .with_message("Pothole on the cycle lane")
        .with_contact_id("c0ntact01")
        .with_image_bytes(&[0xff, 0xd8, 0xff, 0xe0])
        .with_geopoint(ParseGeoPoint::new(51.161964, 7.079082))
}

#[tokio::test]
async fn test_module_diagnostics_and_bundle() {
    let module = module(MockHttpClient::new()).await;

    assert_eq!(module.version(), "1.0.4");
    assert_eq!(module.bundle_prefix(), "de.osca.defect");
    assert_eq!(DefectModule::bundle().identifier(), "de.osca.defect");
}

#[tokio::test]
#[should_panic(expected = "Module bundle not initialized!")]
async fn test_missing_bundle_is_fatal() {
    let deps = dependencies(MockHttpClient::new()).await;

    DefectModule::create(deps, &StaticBundleLocator::new());
}

#[tokio::test]
async fn test_fetch_one_contact() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .withf(|request| {
            request.method == HttpMethod::Get
                && request.url == format!("{}/classes/DefectFormContact?limit=1", BASE_URL)
                && request.headers.get(SESSION_TOKEN_HEADER).map(String::as_str) == Some(TOKEN)
                && request.headers.get("X-Parse-Client-Key").map(String::as_str)
                    == Some("client-key")
        })
        .times(1)
        .returning(|_| {
            Ok(json(
                200,
                r#"{"results":[{
                    "objectId":"c0ntact01",
                    "createdAt":"2022-01-24T10:00:00.000Z",
                    "updatedAt":"2023-01-23T08:30:00.000Z",
                    "email":"tiefbau@example.org",
                    "emailSubject":"Schadensmeldung",
                    "title":"Straßenschäden",
                    "position":1
                }]}"#,
            ))
        });
    let module = module(client).await;

    let contacts = module
        .get_defect_form_contacts(1, BTreeMap::new())
        .await
        .unwrap();

    assert_eq!(contacts.len(), 1);
    let contact = &contacts[0];
    assert!(!contact.object_id().unwrap().is_empty());
    assert!(contact.created_at().is_some());
    assert_eq!(contact.email.as_deref(), Some("tiefbau@example.org"));
    assert_eq!(contact.email_subject.as_deref(), Some("Schadensmeldung"));
    assert_eq!(contact.title.as_deref(), Some("Straßenschäden"));
    assert_eq!(contact.position, Some(1));
}

#[tokio::test]
async fn test_limit_argument_overrides_query_limit() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .withf(|request| {
            request.url
                == format!(
                    "{}/classes/DefectFormContact?limit=1000&order=position",
                    BASE_URL
                )
        })
        .times(1)
        .returning(|_| Ok(json(200, r#"{"results":[]}"#)));
    let module = module(client).await;

    let query = BTreeMap::from([
        ("limit".to_string(), "5".to_string()),
        ("order".to_string(), "position".to_string()),
    ]);
    let contacts = module.get_defect_form_contacts(1000, query).await.unwrap();

    assert!(contacts.is_empty());
}

#[tokio::test]
async fn test_contacts_keep_server_order() {
    let mut client = MockHttpClient::new();
    client.expect_execute().times(1).returning(|_| {
        Ok(json(
            200,
            r#"{"results":[{"objectId":"b","position":2},{"objectId":"a","position":1}]}"#,
        ))
    });
    let module = module(client).await;

    let contacts = module.get_all_defect_form_contacts().await.unwrap();

    let ids: Vec<_> = contacts.iter().filter_map(|c| c.object_id()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn test_no_token_means_no_session_header() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .withf(|request| !request.headers.contains_key(SESSION_TOKEN_HEADER))
        .times(1)
        .returning(|_| Ok(json(200, r#"{"params":{}}"#)));
    let service = NetworkService::new(Arc::new(client), network_config(BASE_URL));
    let module = DefectModule::create(
        DefectDependencies::new(service, store_with_token(None).await),
        &bundles(),
    );

    assert!(module.get_parse_config_params().await.is_ok());
}

#[tokio::test]
async fn test_config_params() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .withf(|request| request.url == format!("{}/config", BASE_URL))
        .times(1)
        .returning(|_| {
            Ok(json(
                200,
                r#"{"params":{"privacyText":"Ihre Daten bleiben bei uns."},"masterKeyOnly":{}}"#,
            ))
        });
    let module = module(client).await;

    let config = module.get_parse_config_params().await.unwrap();

    assert_eq!(config.privacy_text(), Some("Ihre Daten bleiben bei uns."));
}

#[tokio::test]
async fn test_put_defect_returns_object_id() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .withf(|request| {
            let body: serde_json::Value =
                serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
            request.method == HttpMethod::Post
                && request.url == format!("{}/classes/DefectFormData", BASE_URL)
                && request.headers.get("Content-Type").map(String::as_str)
                    == Some("application/json")
                && body["contactId"] == "c0ntact01"
                && body["geopoint"]["__type"] == "GeoPoint"
                && body.get("objectId").is_none()
        })
        .times(1)
        .returning(|_| {
            Ok(json(
                201,
                r#"{"objectId":"Ed1nuqPvcm","createdAt":"2022-06-21T09:15:27.372Z"}"#,
            ))
        });
    let module = module(client).await;

    let ack = module.put_defect(sample_form()).await.unwrap();

    assert_eq!(ack.object_id, "Ed1nuqPvcm");
}

#[tokio::test]
async fn test_put_defect_propagates_with_question_mark() {
    async fn submit(module: &DefectModule) -> Result<String, DefectError> {
        let ack = module.put_defect(FormData::new().with_message("x")).await?;
        Ok(ack.object_id)
    }

    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .times(1)
        .returning(|_| Err(BridgeError::NoConnectivity("offline".to_string())));
    let module = module(client).await;

    assert_eq!(submit(&module).await, Err(DefectError::NoConnectivity));
}

#[tokio::test]
async fn test_unusable_base_url_is_invalid_request() {
    let mut client = MockHttpClient::new();
    client.expect_execute().never();
    let service = NetworkService::new(
        Arc::new(client),
        network_config("mailto:parse@example.org"),
    );
    let module = DefectModule::create(
        DefectDependencies::new(service, store_with_token(None).await),
        &bundles(),
    );

    assert_eq!(
        module.put_defect(sample_form()).await,
        Err(DefectError::InvalidRequest)
    );
}

#[tokio::test]
async fn test_unparseable_body_is_invalid_response() {
    let mut client = MockHttpClient::new();
    client.expect_execute().times(1).returning(|_| {
        Ok(HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from_static(b"<html>maintenance</html>"),
        })
    });
    let module = module(client).await;

    assert_eq!(
        module.put_defect(sample_form()).await,
        Err(DefectError::InvalidResponse)
    );
}

#[tokio::test]
async fn test_schema_mismatch_is_json_decoding() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .times(1)
        .returning(|_| Ok(json(201, r#"{"id":"not-a-parse-ack"}"#)));
    let module = module(client).await;

    let error = module.put_defect(sample_form()).await.unwrap_err();

    assert!(matches!(error, DefectError::JsonDecoding(_)));
}

// Decoding errors compare equal whatever their detail. Callers can only
// branch on the variant.
#[test]
fn test_json_decoding_errors_compare_equal_regardless_of_detail() {
    assert_eq!(
        DefectError::JsonDecoding("missing field `objectId`".to_string()),
        DefectError::JsonDecoding("invalid type: integer".to_string())
    );
}

#[tokio::test]
async fn test_send_never_fails_the_future() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .times(1)
        .returning(|_| Ok(json(500, r#"{"code":1,"error":"internal"}"#)));
    let module = module(client).await;

    let result = module.send(sample_form()).await;

    assert_eq!(
        result,
        Err(DefectError::DataLoading {
            status_code: 500,
            data: Bytes::from_static(br#"{"code":1,"error":"internal"}"#),
        })
    );
}

#[tokio::test]
async fn test_transport_failure_maps_to_network() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .times(1)
        .returning(|_| Err(BridgeError::Timeout("30s elapsed".to_string())));
    let module = module(client).await;

    assert_eq!(
        module.get_all_defect_form_contacts().await,
        Err(DefectError::Network)
    );
}

#[tokio::test]
async fn test_send_file_uploads_jpeg() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .withf(|request| {
            request.url == format!("{}/files/defect.jpg", BASE_URL)
                && request.headers.get("Content-Type").map(String::as_str) == Some("image/jpeg")
                && request.body.as_deref() == Some(&[0xff, 0xd8, 0xff][..])
        })
        .times(1)
        .returning(|_| {
            Ok(json(
                201,
                r#"{"name":"5f1c_defect.jpg","url":"https://parse-dev.example.org/files/osca/5f1c_defect.jpg"}"#,
            ))
        });
    let module = module(client).await;

    let uploaded = module
        .send_file(Bytes::from_static(&[0xff, 0xd8, 0xff]))
        .await
        .unwrap();

    assert_eq!(uploaded.name, "5f1c_defect.jpg");
}

#[tokio::test]
async fn test_send_file_rejects_empty_payload() {
    let mut client = MockHttpClient::new();
    client.expect_execute().never();
    let module = module(client).await;

    assert_eq!(
        module.send_file(Bytes::new()).await,
        Err(DefectError::InvalidRequest)
    );
}

#[tokio::test]
async fn test_analytics_receives_submission_outcomes() {
    let mut client = MockHttpClient::new();
    let mut calls = 0;
    client.expect_execute().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Ok(json(
                201,
                r#"{"objectId":"Ed1nuqPvcm","createdAt":"2022-06-21T09:15:27.372Z"}"#,
            ))
        } else {
            Ok(json(400, r#"{"code":111}"#))
        }
    });

    let mut analytics = MockAnalytics::new();
    analytics
        .expect_track()
        .withf(|event| {
            event.name == "defect_submitted"
                && event.properties.get("object_id").map(String::as_str) == Some("Ed1nuqPvcm")
        })
        .times(1)
        .returning(|_| Ok(()));
    analytics
        .expect_track()
        .withf(|event| {
            event.name == "defect_failed"
                && event.properties.get("error").map(String::as_str) == Some("data_loading")
        })
        .times(1)
        .returning(|_| Err(BridgeError::NotAvailable("sink offline".to_string())));

    let deps = dependencies(client).await.with_analytics(Arc::new(analytics));
    let module = DefectModule::create(deps, &bundles());

    assert!(module.send(sample_form()).await.is_ok());
    // A failing sink must not change the outcome.
    assert!(matches!(
        module.put_defect(sample_form()).await,
        Err(DefectError::DataLoading {
            status_code: 400,
            ..
        })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_results_arrive_through_main_scheduler() {
    let mut client = MockHttpClient::new();
    client
        .expect_execute()
        .times(1)
        .returning(|_| Ok(json(200, r#"{"params":{"privacyText":"ok"}}"#)));

    let (scheduler, mut main_queue) = QueuedMainScheduler::new();
    let deps = dependencies(client)
        .await
        .with_main_scheduler(Arc::new(scheduler))
        .with_default_location(ParseGeoPoint::new(51.17, 7.08));
    let module = DefectModule::create(deps, &bundles());
    assert_eq!(
        module.default_location(),
        Some(ParseGeoPoint::new(51.17, 7.08))
    );

    let pending = tokio::spawn(async move { module.get_parse_config_params().await });

    // Nothing reaches the caller until the main loop runs the delivery.
    assert!(main_queue.run_next().await);
    let config = pending.await.unwrap().unwrap();
    assert_eq!(config.privacy_text(), Some("ok"));
}

struct HangingClient {
    dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpClient for HangingClient {
    async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
        let _flag = DropFlag(Arc::clone(&self.dropped));
        futures::future::pending::<()>().await;
        unreachable!()
    }
}

#[tokio::test]
async fn test_dropping_the_future_cancels_the_request() {
    let dropped = Arc::new(AtomicBool::new(false));
    let client = HangingClient {
        dropped: Arc::clone(&dropped),
    };
    let module = DefectModule::create(dependencies(client).await, &bundles());

    let request = module.get_parse_config_params();
    let timed_out =
        tokio::time::timeout(std::time::Duration::from_millis(50), request).await;
    assert!(timed_out.is_err());

    for _ in 0..20 {
        if dropped.load(Ordering::SeqCst) {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert!(dropped.load(Ordering::SeqCst));
}
