use httpmock::prelude::*;
use skyact_config::{ClassificationMode, EngineConfig};
use skyact_connectors::{
    build_request, HttpTransport, IdentifierMap, PathSegment, ProjectDirectory, RequestTemplate,
    ReqwestTransport, ResponseClassifier,
};
use skyact_core::{Credentials, HttpMethod, ResolvedId, StepError};

const DELETE_CONFIGURATION: RequestTemplate = RequestTemplate {
    method: HttpMethod::Delete,
    path: &[PathSegment::Literal("configurations"), PathSegment::Slot("configuration")],
};

fn config_for(server: &MockServer) -> EngineConfig {
    EngineConfig::default().with_base_url(server.base_url())
}

#[test]
fn delete_request_round_trip_classifies_success() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/configurations/555");
        then.status(200).body(r#"{"id":"555","runstate":"stopped"}"#);
    });

    let config = config_for(&server);
    let transport = ReqwestTransport::new(&config).unwrap();
    let mut ids = IdentifierMap::new();
    ids.insert("configuration", ResolvedId::from("555"));

    let request = build_request(config.api_root(), &DELETE_CONFIGURATION, &ids, &Credentials::new("Basic x"));
    let response = transport.execute(&request).unwrap();

    ResponseClassifier::new(config.classification)
        .classify(&response)
        .unwrap();
    mock.assert();
}

#[test]
fn repeated_delete_reports_remote_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/configurations/555");
        then.status(404)
            .body(r#"{"error":{"message":"Configuration 555 does not exist"}}"#);
    });

    let config = config_for(&server);
    let transport = ReqwestTransport::new(&config).unwrap();
    let mut ids = IdentifierMap::new();
    ids.insert("configuration", ResolvedId::from("555"));
    let request = build_request(config.api_root(), &DELETE_CONFIGURATION, &ids, &Credentials::new("Basic x"));

    for _ in 0..2 {
        let response = transport.execute(&request).unwrap();
        let err: StepError = ResponseClassifier::new(ClassificationMode::Compat)
            .classify(&response)
            .unwrap_err()
            .into();
        assert!(matches!(err, StepError::Api(ref m) if m == "Configuration 555 does not exist"));
    }
}

#[test]
fn project_lookup_against_mock_api() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/projects")
            .header("authorization", "Basic abc");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id":"11","name":"QA"},{"id":"12","name":"Release"}]"#);
    });

    let config = config_for(&server);
    let transport = ReqwestTransport::new(&config).unwrap();
    let directory = ProjectDirectory::new(&transport, ResponseClassifier::default(), config.api_root());

    let id = directory
        .find_project_id("Release", &Credentials::new("Basic abc"))
        .unwrap();
    assert_eq!(id.as_str(), "12");
    mock.assert();
}

#[test]
fn unreachable_host_maps_to_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = EngineConfig::default().with_base_url(format!("http://127.0.0.1:{}", port));
    let transport = ReqwestTransport::new(&config).unwrap();
    let mut ids = IdentifierMap::new();
    ids.insert("configuration", ResolvedId::from("1"));
    let request = build_request(config.api_root(), &DELETE_CONFIGURATION, &ids, &Credentials::new("t"));

    let err: StepError = transport.execute(&request).unwrap_err().into();
    assert!(matches!(err, StepError::Transport(_)));
}
