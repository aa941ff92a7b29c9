use serde_json::Value as JsonValue;
use skyact_core::{id_from_json, Credentials, HttpMethod, ResolvedId};

use super::classifier::ResponseClassifier;
use super::executor::HttpTransport;
use super::request_builder::{build_request, IdentifierMap, PathSegment, RequestTemplate};
use crate::error::{ConnectorError, ConnectorResult};

/// `GET /projects`
pub const PROJECTS_TEMPLATE: RequestTemplate = RequestTemplate {
    method: HttpMethod::Get,
    path: &[PathSegment::Literal("projects")],
};

/// Looks up project identifiers by name
pub struct ProjectDirectory<'a> {
    transport: &'a dyn HttpTransport,
    classifier: ResponseClassifier,
    api_root: &'a str,
}

impl<'a> ProjectDirectory<'a> {
    pub fn new(
        transport: &'a dyn HttpTransport,
        classifier: ResponseClassifier,
        api_root: &'a str,
    ) -> Self {
        Self {
            transport,
            classifier,
            api_root,
        }
    }

    /// Return the id of the first project whose name matches exactly
    pub fn find_project_id(&self, name: &str, credentials: &Credentials) -> ConnectorResult<ResolvedId> {
        let request = build_request(self.api_root, &PROJECTS_TEMPLATE, &IdentifierMap::new(), credentials);
        tracing::debug!(project = %name, url = %request.url, "Looking up project by name");

        let response = self.transport.execute(&request)?;
        self.classifier.classify(&response)?;

        let listing: JsonValue = serde_json::from_str(&response.body)?;
        let projects = listing.as_array().ok_or_else(|| {
            ConnectorError::MalformedResponse("project listing is not a JSON array".into())
        })?;

        projects
            .iter()
            .filter(|project| project.get("name").and_then(JsonValue::as_str) == Some(name))
            .find_map(|project| project.get("id").and_then(id_from_json))
            .ok_or_else(|| ConnectorError::NotFound(name.to_string()))
    }
}
