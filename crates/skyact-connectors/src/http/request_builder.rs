//! Request assembly for the Skytap REST API

use skyact_core::{ApiRequest, Credentials, HttpMethod, ResolvedId};
use std::collections::BTreeMap;

/// Resolved identifiers of one step, keyed by slot name
pub type IdentifierMap = BTreeMap<&'static str, ResolvedId>;

/// One piece of a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Literal(&'static str),
    /// Replaced by the resolved identifier of the named slot
    Slot(&'static str),
}

/// Method plus path shape of an API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTemplate {
    pub method: HttpMethod,
    pub path: &'static [PathSegment],
}

impl RequestTemplate {
    /// Names of the slots the path refers to, in path order
    pub fn slot_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.path.iter().filter_map(|segment| match segment {
            PathSegment::Slot(name) => Some(*name),
            PathSegment::Literal(_) => None,
        })
    }

    /// Render the path, e.g. `/projects/42/configurations/555`
    pub fn render_path(&self, identifiers: &IdentifierMap) -> String {
        let mut path = String::new();
        for segment in self.path {
            path.push('/');
            match segment {
                PathSegment::Literal(literal) => path.push_str(literal),
                PathSegment::Slot(name) => {
                    let value = identifiers.get(name);
                    debug_assert!(value.is_some(), "no identifier resolved for slot '{}'", name);
                    if let Some(id) = value {
                        path.push_str(id.as_str());
                    }
                }
            }
        }
        path
    }
}

/// Assemble a request from the API root, a template and resolved identifiers.
///
/// `api_root` is expected without a trailing slash (see
/// `EngineConfig::api_root`). Pure string assembly; cannot fail.
pub fn build_request(
    api_root: &str,
    template: &RequestTemplate,
    identifiers: &IdentifierMap,
    credentials: &Credentials,
) -> ApiRequest {
    let url = format!(
        "{}{}",
        api_root.trim_end_matches('/'),
        template.render_path(identifiers)
    );

    ApiRequest {
        method: template.method,
        url,
        authorization: credentials.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADD_TO_PROJECT: RequestTemplate = RequestTemplate {
        method: HttpMethod::Post,
        path: &[
            PathSegment::Literal("projects"),
            PathSegment::Slot("project"),
            PathSegment::Literal("configurations"),
            PathSegment::Slot("configuration"),
        ],
    };

    fn ids(pairs: &[(&'static str, &str)]) -> IdentifierMap {
        pairs.iter().map(|(k, v)| (*k, ResolvedId::from(*v))).collect()
    }

    #[test]
    fn test_segment_order_follows_template() {
        let request = build_request(
            "https://cloud.skytap.com",
            &ADD_TO_PROJECT,
            &ids(&[("configuration", "555"), ("project", "42")]),
            &Credentials::new("Basic x"),
        );
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://cloud.skytap.com/projects/42/configurations/555");
        assert_eq!(request.authorization.expose(), "Basic x");
    }

    #[test]
    fn test_trailing_slash_on_root_is_ignored() {
        let template = RequestTemplate {
            method: HttpMethod::Get,
            path: &[PathSegment::Literal("projects")],
        };
        let request = build_request(
            "http://127.0.0.1:8080/",
            &template,
            &IdentifierMap::new(),
            &Credentials::new("t"),
        );
        assert_eq!(request.url, "http://127.0.0.1:8080/projects");
    }

    #[test]
    fn test_slot_names() {
        let names: Vec<_> = ADD_TO_PROJECT.slot_names().collect();
        assert_eq!(names, vec!["project", "configuration"]);
    }
}
