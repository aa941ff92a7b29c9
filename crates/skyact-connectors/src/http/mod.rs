pub mod classifier;
pub mod executor;
pub mod projects;
pub mod request_builder;

pub use classifier::{find_error_message, ResponseClassifier};
pub use executor::{HttpTransport, ReqwestTransport};
pub use projects::{ProjectDirectory, PROJECTS_TEMPLATE};
pub use request_builder::{build_request, IdentifierMap, PathSegment, RequestTemplate};
