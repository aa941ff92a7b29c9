pub mod auth;
pub mod error;
pub mod http;

// Re-export commonly used types
pub use auth::{BuildSecretCredentials, CredentialProvider, SecretSource, StaticCredentials};
pub use error::{ConnectorError, ConnectorResult};
pub use http::{
    build_request, HttpTransport, IdentifierMap, PathSegment, ProjectDirectory, RequestTemplate,
    ReqwestTransport, ResponseClassifier,
};
