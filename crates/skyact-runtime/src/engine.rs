use skyact_config::EngineConfig;
use skyact_connectors::{
    build_request, BuildSecretCredentials, ConnectorResult, CredentialProvider, HttpTransport,
    IdentifierMap, ProjectDirectory, ReqwestTransport, ResponseClassifier, SecretSource,
};
use skyact_core::{
    redact_secret, validate_slot, ActionInput, ApiResponse, Credentials, IdentifierSlot,
    StepError, StepResult, StepStage,
};
use std::sync::Arc;
use std::time::Instant;

use crate::action::{ActionDescriptor, ActionStep};
use crate::context::BuildContext;
use crate::logger::StepLogger;
use crate::outcome::{ExecutionMetadata, RequestSummary, StepFailure, StepOutcome};
use crate::resolver::IdentifierResolver;

const TITLE_RULE: &str = "----------------------------------------";

/// Runs action steps against the Skytap API.
///
/// Holds only immutable configuration and shared collaborators, so one engine
/// can serve concurrent steps.
pub struct ActionEngine {
    config: EngineConfig,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<dyn CredentialProvider>,
    classifier: ResponseClassifier,
}

/// Mutable progress of one execution, kept for the outcome
#[derive(Default)]
struct StepRun {
    stage: Option<StepStage>,
    credentials: Option<Credentials>,
    identifiers: IdentifierMap,
    request: Option<RequestSummary>,
    response: Option<ApiResponse>,
}

impl StepRun {
    fn enter(&mut self, stage: StepStage) {
        tracing::trace!(stage = %stage, "Entering stage");
        self.stage = Some(stage);
    }

    fn stage(&self) -> StepStage {
        self.stage.unwrap_or(StepStage::Validate)
    }
}

impl ActionEngine {
    pub fn new(
        config: EngineConfig,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        let classifier = ResponseClassifier::new(config.classification);
        Self {
            config,
            transport,
            credentials,
            classifier,
        }
    }

    /// Engine with the blocking HTTP client and build-secret credentials
    pub fn from_config(config: EngineConfig) -> ConnectorResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(config, Arc::new(transport), Arc::new(BuildSecretCredentials)))
    }

    /// Execute one step to completion. Never panics on remote or user errors;
    /// every failure ends up in the returned outcome.
    pub fn run(&self, step: &ActionStep, ctx: &dyn BuildContext) -> StepOutcome {
        let descriptor = step.descriptor();
        let started = Instant::now();
        let timestamp = chrono::Utc::now();

        tracing::info!(action = descriptor.name, "Starting action step");

        let mut log = StepLogger::new(self.config.logging_enabled);
        log.banner(TITLE_RULE);
        log.banner(descriptor.title);
        log.banner(TITLE_RULE);

        let mut run = StepRun::default();
        let result = self.drive(step, descriptor, ctx, &mut log, &mut run);
        let duration_ms = started.elapsed().as_millis() as u64;

        let failure = match result {
            Ok(()) => {
                let body = run.response.as_ref().map(|r| r.body.as_str()).unwrap_or_default();
                log.detail("");
                log.detail(body);
                log.detail("");
                log.banner((descriptor.success_message)(&run.identifiers));
                log.banner(TITLE_RULE);

                tracing::info!(action = descriptor.name, duration_ms, "Action step succeeded");
                None
            }
            Err(err) => {
                let stage = run.stage();
                report_failure(&mut log, stage, &err);

                let mut failure = StepFailure::new(stage, &err);
                if let Some(credentials) = &run.credentials {
                    failure.message = redact_secret(&failure.message, credentials.expose());
                }

                tracing::warn!(
                    action = descriptor.name,
                    stage = %stage,
                    kind = err.kind(),
                    preflight = err.is_preflight(),
                    duration_ms,
                    "Action step failed"
                );
                Some(failure)
            }
        };

        StepOutcome {
            success: failure.is_none(),
            lines: log.into_lines(),
            failure,
            request: run.request,
            response_body: run.response.map(|r| r.body),
            metadata: ExecutionMetadata {
                action: descriptor.name.to_string(),
                duration_ms,
                timestamp,
            },
        }
    }

    fn drive(
        &self,
        step: &ActionStep,
        descriptor: &ActionDescriptor,
        ctx: &dyn BuildContext,
        log: &mut StepLogger,
        run: &mut StepRun,
    ) -> StepResult<()> {
        run.enter(StepStage::Validate);
        let inputs = validate_inputs(step)?;

        run.enter(StepStage::ResolveCredentials);
        let credentials = self
            .credentials
            .get_auth_credentials(&ContextSecrets(ctx))?;
        log.protect(&credentials);
        run.credentials = Some(credentials.clone());

        run.enter(StepStage::ResolveIdentifiers);
        let projects = ProjectDirectory::new(
            self.transport.as_ref(),
            self.classifier,
            self.config.api_root(),
        );
        let resolver = IdentifierResolver::new(ctx, projects, &credentials);
        for (slot, input) in &inputs {
            let id = resolver.resolve(input)?;
            log.detail(format!("{} ID: {}", capitalize(slot.name), id));
            run.identifiers.insert(slot.name, id);
        }

        run.enter(StepStage::BuildRequest);
        let request = build_request(
            self.config.api_root(),
            &descriptor.template,
            &run.identifiers,
            &credentials,
        );
        log.detail(format!("Request URL: {} {}", request.method, request.url));
        run.request = Some(RequestSummary::from(&request));

        run.enter(StepStage::Execute);
        let response = self.transport.execute(&request)?;

        run.enter(StepStage::Classify);
        let verdict = self.classifier.classify(&response);
        run.response = Some(response);
        verdict?;

        run.enter(StepStage::Done);
        Ok(())
    }
}

/// Pre-flight check of every slot; no I/O happens before this passes
fn validate_inputs(step: &ActionStep) -> StepResult<Vec<(&'static IdentifierSlot, ActionInput)>> {
    step.slot_inputs()
        .into_iter()
        .map(|input| {
            validate_slot(input.slot, input.direct, input.alternate).map(|parsed| (input.slot, parsed))
        })
        .collect()
}

fn report_failure(log: &mut StepLogger, stage: StepStage, err: &StepError) {
    match err {
        StepError::InvalidInputCombination { .. } | StepError::MissingInput { .. } => {
            log.error(err.to_string());
        }
        StepError::CredentialsUnavailable(reason) => {
            log.error(format!("Error obtaining Skytap credentials: {}", reason));
        }
        StepError::FileNotFound { .. } | StepError::Parse { .. } => {
            log.error(format!("Error retrieving identifier: {}", err));
        }
        StepError::ProjectNotFound(_) => {
            log.error(format!("Error retrieving identifier: {}", err));
            log.error("Please provide a valid project name or ID.");
        }
        StepError::Transport(reason) => {
            log.error(format!("Skytap request failed: {}", reason));
        }
        StepError::Api(message) => {
            log.error(format!("Request returned an error: {}", message));
            log.error("Failing build step.");
        }
        StepError::MalformedResponse(reason) => {
            log.error(format!("Request returned an unusable response: {}", reason));
            log.error("Failing build step.");
        }
    }
    tracing::debug!(stage = %stage, kind = err.kind(), "Reported step failure");
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Exposes the build's secrets to a credential provider
struct ContextSecrets<'a>(&'a dyn BuildContext);

impl SecretSource for ContextSecrets<'_> {
    fn secret(&self, name: &str) -> Option<String> {
        self.0.secret(name)
    }
}
