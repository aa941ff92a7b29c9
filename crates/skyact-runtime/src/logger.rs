use skyact_core::{redact_secret, Credentials, LogLine, Severity};

const TARGET: &str = "skyact::step";

/// Collects the console lines of one step execution.
///
/// `banner` and `error` lines are always kept; `detail` lines only when
/// verbose logging is on. Every kept line is also sent to `tracing`.
#[derive(Debug, Default)]
pub struct StepLogger {
    verbose: bool,
    lines: Vec<LogLine>,
    secrets: Vec<Credentials>,
}

impl StepLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            lines: Vec::new(),
            secrets: Vec::new(),
        }
    }

    /// Scrub `credentials` from every line recorded from now on
    pub fn protect(&mut self, credentials: &Credentials) {
        self.secrets.push(credentials.clone());
    }

    pub fn banner(&mut self, message: impl AsRef<str>) {
        self.record(Severity::Info, message.as_ref());
    }

    pub fn detail(&mut self, message: impl AsRef<str>) {
        if self.verbose {
            self.record(Severity::Info, message.as_ref());
        }
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.record(Severity::Error, message.as_ref());
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<LogLine> {
        self.lines
    }

    fn record(&mut self, severity: Severity, message: &str) {
        let message = self
            .secrets
            .iter()
            .fold(message.to_string(), |text, secret| redact_secret(&text, secret.expose()));

        match severity {
            Severity::Info => tracing::info!(target: TARGET, "{}", message),
            Severity::Error => tracing::error!(target: TARGET, "{}", message),
        }

        self.lines.push(LogLine { severity, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyact_core::SANITIZED_PLACEHOLDER;

    #[test]
    fn test_detail_respects_toggle() {
        let mut quiet = StepLogger::new(false);
        quiet.banner("Delete Configuration");
        quiet.detail("Request URL: DELETE https://cloud.skytap.com/configurations/1");
        quiet.error("Failing build step.");
        assert_eq!(
            quiet.into_lines(),
            vec![
                LogLine::info("Delete Configuration"),
                LogLine::error("Failing build step."),
            ]
        );

        let mut verbose = StepLogger::new(true);
        verbose.detail("Configuration ID: 1");
        assert_eq!(verbose.lines().len(), 1);
    }

    #[test]
    fn test_protected_credentials_are_scrubbed() {
        let mut log = StepLogger::new(true);
        log.protect(&Credentials::new("Basic dXNlcjpzZWNyZXRrZXk="));
        log.detail("echo: Basic dXNlcjpzZWNyZXRrZXk=");
        log.error("token dXNlcjpzZWNyZXRrZXk= rejected");

        for line in log.lines() {
            assert!(!line.message.contains("dXNlcjpzZWNyZXRrZXk="));
            assert!(line.message.contains(SANITIZED_PLACEHOLDER));
        }
    }
}
