//! Build-variable expansion and workspace path resolution for step inputs

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};

/// Matches `${VAR}`, `${VAR:default}` and bare `$VAR`
static VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_.]*)(?::([^}]*))?\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("variable pattern is valid")
});

/// Replace variable references in `input` using `lookup`.
///
/// A reference with no value and no default is left as written, so a literal
/// `$` in a file name survives expansion.
pub fn expand_vars<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !input.contains('$') {
        return input.to_string();
    }

    VAR_PATTERN
        .replace_all(input, |caps: &Captures| {
            let (name, default) = match caps.get(1) {
                Some(braced) => (braced.as_str(), caps.get(2).map(|m| m.as_str())),
                None => (&caps[3], None),
            };
            match lookup(name) {
                Some(value) => value,
                None => match default {
                    Some(default) => default.to_string(),
                    None => {
                        tracing::debug!(variable = %name, "Leaving unresolved variable in place");
                        caps[0].to_string()
                    }
                },
            }
        })
        .into_owned()
}

/// Resolve `path` against the build workspace unless it is already absolute
pub fn to_absolute_path(workspace: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        workspace.join(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env() -> HashMap<&'static str, &'static str> {
        HashMap::from([("WORKSPACE", "/var/jobs/demo"), ("BUILD_NUMBER", "17")])
    }

    fn lookup(name: &str) -> Option<String> {
        env().get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_braced_and_bare_variables() {
        assert_eq!(
            expand_vars("${WORKSPACE}/env-$BUILD_NUMBER.json", lookup),
            "/var/jobs/demo/env-17.json"
        );
    }

    #[test]
    fn test_default_value() {
        assert_eq!(expand_vars("${MISSING:fallback}.json", lookup), "fallback.json");
        assert_eq!(expand_vars("${BUILD_NUMBER:0}", lookup), "17");
    }

    #[test]
    fn test_unknown_variable_is_left_intact() {
        assert_eq!(expand_vars("cost$5_$MISSING", lookup), "cost$5_$MISSING");
        assert_eq!(expand_vars("${NOPE}/a", lookup), "${NOPE}/a");
    }

    #[test]
    fn test_plain_input_is_unchanged() {
        assert_eq!(expand_vars("config.json", lookup), "config.json");
    }

    #[test]
    fn test_to_absolute_path() {
        let ws = Path::new("/var/jobs/demo");
        assert_eq!(
            to_absolute_path(ws, "out/env.json"),
            PathBuf::from("/var/jobs/demo/out/env.json")
        );
        assert_eq!(to_absolute_path(ws, "/tmp/env.json"), PathBuf::from("/tmp/env.json"));
    }
}
