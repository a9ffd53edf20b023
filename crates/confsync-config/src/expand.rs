//! Environment variable expansion for configuration strings.
//!
//! Supports two forms inside string values:
//!
//! - `${VAR}` - the value of VAR; an error if VAR is unset
//! - `${VAR:-default}` - the value of VAR, or `default` if unset

use crate::ConfigError;

/// Expand `${VAR}` / `${VAR:-default}` references in `value`.
///
/// `field` names the config field for error reporting.
///
/// # Errors
///
/// Returns [`ConfigError::EnvVar`] when a required variable is unset or a
/// reference is malformed (missing closing brace).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            return Err(ConfigError::EnvVar {
                field: field.to_owned(),
                message: "unterminated ${ reference".to_owned(),
            });
        };

        let reference = &after[..end];
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };

        match std::env::var(name) {
            Ok(resolved) => result.push_str(&resolved),
            Err(_) => match default {
                Some(default) => result.push_str(default),
                None => {
                    return Err(ConfigError::EnvVar {
                        field: field.to_owned(),
                        message: format!("${{{name}}} not set"),
                    });
                }
            },
        }

        rest = &after[end + 1..];
    }

    result.push_str(rest);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_literal_passthrough() {
        assert_eq!(expand_env("plain value", "f").unwrap(), "plain value");
    }

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CONFSYNC_EXPAND_TEST", "resolved");
        }

        assert_eq!(
            expand_env("pre-${CONFSYNC_EXPAND_TEST}-post", "f").unwrap(),
            "pre-resolved-post"
        );

        unsafe {
            std::env::remove_var("CONFSYNC_EXPAND_TEST");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CONFSYNC_EXPAND_UNSET");
        }

        assert_eq!(
            expand_env("${CONFSYNC_EXPAND_UNSET:-fallback}", "f").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_missing_required_var_errors() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CONFSYNC_EXPAND_MISSING");
        }

        let err = expand_env("${CONFSYNC_EXPAND_MISSING}", "confluence.api_token").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("CONFSYNC_EXPAND_MISSING"));
    }

    #[test]
    fn test_unterminated_reference_errors() {
        let err = expand_env("${BROKEN", "f").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_multiple_references() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CONFSYNC_EXPAND_A", "one");
            std::env::set_var("CONFSYNC_EXPAND_B", "two");
        }

        assert_eq!(
            expand_env("${CONFSYNC_EXPAND_A}/${CONFSYNC_EXPAND_B}", "f").unwrap(),
            "one/two"
        );

        unsafe {
            std::env::remove_var("CONFSYNC_EXPAND_A");
            std::env::remove_var("CONFSYNC_EXPAND_B");
        }
    }
}
