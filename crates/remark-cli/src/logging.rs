//! Tracing setup for the `remark` binary.
//!
//! Logs go to stderr so stdout stays clean for `--json` output.

use std::env;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const FILTER_VAR: &str = "REMARK_LOG";

/// Environment variable selecting the log line format.
pub const FORMAT_VAR: &str = "REMARK_LOG_FORMAT";

/// How log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; anything else is compact.
    #[must_use]
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Filter used when `REMARK_LOG` is unset.
#[must_use]
pub const fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "remark_core=debug,remark_cli=debug,info"
    } else {
        "remark_core=info,remark_cli=info,warn"
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let format = LogFormat::from_setting(env::var(FORMAT_VAR).ok().as_deref());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().with_ansi(false).try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_setting() {
        assert_eq!(LogFormat::from_setting(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::from_setting(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::from_setting(Some("pretty")), LogFormat::Compact);
        assert_eq!(LogFormat::from_setting(None), LogFormat::Compact);
    }

    #[test]
    fn test_default_directives_parse() {
        for verbose in [false, true] {
            let directives = default_directives(verbose);
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
        assert!(default_directives(true).contains("remark_core=debug"));
    }
}
