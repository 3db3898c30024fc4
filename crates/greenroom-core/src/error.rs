//! Error type shared by configuration loading and the binary surfaces.
//!
//! The overlay core itself is total and never produces these; they come from
//! the edges (files, environment, terminal, user-supplied slugs).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GreenroomError {
    #[error("config: {0}")]
    Config(String),
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config: {0}")]
    Parse(String),
    #[error("unknown entity kind {0:?}")]
    UnknownEntityKind(String),
    #[error("terminal: {0}")]
    Terminal(String),
    #[error("script: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, GreenroomError>;

impl GreenroomError {
    /// Process exit code used by the binaries for this error category.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Parse(_) | Self::UnknownEntityKind(_) | Self::Script(_) => 2,
            Self::Io { .. } | Self::Terminal(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GreenroomError;

    #[test]
    fn display_includes_context() {
        let err = GreenroomError::UnknownEntityKind("spaceship".into());
        assert_eq!(err.to_string(), "unknown entity kind \"spaceship\"");

        let err = GreenroomError::Io {
            path: "/nope/config.yaml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "/nope/config.yaml: missing");
    }

    #[test]
    fn exit_codes_split_usage_from_runtime_failures() {
        assert_eq!(GreenroomError::Config("x".into()).exit_code(), 2);
        assert_eq!(GreenroomError::Terminal("x".into()).exit_code(), 1);
    }
}
