use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Remote store backend types
///
/// Defined in core because configuration selects it before any store exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Repository contents REST API (GitHub-compatible).
    #[default]
    Github,
    /// Process-local map, for offline runs and tests.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "github" => Ok(StoreBackend::Github),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid store backend: {}", s)),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StoreBackend::Github => write!(f, "github"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_backends_case_insensitively() {
        assert_eq!("github".parse::<StoreBackend>().unwrap(), StoreBackend::Github);
        assert_eq!(" Memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = "s3".parse::<StoreBackend>().unwrap_err();
        assert!(err.to_string().contains("s3"));
    }

    #[test]
    fn display_matches_parse() {
        for backend in [StoreBackend::Github, StoreBackend::Memory] {
            assert_eq!(backend.to_string().parse::<StoreBackend>().unwrap(), backend);
        }
    }
}
