//! Selector configuration and process-level overrides.
//!
//! [`SelectorConfig`] is the value callers pass around. The environment is read
//! once per process and only supplies defaults.

use std::sync::OnceLock;

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// What the selector does with a boundary of fewer than three vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Abort selection with [`SelectError::MalformedPolygon`](crate::SelectError::MalformedPolygon)
    #[default]
    Reject,
    /// Score it as area 0 and let it compete
    ZeroArea,
}

impl DegeneratePolicy {
    /// Parse `reject` / `zero` (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" | "error" => Some(Self::Reject),
            "zero" | "zero-area" | "zero_area" => Some(Self::ZeroArea),
            _ => None,
        }
    }
}

/// Configuration injected into a [`Selector`](crate::Selector)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorConfig {
    /// Handling of degenerate boundaries
    pub degenerate: DegeneratePolicy,
}

impl SelectorConfig {
    /// Defaults with `IDREC_DEGENERATE_POLICY` applied
    pub fn from_env() -> Self {
        Self {
            degenerate: degenerate_policy_from_env(),
        }
    }
}

static DEGENERATE_POLICY: OnceLock<DegeneratePolicy> = OnceLock::new();

pub(crate) fn degenerate_policy_from_env() -> DegeneratePolicy {
    *DEGENERATE_POLICY.get_or_init(|| {
        std::env::var("IDREC_DEGENERATE_POLICY")
            .ok()
            .and_then(|v| DegeneratePolicy::parse(&v))
            .unwrap_or_default()
    })
}

static MAX_DIM: OnceLock<Option<u32>> = OnceLock::new();

/// Longest image side kept before detection; `None` disables downscaling.
///
/// Read from `IDREC_MAX_DIM`, where `0` means no limit.
pub fn max_dim() -> Option<u32> {
    *MAX_DIM.get_or_init(|| match parse_env_u32("IDREC_MAX_DIM", 0) {
        0 => None,
        v => Some(v),
    })
}

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// True when `IDREC_DEBUG` is set
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("IDREC_DEBUG").is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!(DegeneratePolicy::parse("reject"), Some(DegeneratePolicy::Reject));
        assert_eq!(DegeneratePolicy::parse(" ZERO "), Some(DegeneratePolicy::ZeroArea));
        assert_eq!(DegeneratePolicy::parse("zero-area"), Some(DegeneratePolicy::ZeroArea));
        assert_eq!(DegeneratePolicy::parse("maybe"), None);
    }

    #[test]
    fn test_default_rejects() {
        assert_eq!(SelectorConfig::default().degenerate, DegeneratePolicy::Reject);
    }
}
