//! Run configuration.
//!
//! ## Environment
//!
//! - `API_SURFACE_INCLUDES`: comma-separated module prefixes to analyze
//! - `API_SURFACE_EXCLUDES`: comma-separated prefixes to prune from the surface
//! - `API_SURFACE_OUTFILE`: snapshot path (default: `.public_api`)
//! - `API_SURFACE_DERIVE_OUTFILE`: derivation artifact path (default: disabled)
//! - `API_SURFACE_DEBUG`: verbose logging (default: off)
//! - `API_SURFACE_PROFILE`: `minimal` or `full-string` (default: minimal)
//! - `API_SURFACE_STRICT`: fail on unsupported kinds (default: off)

use std::path::PathBuf;

use crate::policy::{parse_prefix_list, ScopePolicy, UnsupportedPolicy};
use crate::snapshot::Profile;

/// Default snapshot artifact path.
pub const DEFAULT_OUTPUT_PATH: &str = ".public_api";

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Module prefixes to analyze.
    pub includes: Vec<String>,
    /// Name prefixes pruned from the initial surface.
    pub excludes: Vec<String>,
    /// Snapshot artifact path.
    pub output_path: PathBuf,
    /// Derivation artifact path, if enabled.
    pub derivation_output_path: Option<PathBuf>,
    /// Verbose logging.
    pub debug_logging: bool,
    /// Snapshot profile.
    pub profile: Profile,
    /// Handling of unsupported kinds.
    pub unsupported: UnsupportedPolicy,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            excludes: Vec::new(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            derivation_output_path: None,
            debug_logging: false,
            profile: Profile::Minimal,
            unsupported: UnsupportedPolicy::Lenient,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl SurfaceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset or unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            includes: lookup("API_SURFACE_INCLUDES")
                .map(|s| parse_prefix_list(&s))
                .unwrap_or(defaults.includes),
            excludes: lookup("API_SURFACE_EXCLUDES")
                .map(|s| parse_prefix_list(&s))
                .unwrap_or(defaults.excludes),
            output_path: lookup("API_SURFACE_OUTFILE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            derivation_output_path: lookup("API_SURFACE_DERIVE_OUTFILE")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            debug_logging: lookup("API_SURFACE_DEBUG")
                .map(|s| parse_flag(&s))
                .unwrap_or(defaults.debug_logging),
            profile: lookup("API_SURFACE_PROFILE")
                .and_then(|s| match s.parse::<Profile>() {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        tracing::warn!(error = %e, "unknown profile, using default");
                        None
                    }
                })
                .unwrap_or(defaults.profile),
            unsupported: lookup("API_SURFACE_STRICT")
                .map(|s| {
                    if parse_flag(&s) {
                        UnsupportedPolicy::Strict
                    } else {
                        UnsupportedPolicy::Lenient
                    }
                })
                .unwrap_or(defaults.unsupported),
        }
    }

    /// Set include prefixes.
    pub fn with_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Set exclude prefixes.
    pub fn with_excludes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the snapshot path.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Enable the derivation artifact.
    pub fn with_derivation_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.derivation_output_path = Some(path.into());
        self
    }

    /// Toggle verbose logging.
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    /// Set the snapshot profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Set unsupported-kind handling.
    pub fn with_unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported = policy;
        self
    }

    /// Scope policy for this configuration.
    ///
    /// Prefixes set through the builders are validated here as well.
    pub fn scope(&self) -> ScopePolicy {
        ScopePolicy::new(self.includes.iter(), self.excludes.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SurfaceConfig::from_lookup(|_| None);
        assert_eq!(config, SurfaceConfig::default());
        assert_eq!(config.output_path, PathBuf::from(".public_api"));
        assert!(config.derivation_output_path.is_none());
        assert_eq!(config.profile, Profile::Minimal);
        assert!(!config.unsupported.is_strict());
    }

    #[test]
    fn test_env_values() {
        let config = SurfaceConfig::from_lookup(lookup(&[
            ("API_SURFACE_INCLUDES", "pkg, other ,,"),
            ("API_SURFACE_EXCLUDES", "pkg.internal"),
            ("API_SURFACE_OUTFILE", "api.json"),
            ("API_SURFACE_DERIVE_OUTFILE", "derive.json"),
            ("API_SURFACE_DEBUG", "yes"),
            ("API_SURFACE_PROFILE", "full-string"),
            ("API_SURFACE_STRICT", "1"),
        ]));

        assert_eq!(config.includes, vec!["pkg", "other"]);
        assert_eq!(config.excludes, vec!["pkg.internal"]);
        assert_eq!(config.output_path, PathBuf::from("api.json"));
        assert_eq!(config.derivation_output_path, Some(PathBuf::from("derive.json")));
        assert!(config.debug_logging);
        assert_eq!(config.profile, Profile::FullString);
        assert!(config.unsupported.is_strict());
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = SurfaceConfig::from_lookup(lookup(&[
            ("API_SURFACE_PROFILE", "xml"),
            ("API_SURFACE_STRICT", "maybe"),
            ("API_SURFACE_OUTFILE", "  "),
        ]));
        assert_eq!(config.profile, Profile::Minimal);
        assert!(!config.unsupported.is_strict());
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_builders_feed_scope() {
        let config = SurfaceConfig::default()
            .with_includes(["pkg", "bad prefix"])
            .with_excludes(["pkg.internal"]);
        let scope = config.scope();
        assert_eq!(scope.includes(), ["pkg".to_string()]);
        assert!(scope.in_excluded("pkg.internal.X"));
    }
}
