//! Build metadata: version, build timestamp and commit hash
//!
//! Values are injected at compile time (see `build.rs`) and fall back to
//! `"dev"` / `"unknown"` / `"unknown"`. A [`BuildInfo`] is created once in
//! `main` and handed to whatever needs it.

use std::fmt;

use serde::Serialize;

/// Version reported when none was stamped at build time.
pub const DEFAULT_VERSION: &str = "dev";

/// Build time and commit reported when none was stamped at build time.
pub const DEFAULT_UNKNOWN: &str = "unknown";

/// Immutable build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    version: String,
    build_time: String,
    commit: String,
}

impl BuildInfo {
    /// Create build info; empty values resolve to their defaults.
    pub fn new(
        version: impl Into<String>,
        build_time: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            version: or_default(version.into(), DEFAULT_VERSION),
            build_time: or_default(build_time.into(), DEFAULT_UNKNOWN),
            commit: or_default(commit.into(), DEFAULT_UNKNOWN),
        }
    }

    /// Build info stamped into this binary by `build.rs`.
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("GHOST_TOWN_VERSION").unwrap_or_default(),
            option_env!("GHOST_TOWN_BUILD_TIME").unwrap_or_default(),
            option_env!("GHOST_TOWN_COMMIT").unwrap_or_default(),
        )
    }

    /// Semantic version, never empty.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn build_time(&self) -> &str {
        &self.build_time
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Three-line human readable block:
    ///
    /// ```text
    /// Version: 1.0.0
    /// Build: 2024-01-01T00:00:00Z
    /// Commit: abc1234
    /// ```
    pub fn build_info(&self) -> String {
        format!(
            "Version: {}\nBuild: {}\nCommit: {}",
            self.version, self.build_time, self.commit
        )
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_values_when_creating_then_uses_defaults() {
        let info = BuildInfo::default();

        assert_eq!(info.version(), "dev");
        assert_eq!(info.build_time(), "unknown");
        assert_eq!(info.commit(), "unknown");
    }

    #[test]
    fn given_injected_version_when_rendering_then_contains_it() {
        let info = BuildInfo::new("1.0.0", "", "");

        assert_eq!(info.version(), "1.0.0");
        assert!(info.build_info().contains("1.0.0"));
    }

    #[test]
    fn given_all_values_when_rendering_then_three_lines_in_order() {
        let info = BuildInfo::new("2.3.4", "2024-05-01T12:00:00Z", "deadbeef");

        assert_eq!(
            info.build_info(),
            "Version: 2.3.4\nBuild: 2024-05-01T12:00:00Z\nCommit: deadbeef"
        );
    }

    #[test]
    fn given_blank_value_when_creating_then_falls_back() {
        let info = BuildInfo::new("   ", "", "abc");

        assert_eq!(info.version(), DEFAULT_VERSION);
        assert_eq!(info.commit(), "abc");
    }

    #[test]
    fn display_is_the_version() {
        let info = BuildInfo::new("0.9.0", "t", "c");
        assert_eq!(info.to_string(), info.version());
    }

    #[test]
    fn build_env_info_contains_its_version() {
        let info = BuildInfo::from_build_env();

        assert!(!info.version().is_empty());
        assert!(info.build_info().contains(info.version()));
    }

    #[test]
    fn serializes_all_fields() {
        let info = BuildInfo::new("1.2.3", "now", "cafe");
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["version"], "1.2.3");
        assert_eq!(json["build_time"], "now");
        assert_eq!(json["commit"], "cafe");
    }
}
