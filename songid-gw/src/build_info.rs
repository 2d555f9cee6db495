//! Compile-time build identification (see build.rs)

use serde::Serialize;

/// Source revision, build time and profile of the running binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// `git describe` output, or "unknown" outside a checkout
    pub git_rev: &'static str,
    /// RFC 3339, UTC
    pub built_at: &'static str,
    pub profile: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    git_rev: env!("SONGID_GIT_REV"),
    built_at: env!("SONGID_BUILT_AT"),
    profile: env!("SONGID_BUILD_PROFILE"),
};

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "v{} [{}] built {} ({})",
            self.version, self.git_rev, self.built_at, self.profile
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_is_stamped() {
        assert_eq!(BUILD_INFO.version, env!("CARGO_PKG_VERSION"));
        assert!(!BUILD_INFO.git_rev.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(BUILD_INFO.built_at).is_ok());
        assert!(!BUILD_INFO.profile.is_empty());
    }

    #[test]
    fn test_display_for_startup_log() {
        let info = BuildInfo {
            version: "1.2.3",
            git_rev: "abcd1234-dirty",
            built_at: "2026-01-02T03:04:05Z",
            profile: "release",
        };
        assert_eq!(
            info.to_string(),
            "v1.2.3 [abcd1234-dirty] built 2026-01-02T03:04:05Z (release)"
        );
    }
}
