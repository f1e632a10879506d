//! Path classification.
//!
//! The route table is plain data built once at startup. Each flag of a
//! [`RouteClassification`] is computed independently by case-sensitive prefix
//! matching, so list order never matters.

/// Login page. Anonymous visitors are sent here with a `callbackUrl`.
pub const LOGIN_PATH: &str = "/auth/prihlasenie";
/// Profile-completion page. Signed-in users without a profile land here.
pub const PROFILE_SETUP_PATH: &str = "/profily/upravit";
/// Main authenticated page (the feed).
pub const LANDING_PATH: &str = "/prispevky";

const PUBLIC_PREFIXES: &[&str] = &[
    "/auth/prihlasenie",
    "/auth/registracia",
    "/auth/overenie",
    "/auth/odhlasenie",
    "/o-nas",
    "/swagger-ui/",
    "/api-docs/",
];

/// Operational endpoints match exactly, so `/healthy-feed` stays gated.
const PUBLIC_EXACT: &[&str] = &["/", "/health", "/metrics", "/swagger-ui"];

const AUTH_ONLY_PREFIXES: &[&str] = &["/auth/prihlasenie", "/auth/registracia"];

const EXEMPT_PREFIXES: &[&str] = &["/profily/upravit", "/api/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteClassification {
    /// Skips gating entirely (unless also auth-only).
    pub is_public: bool,
    /// Meant for anonymous visitors only; signed-in users are sent away.
    pub is_auth_only: bool,
    /// Skips the profile-completeness check.
    pub is_exempt: bool,
}

impl RouteClassification {
    /// Every path that isn't public needs a session.
    pub fn is_protected(&self) -> bool {
        !self.is_public
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    public_prefixes: Vec<String>,
    public_exact: Vec<String>,
    auth_only_prefixes: Vec<String>,
    exempt_prefixes: Vec<String>,
}

impl RouteTable {
    /// Builds the table, adding the framework asset prefix to the exempt list.
    pub fn new(asset_prefix: &str) -> Self {
        let mut exempt_prefixes: Vec<String> =
            EXEMPT_PREFIXES.iter().map(|p| p.to_string()).collect();
        exempt_prefixes.push(asset_prefix.to_string());

        Self {
            public_prefixes: PUBLIC_PREFIXES.iter().map(|p| p.to_string()).collect(),
            public_exact: PUBLIC_EXACT.iter().map(|p| p.to_string()).collect(),
            auth_only_prefixes: AUTH_ONLY_PREFIXES.iter().map(|p| p.to_string()).collect(),
            exempt_prefixes,
        }
    }

    #[cfg(test)]
    pub(crate) fn without_exemptions() -> Self {
        Self {
            exempt_prefixes: Vec::new(),
            ..Self::default()
        }
    }

    pub fn classify(&self, path: &str) -> RouteClassification {
        RouteClassification {
            is_public: self.public_exact.iter().any(|p| p == path)
                || starts_with_any(path, &self.public_prefixes),
            is_auth_only: starts_with_any(path, &self.auth_only_prefixes),
            is_exempt: starts_with_any(path, &self.exempt_prefixes),
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new("/_next/")
    }
}

fn starts_with_any(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}
