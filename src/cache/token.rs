use serde::Serialize;

use crate::utils::constants::{EXPIRATION_TOLERANCE_SECS, REFRESH_BEFORE_SECS_LEFT};

/// Cached state for one managed access token
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TokenRecord {
    pub name: String,
    /// ordered, space-joined on the wire
    pub scopes: Vec<String>,
    /// `None` until fetched
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    /// UNIX timestamp, only trusted while `access_token` is set
    pub expires_at: i64,
    pub ignore_expiration: bool,
    /// last token endpoint payload, kept for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_response: Option<serde_json::Value>,
}

impl TokenRecord {
    pub fn new(name: impl Into<String>, scopes: Vec<String>, ignore_expiration: bool) -> Self {
        Self {
            name: name.into(),
            scopes: dedup_scopes(scopes),
            ignore_expiration,
            ..Self::default()
        }
    }

    /// Non-empty cached token value
    pub fn cached_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Never fetched, or inside the refresh lead time
    pub fn needs_refresh(&self, now: i64) -> bool {
        match self.cached_token() {
            None => true,
            Some(_) => now > self.expires_at.saturating_sub(REFRESH_BEFORE_SECS_LEFT),
        }
    }

    /// Past nominal expiry but still inside the grace period
    pub fn within_tolerance(&self, now: i64) -> bool {
        self.cached_token().is_some() && now < self.expires_at.saturating_add(EXPIRATION_TOLERANCE_SECS)
    }

    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }
}

/// Keep the first occurrence of each scope
pub(crate) fn dedup_scopes(scopes: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(scopes.len());
    for scope in scopes {
        if !out.contains(&scope) {
            out.push(scope);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(token: Option<&str>, expires_at: i64) -> TokenRecord {
        TokenRecord {
            access_token: token.map(str::to_owned),
            expires_at,
            ..TokenRecord::new("test", vec![], false)
        }
    }

    #[test]
    fn never_fetched_needs_refresh() {
        assert!(record(None, i64::MAX).needs_refresh(0));
        assert!(record(Some(""), i64::MAX).needs_refresh(0));
    }

    #[test]
    fn refresh_lead_time() {
        let now = 1_000_000;
        assert!(!record(Some("tok"), now + REFRESH_BEFORE_SECS_LEFT + 1).needs_refresh(now));
        assert!(!record(Some("tok"), now + REFRESH_BEFORE_SECS_LEFT).needs_refresh(now));
        assert!(record(Some("tok"), now + REFRESH_BEFORE_SECS_LEFT - 1).needs_refresh(now));
        assert!(record(Some("tok"), now - 10).needs_refresh(now));
    }

    #[test]
    fn tolerance_window() {
        let now = 1_000_000;
        assert!(record(Some("tok"), now + 300).within_tolerance(now));
        assert!(record(Some("tok"), now - EXPIRATION_TOLERANCE_SECS + 1).within_tolerance(now));
        assert!(!record(Some("tok"), now - EXPIRATION_TOLERANCE_SECS).within_tolerance(now));
        assert!(!record(None, now + 300).within_tolerance(now));
    }

    #[test]
    fn extreme_expiry_does_not_overflow() {
        let now = 1_000_000;
        assert!(record(Some("tok"), i64::MIN).needs_refresh(now));
        assert!(!record(Some("tok"), i64::MIN).within_tolerance(now));
        assert!(!record(Some("tok"), i64::MAX).needs_refresh(now));
        assert!(record(Some("tok"), i64::MAX).within_tolerance(now));
    }

    #[test]
    fn serialized_record_hides_the_token() {
        let record = record(Some("secret-value"), 42);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("access_token").is_none());
        assert_eq!(json["expires_at"], 42);
        assert!(json.get("last_response").is_none());
    }

    #[test]
    fn scopes_keep_order_without_duplicates() {
        let record = TokenRecord::new(
            "uid",
            vec!["uid".into(), "cn".into(), "uid".into()],
            false,
        );
        assert_eq!(record.scopes, vec!["uid", "cn"]);
        assert_eq!(record.scope_param(), "uid cn");
    }
}
