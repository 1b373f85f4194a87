use chrono::Utc;

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

/// Expiry timestamp for a token valid for `ttl_seconds` from now
pub fn expires_in(ttl_seconds: i64) -> i64 {
    now_i64().saturating_add(ttl_seconds)
}
