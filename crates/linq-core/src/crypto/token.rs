use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::OffsetDateTime;

type HmacSha256 = Hmac<Sha256>;

/// Only HS256 is issued or accepted.
const HEADER_JSON: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub name: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds. The token is rejected once `now >= exp`.
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("failed to encode claims: {0}")]
    Encode(#[from] serde_json::Error),
}

fn mac_for(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size")
}

fn now_unix() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// Sign an HS256 bearer token for `name`, valid for `ttl_secs` from `now`.
pub fn sign_token_at(
    secret: &str,
    name: &str,
    ttl_secs: i64,
    now: i64,
) -> Result<String, TokenError> {
    let claims = Claims {
        name: name.to_string(),
        iat: now,
        exp: now.saturating_add(ttl_secs),
    };

    let header = URL_SAFE_NO_PAD.encode(HEADER_JSON);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
    let signing_input = format!("{header}.{payload}");

    let mut mac = mac_for(secret);
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}

pub fn sign_token(secret: &str, name: &str, ttl_secs: i64) -> Result<String, TokenError> {
    sign_token_at(secret, name, ttl_secs, now_unix())
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_token_at(secret: &str, token: &str, now: i64) -> Result<Claims, TokenError> {
    let mut parts = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    let header_json = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::Malformed)?;
    if header_json != HEADER_JSON.as_bytes() {
        return Err(TokenError::Malformed);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::Malformed)?;

    // Claims are only decoded once the signature checks out.
    let mut mac = mac_for(secret);
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;
    let claims: Claims = serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

    if now >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, TokenError> {
    verify_token_at(secret, token, now_unix())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";
    const NOW: i64 = 1_700_000_000;

    #[test]
    fn signed_token_verifies_and_carries_claims() {
        let token = sign_token_at(SECRET, "alice", 3600, NOW).unwrap();
        let claims = verify_token_at(SECRET, &token, NOW + 10).unwrap();

        assert_eq!(claims.name, "alice");
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + 3600);
    }

    #[test]
    fn token_is_rejected_at_expiry() {
        let token = sign_token_at(SECRET, "alice", 60, NOW).unwrap();

        assert!(verify_token_at(SECRET, &token, NOW + 59).is_ok());
        assert!(matches!(
            verify_token_at(SECRET, &token, NOW + 60),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn wrong_secret_is_bad_signature() {
        let token = sign_token_at(SECRET, "alice", 60, NOW).unwrap();

        assert!(matches!(
            verify_token_at("other-secret", &token, NOW),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = sign_token_at(SECRET, "alice", 60, NOW).unwrap();
        let forged_claims = Claims {
            name: "mallory".into(),
            iat: NOW,
            exp: NOW + 60,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());

        let parts: Vec<&str> = token.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert!(matches!(
            verify_token_at(SECRET, &forged, NOW),
            Err(TokenError::BadSignature)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
            assert!(
                matches!(verify_token_at(SECRET, token, NOW), Err(TokenError::Malformed)),
                "expected malformed for {token:?}"
            );
        }
    }
}
