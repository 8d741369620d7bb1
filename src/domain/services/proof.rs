use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Payload carried by a booking's scannable proof.
///
/// Not a cryptographic credential: the payload is readable by anyone who
/// decodes it. It only needs to survive the round trip through QR rendering
/// and an untrusted physical scan.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProofClaims {
    pub booking_id: String,
    pub user_id: String,
    pub event_id: String,
    pub issued_at: DateTime<Utc>,
}

/// Renders booking identity + issue time into the opaque token string
/// embedded in the scannable proof.
pub fn issue(booking_id: &str, user_id: &str, event_id: &str, issued_at: DateTime<Utc>) -> String {
    let payload = serde_json::json!({
        "booking_id": booking_id,
        "user_id": user_id,
        "event_id": event_id,
        "issued_at": issued_at.to_rfc3339(),
    })
    .to_string();

    general_purpose::URL_SAFE_NO_PAD.encode(payload)
}

/// Decodes a raw scan string back into proof claims.
///
/// This is the trust boundary between the physical scan and the attendance
/// redeemer: any garbled, truncated or attacker-controlled input must come
/// back as `InvalidToken`, never a panic.
pub fn parse(raw: &str) -> Result<ProofClaims, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidToken("empty scan payload".to_string()));
    }

    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(trimmed)
        .map_err(|_| AppError::InvalidToken("payload is not valid base64".to_string()))?;

    serde_json::from_slice(&bytes)
        .map_err(|_| AppError::InvalidToken("payload is not a well-formed proof".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose};

    #[test]
    fn test_issue_then_parse_preserves_identity() {
        let issued_at = Utc::now();
        let token = issue("alice_ev1", "alice", "ev1", issued_at);

        let claims = parse(&token).expect("freshly issued token must parse");
        assert_eq!(claims.booking_id, "alice_ev1");
        assert_eq!(claims.user_id, "alice");
        assert_eq!(claims.event_id, "ev1");
        assert_eq!(claims.issued_at.timestamp(), issued_at.timestamp());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse(""), Err(AppError::InvalidToken(_))));
        assert!(matches!(parse("   "), Err(AppError::InvalidToken(_))));
        assert!(matches!(parse("not base64 at all!!"), Err(AppError::InvalidToken(_))));

        // Valid base64, but not JSON underneath.
        let not_json = general_purpose::URL_SAFE_NO_PAD.encode("hello world");
        assert!(matches!(parse(&not_json), Err(AppError::InvalidToken(_))));

        // Valid JSON missing required fields.
        let wrong_shape = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"booking_id": "x"}"#);
        assert!(matches!(parse(&wrong_shape), Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let token = issue("bob_ev2", "bob", "ev2", Utc::now());
        let padded = format!("  {}\n", token);
        assert!(parse(&padded).is_ok());
    }
}
