//! Message push signature verification
//!
//! When a developer server is registered for message push, WeChat sends a
//! `GET` with `signature`, `timestamp`, `nonce` and `echostr`. The signature is
//! the SHA-1 of the token, timestamp and nonce sorted and joined together.

use serde::Deserialize;
use sha1::{Digest, Sha1};

/// Body returned to WeChat when verification fails
pub const FAIL_BODY: &str = "fail";

/// Query parameters of a message push verification request.
///
/// Missing parameters deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessagePush {
    pub signature: String,
    pub timestamp: String,
    pub nonce: String,
    pub echostr: String,
}

/// Outcome of a verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Signature matched, carries the echo string to send back
    Passed(String),
    Failed,
}

impl Verification {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verification::Passed(_))
    }

    /// Response body expected by WeChat
    pub fn into_body(self) -> String {
        match self {
            Verification::Passed(echostr) => echostr,
            Verification::Failed => FAIL_BODY.to_string(),
        }
    }
}

impl MessagePush {
    pub fn verify(&self, token: &str) -> Verification {
        verify_message_push(
            token,
            &self.timestamp,
            &self.nonce,
            &self.signature,
            &self.echostr,
        )
    }
}

/// Compute the push signature: sort the three values byte-wise, concatenate,
/// then hex-encode the SHA-1 digest in lowercase.
pub fn sign(token: &str, timestamp: &str, nonce: &str) -> String {
    let mut parts = [token, timestamp, nonce];
    parts.sort_unstable();

    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Verify a message push request against the configured token
pub fn verify_message_push(
    token: &str,
    timestamp: &str,
    nonce: &str,
    signature: &str,
    echostr: &str,
) -> Verification {
    if sign(token, timestamp, nonce) == signature {
        Verification::Passed(echostr.to_string())
    } else {
        Verification::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "token123";
    const TIMESTAMP: &str = "1410693419";
    const NONCE: &str = "test";
    // sha1("1410693419" + "test" + "token123")
    const EXPECTED: &str = "47425abf25b775584d7a3c67c503c095dae7e296";

    #[test]
    fn test_known_vector() {
        assert_eq!(sign(TOKEN, TIMESTAMP, NONCE), EXPECTED);
        assert_eq!(
            verify_message_push(TOKEN, TIMESTAMP, NONCE, EXPECTED, "echo"),
            Verification::Passed("echo".to_string())
        );
    }

    #[test]
    fn test_flipped_signature_fails() {
        // last hex digit 6 -> 7 is a single bit flip
        let flipped = format!("{}7", &EXPECTED[..39]);
        assert_ne!(flipped, EXPECTED);
        assert_eq!(
            verify_message_push(TOKEN, TIMESTAMP, NONCE, &flipped, "echo"),
            Verification::Failed
        );
    }

    #[test]
    fn test_zero_signature_fails() {
        let zeros = "0".repeat(40);
        assert!(!verify_message_push(TOKEN, TIMESTAMP, NONCE, &zeros, "echo").is_passed());
        assert!(!verify_message_push("", "", "", &zeros, "echo").is_passed());
    }

    #[test]
    fn test_sign_is_order_independent() {
        let abc = sign("a1", "b2", "c3");
        assert_eq!(abc, sign("b2", "a1", "c3"));
        assert_eq!(abc, sign("c3", "b2", "a1"));
        assert_eq!(abc, sign("a1", "c3", "b2"));
    }

    #[test]
    fn test_single_character_change_alters_signature() {
        let base = sign(TOKEN, TIMESTAMP, NONCE);
        assert_ne!(base, sign("token124", TIMESTAMP, NONCE));
        assert_ne!(base, sign(TOKEN, "1410693418", NONCE));
        assert_ne!(base, sign(TOKEN, TIMESTAMP, "tesu"));
    }

    #[test]
    fn test_self_consistency() {
        let triples = [
            ("secret", "1700000000", "abcDEF123"),
            ("", "", ""),
            ("Z", "a", "0"),
            ("same", "same", "same"),
        ];
        for (token, timestamp, nonce) in triples {
            let signature = sign(token, timestamp, nonce);
            assert_eq!(signature.len(), 40);
            assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
            assert_eq!(
                verify_message_push(token, timestamp, nonce, &signature, "ok"),
                Verification::Passed("ok".to_string())
            );
        }
    }

    #[test]
    fn test_empty_token_still_signs() {
        // sha1("1410693419test")
        assert_eq!(
            sign("", TIMESTAMP, NONCE),
            "2b20fd885852c80c73c81be692d00b57be41af27"
        );
    }

    #[test]
    fn test_uppercase_signature_is_rejected() {
        let upper = EXPECTED.to_uppercase();
        assert!(!verify_message_push(TOKEN, TIMESTAMP, NONCE, &upper, "echo").is_passed());
    }

    #[test]
    fn test_message_push_verify_and_body() {
        let push = MessagePush {
            signature: EXPECTED.to_string(),
            timestamp: TIMESTAMP.to_string(),
            nonce: NONCE.to_string(),
            echostr: "4827364".to_string(),
        };
        assert_eq!(push.verify(TOKEN).into_body(), "4827364");
        assert_eq!(push.verify("other").into_body(), FAIL_BODY);
    }

    #[test]
    fn test_missing_query_fields_default_to_empty() {
        let push: MessagePush = serde_json::from_str(r#"{"signature":"abc"}"#).unwrap();
        assert_eq!(push.signature, "abc");
        assert_eq!(push.timestamp, "");
        assert_eq!(push.echostr, "");
    }
}
