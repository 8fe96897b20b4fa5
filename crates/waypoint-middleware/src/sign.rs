//! Keyed signing for cookie values.
//!
//! Tokens carry the value and an HMAC-SHA256 tag over it, both
//! URL-safe-base64 encoded, joined by a dot. Verification recomputes the
//! tag with the shared secret and compares in constant time.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};

const BLOCK_SIZE: usize = 64;

/// Signs a value, producing a tamper-evident token.
pub fn sign(secret: &[u8], value: &str) -> String {
    let tag = hmac_sha256(secret, value.as_bytes());
    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(value),
        URL_SAFE_NO_PAD.encode(tag)
    )
}

/// Verifies a token, returning the embedded value only when the tag
/// checks out under the given secret.
pub fn verify(secret: &[u8], token: &str) -> Option<String> {
    let (value_b64, tag_b64) = token.split_once('.')?;
    let value = URL_SAFE_NO_PAD.decode(value_b64).ok()?;
    let tag = URL_SAFE_NO_PAD.decode(tag_b64).ok()?;

    let expected = hmac_sha256(secret, &value);
    if !constant_time_eq(&tag, &expected) {
        return None;
    }
    String::from_utf8(value).ok()
}

/// HMAC-SHA256 per RFC 2104.
fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let mut key_block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        key_block[..32].copy_from_slice(&Sha256::digest(key));
    } else {
        key_block[..key.len()].copy_from_slice(key);
    }

    let mut inner = Sha256::new();
    inner.update(key_block.map(|b| b ^ 0x36));
    inner.update(message);
    let inner_hash = inner.finalize();

    let mut outer = Sha256::new();
    outer.update(key_block.map(|b| b ^ 0x5c));
    outer.update(inner_hash);
    outer.finalize().into()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    // RFC 4231 test vectors for HMAC-SHA-256.
    #[test]
    fn test_hmac_rfc4231_case_1() {
        let key = [0x0b_u8; 20];
        let tag = hmac_sha256(&key, b"Hi There");
        assert_eq!(
            to_hex(&tag),
            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7"
        );
    }

    #[test]
    fn test_hmac_rfc4231_case_2() {
        let tag = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            to_hex(&tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let token = sign(b"secret", "alice");
        assert_eq!(verify(b"secret", &token), Some("alice".to_string()));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = sign(b"secret", "alice");
        let forged = token.replace('.', "x");
        assert_eq!(verify(b"secret", &forged), None);

        let (_, tag) = token.split_once('.').unwrap();
        let swapped = format!("{}.{tag}", URL_SAFE_NO_PAD.encode("mallory"));
        assert_eq!(verify(b"secret", &swapped), None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(b"secret", "alice");
        assert_eq!(verify(b"other-secret", &token), None);
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert_eq!(verify(b"secret", "no-dot-here"), None);
        assert_eq!(verify(b"secret", "!!!.???"), None);
        assert_eq!(verify(b"secret", ""), None);
    }
}
