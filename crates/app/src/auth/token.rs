//! Bearer token formatting, signing, and verification.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Bearer token identifier prefix.
pub const TOKEN_PREFIX: &str = "vt";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVersion {
    V1,
}

impl TokenVersion {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl FromStr for TokenVersion {
    type Err = TokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(TokenError::UnsupportedVersion),
        }
    }
}

/// Secret key used to sign and verify bearer tokens.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Vec<u8>,
}

impl SigningKey {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            bytes: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        HmacSha256::new_from_slice(&self.bytes).map_err(|_| TokenError::InvalidKey)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the username the token was issued to.
    pub sub: String,

    /// Unique token id.
    pub jti: Uuid,

    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token format is invalid")]
    InvalidFormat,

    #[error("token uses an unsupported version")]
    UnsupportedVersion,

    #[error("token payload encoding is invalid")]
    InvalidPayload,

    #[error("token signature mismatch")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,

    #[error("signing key is invalid")]
    InvalidKey,
}

/// Sign `claims` into the wire format `vt_v1_{payload}.{signature}`, where
/// the payload is the URL-safe base64 of the claims JSON and the signature
/// is HMAC-SHA256 over everything before the dot.
///
/// # Errors
///
/// Returns an error when the claims cannot be encoded or the key is
/// rejected by the MAC.
pub fn sign_token(claims: &TokenClaims, key: &SigningKey) -> Result<String, TokenError> {
    let json = serde_json::to_vec(claims).map_err(|_| TokenError::InvalidPayload)?;
    let payload = URL_SAFE_NO_PAD.encode(json);
    let signing_input = format!("{TOKEN_PREFIX}_{}_{payload}", TokenVersion::V1.segment());

    let mut mac = key.mac()?;

    mac.update(signing_input.as_bytes());

    let signature = encode_hex(&mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}

/// Verify a token's signature and expiry against `key` at `now`, returning
/// its claims.
///
/// # Errors
///
/// Returns the specific [`TokenError`] for a malformed, tampered, or
/// expired token.
pub fn verify_token(
    token: &str,
    key: &SigningKey,
    now: Timestamp,
) -> Result<TokenClaims, TokenError> {
    let (signing_input, signature_hex) =
        token.split_once('.').ok_or(TokenError::InvalidFormat)?;

    let mut parts = signing_input.splitn(3, '_');

    let prefix = parts.next().ok_or(TokenError::InvalidFormat)?;
    let version_segment = parts.next().ok_or(TokenError::InvalidFormat)?;
    let payload = parts.next().ok_or(TokenError::InvalidFormat)?;

    if prefix != TOKEN_PREFIX {
        return Err(TokenError::InvalidFormat);
    }

    let _version = TokenVersion::from_str(version_segment)?;

    let signature = decode_hex(signature_hex).ok_or(TokenError::InvalidFormat)?;

    let mut mac = key.mac()?;

    mac.update(signing_input.as_bytes());

    // Constant-time comparison.
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let json = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::InvalidPayload)?;

    let claims: TokenClaims =
        serde_json::from_slice(&json).map_err(|_| TokenError::InvalidPayload)?;

    if claims.exp <= now.as_second() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }

    let bytes = hex.as_bytes();
    let mut decoded = Vec::with_capacity(hex.len() / 2);

    for pair in bytes.chunks_exact(2) {
        let hi = decode_hex_nibble(pair[0])?;
        let lo = decode_hex_nibble(pair[1])?;

        decoded.push((hi << 4) | lo);
    }

    Some(decoded)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
