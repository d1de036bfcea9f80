//! Process-wide HMAC signing key

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::errors::ConfigurationError;

/// Minimum HMAC-SHA256 key size in bits
pub const MIN_KEY_BITS: usize = 256;

/// HMAC-SHA256 key derived once from `jwt.secret`.
///
/// The raw secret is base64-encoded and the bytes of the encoded string are
/// the key material. Built during bootstrap, then shared read-only (usually
/// behind an `Arc`) by every signing and verification call.
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    /// Derives the signing key from the configured secret
    ///
    /// # Errors
    ///
    /// * [`ConfigurationError::MissingSecret`] - the secret is empty or blank
    /// * [`ConfigurationError::WeakSecret`] - the derived key is shorter than 256 bits
    pub fn from_secret(secret: &str) -> Result<Self, ConfigurationError> {
        if secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }

        let encoded = STANDARD.encode(secret.as_bytes());
        let bits = encoded.len() * 8;
        if bits < MIN_KEY_BITS {
            return Err(ConfigurationError::WeakSecret {
                bits,
                required: MIN_KEY_BITS,
            });
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(encoded.as_bytes()),
            decoding: DecodingKey::from_secret(encoded.as_bytes()),
        })
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}
