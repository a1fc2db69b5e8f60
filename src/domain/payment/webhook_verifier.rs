//! Creem webhook signature verification.
//!
//! The `creem-signature` header carries the lowercase hex HMAC-SHA256 of the
//! raw request body, keyed with the webhook secret.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::creem_event::CreemWebhookEvent;
use super::webhook_errors::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Verifier for Creem webhook signatures.
pub struct CreemWebhookVerifier {
    secret: SecretString,
}

impl CreemWebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies the signature, then decodes the event.
    ///
    /// # Errors
    ///
    /// - `MissingSignature` - empty body or signature
    /// - `InvalidSignature` - signature is not hex or does not match
    /// - `ParseError` - body is not a well-formed Creem event
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<CreemWebhookEvent, WebhookError> {
        let signature = signature.trim();
        if payload.is_empty() || signature.is_empty() {
            return Err(WebhookError::MissingSignature);
        }

        let provided = hex::decode(signature).map_err(|_| {
            tracing::warn!("Creem webhook signature is not valid hex");
            WebhookError::InvalidSignature
        })?;

        let expected = self.compute_signature(payload)?;
        if !constant_time_compare(&expected, &provided) {
            tracing::warn!("Creem webhook signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }

        CreemWebhookEvent::parse(payload)
    }

    fn compute_signature(&self, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::NotConfigured)?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Hex signature of a payload, as Creem would send it. Used by test fixtures.
pub fn sign_payload(secret: &str, payload: &[u8]) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
