// src/services/auth.rs

use std::path::Path;

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::auth::{AccessClaims, Claims},
};

/// The one signing algorithm accepted. Anything else in the token header is
/// rejected before the signature is looked at.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::PS256;

// Verifies pre-issued bearer tokens against a single RSA public key.
// Pure: never touches the store.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_rsa_pem(pem)?;

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        // Issuers may stamp an audience; this service is not bound to one.
        validation.validate_aud = false;

        Ok(Self { key, validation })
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let pem = std::fs::read(path)
            .map_err(|e| anyhow::anyhow!("reading public key {}: {}", path.display(), e))?;
        Self::from_rsa_pem(&pem)
            .map_err(|e| anyhow::anyhow!("parsing public key {}: {}", path.display(), e))
    }

    /// Checks the token and types its claims. Expiry is reported apart from
    /// every other failure so clients can re-authenticate.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, AppError> {
        if token.is_empty() {
            return Err(AppError::InvalidToken);
        }

        let token_data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => {
                    tracing::debug!("jwt rejected: {}", e);
                    AppError::InvalidToken
                }
            }
        })?;

        Ok(AccessClaims::from(token_data.claims))
    }
}
