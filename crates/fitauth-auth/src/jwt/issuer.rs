//! Issues and validates role-scoped bearer tokens.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fitauth_core::config::AuthConfig;
use fitauth_core::error::AppError;
use fitauth_core::result::AppResult;
use fitauth_core::traits::Clock;
use fitauth_core::types::GymId;
use fitauth_entity::account::AccountRole;

use super::claims::Claims;
use super::decoder::JwtDecoder;
use super::encoder::JwtEncoder;

/// A freshly signed token with its decoded claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// The claims it carries.
    pub claims: Claims,
}

impl IssuedToken {
    /// Expiration timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}

/// Stateless token service. Validity depends only on signature and `exp`.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Creates an issuer using the configured signing secret.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoder: JwtEncoder::new(&config.jwt_secret),
            decoder: JwtDecoder::new(&config.jwt_secret),
            clock,
        }
    }

    /// Signs a token for `subject` valid for `ttl` from now.
    pub fn issue(
        &self,
        subject: &str,
        role: AccountRole,
        tenant: Option<GymId>,
        ttl: Duration,
    ) -> AppResult<IssuedToken> {
        if ttl <= Duration::zero() {
            return Err(AppError::validation("Token TTL must be positive"));
        }

        let now = self.clock.now();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            tenant,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        let token = self.encoder.encode(&claims)?;

        debug!(subject, role = %role, exp = claims.exp, "Issued token");
        Ok(IssuedToken { token, claims })
    }

    /// Checks signature and expiry and returns the claims.
    ///
    /// Fails with `ErrorKind::Malformed` for unparsable or badly signed
    /// tokens and `ErrorKind::Expired` once the clock passes `exp`.
    pub fn validate(&self, token: &str) -> AppResult<Claims> {
        let claims = self.decoder.decode(token)?;
        if claims.is_expired_at(self.clock.now()) {
            return Err(AppError::expired("Token has expired"));
        }
        Ok(claims)
    }
}
