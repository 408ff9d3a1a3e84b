use anyhow::{bail, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::api::user::{TokenResponse, UserData};

/// JWT issuer identifier
const ISSUER: &str = "ideahub/portal-tokens";

/// Audience value shared by every portal token
const AUDIENCE: &str = "portal";

/// Registered claim values (RFC 7519) plus the portal's role claim.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    pub aud: String,  // Intended recipient of the token
    pub exp: usize,   // Token expiration time (timestamp)
    pub iat: usize,   // Time at which token was issued (timestamp)
    pub iss: String,  // Token issuer
    pub nbf: usize,   // Time before which token must not be accepted
    pub sub: String,  // Subject of the token (user name)
    pub role: String, // Role the subject holds
}

/// The identity a validated token proves.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenUser {
    pub name: String,
    pub role: String,
}

/// Signs session tokens with the portal's RSA private key.
pub struct JwtTokenGenerator {
    key: EncodingKey,
    expiry: usize,
}

impl JwtTokenGenerator {
    /// Creates a generator from an RSA private key in PEM format; tokens
    /// expire `expiry` seconds after issuance.
    pub fn new(private_key: &[u8], expiry: u64) -> Result<Self> {
        let key = match EncodingKey::from_rsa_pem(private_key) {
            Ok(key) => key,
            Err(e) => bail!("parse RSA private key for token generation failed: {e}"),
        };
        Ok(Self {
            key,
            expiry: expiry as usize,
        })
    }

    pub fn generate_token(&self, user: &UserData, now: u64) -> Result<TokenResponse> {
        let now = now as usize;

        let claims = Claims {
            aud: String::from(AUDIENCE),
            exp: now + self.expiry,
            iat: now,
            iss: String::from(ISSUER),
            nbf: now,
            sub: user.name.clone(),
            role: user.role.clone(),
        };

        match encode(&Header::new(Algorithm::RS256), &claims, &self.key) {
            Ok(token) => Ok(TokenResponse {
                token,
                expire_after: claims.exp as u64,
            }),
            Err(e) => bail!("generate jwt token failed: {e}"),
        }
    }
}

/// Verifies session tokens against the portal's RSA public key.
pub struct JwtTokenValidator {
    key: DecodingKey,
}

impl JwtTokenValidator {
    pub fn new(public_key: &[u8]) -> Result<Self> {
        let key = match DecodingKey::from_rsa_pem(public_key) {
            Ok(key) => key,
            Err(e) => bail!("parse RSA public key for token validation failed: {e}"),
        };
        Ok(Self { key })
    }

    pub fn validate_token(&self, token: &str, now: u64) -> Result<TokenUser> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_audience(&[AUDIENCE]);
        validation.set_required_spec_claims(&["aud", "exp", "iat", "iss", "nbf", "sub"]);

        let claims = match decode::<Claims>(token, &self.key, &validation) {
            Ok(data) => data.claims,
            Err(e) => bail!("validate jwt token failed: {e}"),
        };

        if claims.sub.is_empty() {
            bail!("validate jwt token failed: empty subject");
        }

        let now = now as usize;
        if now >= claims.exp {
            bail!("validate jwt token failed: token expired");
        }

        if now < claims.nbf {
            bail!("validate jwt token failed: token not yet valid");
        }

        Ok(TokenUser {
            name: claims.sub,
            role: claims.role,
        })
    }
}

#[cfg(test)]
pub(crate) fn new_test_pair() -> (JwtTokenGenerator, JwtTokenValidator) {
    let (public_key, private_key) = super::rsa::generate_rsa_keys().unwrap();
    let generator = JwtTokenGenerator::new(&private_key, 60).unwrap();
    let validator = JwtTokenValidator::new(&public_key).unwrap();
    (generator, validator)
}

#[cfg(test)]
mod tests {
    use crate::time::current_timestamp;

    use super::*;

    #[test]
    fn test_jwt() {
        let (generator, validator) = new_test_pair();

        let users = [
            ("alice", "administrator"),
            ("bob", "staff"),
            ("erin", "qa-coordinator"),
        ];

        let now = current_timestamp();
        for (name, role) in users {
            let user = UserData {
                name: name.to_string(),
                role: role.to_string(),
                ..Default::default()
            };

            let token = generator.generate_token(&user, now).unwrap();
            let result = validator.validate_token(&token.token, now).unwrap();
            assert_eq!(result.name, name);
            assert_eq!(result.role, role);

            // Past the expiry window the same token no longer validates
            let result = validator.validate_token(&token.token, now + 80);
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_jwt_garbage() {
        let (_, validator) = new_test_pair();
        let now = current_timestamp();
        assert!(validator.validate_token("not a token", now).is_err());
    }
}
