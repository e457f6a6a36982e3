use secrecy::SecretString;
use serde::Deserialize;

/// Signing material and claim constraints for issued bearer tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    pub expiration_hours: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtSettings {
    pub fn new(secret: String, expiration_hours: i64, issuer: String, audience: String) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
            expiration_hours,
            issuer,
            audience,
        }
    }
}
