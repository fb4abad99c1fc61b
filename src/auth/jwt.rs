use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::claims::{Claims, TokenSubject};
use crate::config::JwtConfig;

/// Outcome of checking a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid(Claims),
    Expired,
    Invalid,
}

/// Signing and verification keys, derived once from [`JwtConfig`].
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(std::slice::from_ref(&cfg.audience));
        validation.set_issuer(std::slice::from_ref(&cfg.issuer));
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            validation,
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::minutes(cfg.ttl_minutes),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, subject: &TokenSubject) -> anyhow::Result<String> {
        self.issue_at(subject, OffsetDateTime::now_utc())
    }

    fn issue_at(&self, subject: &TokenSubject, now: OffsetDateTime) -> anyhow::Result<String> {
        let exp = now + self.ttl;
        let claims = Claims {
            sub: subject.id,
            email: subject.email.clone(),
            name: subject.name.clone(),
            role: subject.role,
            iat: now.unix_timestamp().max(0) as usize,
            exp: exp.unix_timestamp().max(0) as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = %subject.id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> TokenStatus {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => TokenStatus::Valid(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => TokenStatus::Expired,
                _ => {
                    debug!(error = %e, "jwt rejected");
                    TokenStatus::Invalid
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::Role;
    use uuid::Uuid;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 5,
        })
    }

    fn subject() -> TokenSubject {
        TokenSubject {
            id: Uuid::new_v4(),
            email: "asha@example.com".into(),
            name: "Asha".into(),
            role: Role::Agent,
        }
    }

    #[test]
    fn sign_and_verify_token() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let who = subject();
        let token = keys.issue(&who).expect("sign");
        let TokenStatus::Valid(claims) = keys.verify(&token) else {
            panic!("token should be valid");
        };
        assert_eq!(claims.sub, who.id);
        assert_eq!(claims.email, who.email);
        assert_eq!(claims.name, who.name);
        assert_eq!(claims.role, Role::Agent);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let issued = OffsetDateTime::now_utc() - Duration::minutes(10);
        let token = keys.issue_at(&subject(), issued).expect("sign");
        assert_eq!(keys.verify(&token), TokenStatus::Expired);
    }

    #[test]
    fn tampered_token_is_invalid() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.issue(&subject()).expect("sign");
        // flip one character inside the payload segment
        let dot = token.find('.').unwrap();
        let mut bytes = token.into_bytes();
        let i = dot + 5;
        bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();
        assert_eq!(keys.verify(&tampered), TokenStatus::Invalid);
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.issue(&subject()).expect("sign");
        let sig_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[sig_start] = if bytes[sig_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();
        assert_eq!(keys.verify(&tampered), TokenStatus::Invalid);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let good = make_keys("secret-a", "iss", "aud");
        let bad = make_keys("secret-b", "iss", "aud");
        let token = good.issue(&subject()).expect("sign");
        assert_eq!(bad.verify(&token), TokenStatus::Invalid);
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys("same-secret", "good-iss", "good-aud");
        let bad = make_keys("same-secret", "bad-iss", "bad-aud");
        let token = good.issue(&subject()).expect("sign");
        assert_eq!(bad.verify(&token), TokenStatus::Invalid);
    }

    #[test]
    fn garbage_is_invalid() {
        let keys = make_keys("dev-secret", "iss", "aud");
        assert_eq!(keys.verify("not.a.jwt"), TokenStatus::Invalid);
        assert_eq!(keys.verify(""), TokenStatus::Invalid);
    }
}
