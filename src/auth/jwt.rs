use std::time::{SystemTime, UNIX_EPOCH};

use crate::{model::supervisor::Supervisor, models::Claims};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

pub fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or_default()
}

pub fn generate_access_token(
    supervisor: &Supervisor,
    secret: &str,
    ttl: usize,
) -> Result<(String, Claims), Error> {
    let claims = Claims {
        supervisor_id: supervisor.id,
        sub: supervisor.email.clone(),
        name: supervisor.name.clone(),
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, claims))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Supervisor {
        Supervisor {
            id: 1,
            email: "admin@escala.com".into(),
            name: "admin".into(),
        }
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let (token, claims) = generate_access_token(&admin(), "secret", 600).unwrap();
        let decoded = verify_token(&token, "secret").unwrap();
        assert_eq!(decoded.jti, claims.jti);
        assert_eq!(decoded.supervisor_id, 1);
        assert_eq!(decoded.sub, "admin@escala.com");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = generate_access_token(&admin(), "secret", 600).unwrap();
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn every_token_has_its_own_jti() {
        let (_, a) = generate_access_token(&admin(), "secret", 600).unwrap();
        let (_, b) = generate_access_token(&admin(), "secret", 600).unwrap();
        assert_ne!(a.jti, b.jti);
    }
}
