use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::entities::UserRole;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::security_config::SecurityConfig;

/// Access tokens expire quickly; refresh tokens last a week.
const ACCESS_TTL_SECS: i64 = 15 * 60;
const REFRESH_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims included in backend-issued tokens.
///
/// `sub` distinguishes access tokens from refresh tokens so one cannot be
/// used in place of the other.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Token use: "access" or "refresh"
    pub sub: String,
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Lifetime of the access token, in seconds
    pub expires_in: i64,
}

/// Mint an access/refresh token pair for a user.
pub fn mint_token_pair(
    user_id: i64,
    email: &str,
    role: UserRole,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<TokenPair, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let access_token = mint_token("access", user_id, email, role, iat, ACCESS_TTL_SECS, security)?;
    let refresh_token =
        mint_token("refresh", user_id, email, role, iat, REFRESH_TTL_SECS, security)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: ACCESS_TTL_SECS,
    })
}

#[allow(clippy::too_many_arguments)]
fn mint_token(
    token_use: &str,
    user_id: i64,
    email: &str,
    role: UserRole,
    iat: i64,
    ttl: i64,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: token_use.to_string(),
        user_id,
        email: email.to_string(),
        role,
        iat,
        exp: iat + ttl,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify an access token and return its claims.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify_token(token, security, "access")
}

/// Verify a refresh token and return its claims.
pub fn verify_refresh_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    verify_token(token, security, "refresh")
}

fn verify_token(
    token: &str,
    security: &SecurityConfig,
    expected_use: &str,
) -> Result<Claims, AppError> {
    // Default Validation already checks exp; pin algorithm to configured
    // algorithm. `sub` carries the token use and is checked by hand below.
    let validation = Validation::new(security.algorithm);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::UnauthorizedExpiredJwt,
        _ => AppError::UnauthorizedInvalidJwt,
    })?;

    if claims.sub != expected_use {
        return Err(AppError::bad_request(
            ErrorCode::WrongTokenType,
            format!("{expected_use} token required"),
        ));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{mint_token_pair, verify_access_token, verify_refresh_token};
    use crate::entities::UserRole;
    use crate::error::AppError;
    use crate::state::security_config::SecurityConfig;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn mint_and_verify_roundtrip() {
        let security = security();
        let now = SystemTime::now();

        let pair =
            mint_token_pair(42, "admin@example.com", UserRole::Admin, now, &security).unwrap();
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 15 * 60);

        let claims = verify_access_token(&pair.access_token, &security).unwrap();
        assert_eq!(claims.sub, "access");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + 15 * 60);

        let refresh_claims = verify_refresh_token(&pair.refresh_token, &security).unwrap();
        assert_eq!(refresh_claims.sub, "refresh");
        assert_eq!(refresh_claims.exp, refresh_claims.iat + 7 * 24 * 60 * 60);
    }

    #[test]
    fn access_token_is_not_a_refresh_token() {
        let security = security();
        let pair = mint_token_pair(
            1,
            "user@example.com",
            UserRole::Customer,
            SystemTime::now(),
            &security,
        )
        .unwrap();

        assert!(verify_refresh_token(&pair.access_token, &security).is_err());
        assert!(verify_access_token(&pair.refresh_token, &security).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let security = security();
        // 20 minutes ago so the 15-minute access token is expired
        let past = SystemTime::now() - Duration::from_secs(20 * 60);
        let pair = mint_token_pair(1, "user@example.com", UserRole::Customer, past, &security)
            .unwrap();

        match verify_access_token(&pair.access_token, &security) {
            Err(AppError::UnauthorizedExpiredJwt) => {}
            other => panic!("expected expired token error, got {other:?}"),
        }
    }

    #[test]
    fn bad_signature_is_rejected() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let security_b = SecurityConfig::new("secret-B".as_bytes());

        let pair = mint_token_pair(
            1,
            "user@example.com",
            UserRole::Customer,
            SystemTime::now(),
            &security_a,
        )
        .unwrap();

        match verify_access_token(&pair.access_token, &security_b) {
            Err(AppError::UnauthorizedInvalidJwt) => {}
            other => panic!("expected invalid token error, got {other:?}"),
        }
    }
}
