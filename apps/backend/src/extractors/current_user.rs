use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::jwt::verify_access_token;
use crate::entities::UserRole;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Authenticated caller, extracted from the Bearer access token.
///
/// Extraction fails with 401 before the handler body runs; role checks are
/// explicit calls inside the handler so the required role is visible there.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub email: String,
    pub role: UserRole,
}

impl CurrentUser {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::InsufficientRole)
        }
    }

    /// Admin or technician.
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(AppError::InsufficientRole)
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not configured".to_string()))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::UnauthorizedMissingBearer)?
        .to_str()
        .map_err(|_| AppError::UnauthorizedMissingBearer)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AppError::UnauthorizedMissingBearer)?;

    let claims = verify_access_token(token, &app_state.security)?;

    Ok(CurrentUser {
        user_id: claims.user_id,
        email: claims.email,
        role: claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::CurrentUser;
    use crate::entities::UserRole;
    use crate::error::AppError;

    fn user_with_role(role: UserRole) -> CurrentUser {
        CurrentUser {
            user_id: 1,
            email: "someone@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn admin_passes_both_guards() {
        let user = user_with_role(UserRole::Admin);
        assert!(user.require_admin().is_ok());
        assert!(user.require_staff().is_ok());
    }

    #[test]
    fn technician_is_staff_but_not_admin() {
        let user = user_with_role(UserRole::Technician);
        assert!(matches!(
            user.require_admin(),
            Err(AppError::InsufficientRole)
        ));
        assert!(user.require_staff().is_ok());
    }

    #[test]
    fn customer_fails_both_guards() {
        let user = user_with_role(UserRole::Customer);
        assert!(user.require_admin().is_err());
        assert!(user.require_staff().is_err());
    }
}
