use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::user::{UserDirectory, UserRole};
use crate::infrastructure::config::Config;
use crate::{domain::auth::JwtManager, error::AppError, error::AppResult};
use uuid::Uuid;

/// User context injected into request extensions after authentication
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin role required".to_string()))
        }
    }

    /// Users may act on their own records; admins on anyone's
    pub fn require_self_or_admin(&self, user_id: Uuid) -> AppResult<()> {
        if self.user_id == user_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Cannot act on another user's records".to_string(),
            ))
        }
    }

    /// The target of a request body's optional `userId`, checked for access
    pub fn resolve_target(&self, requested: Option<Uuid>) -> AppResult<Uuid> {
        let target = requested.unwrap_or(self.user_id);
        self.require_self_or_admin(target)?;
        Ok(target)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State((users, config)): State<(Arc<dyn UserDirectory>, Arc<Config>)>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization format".to_string()))?;

    let user_id = JwtManager::new(config.jwt_secret.clone()).extract_user_id(token)?;

    // Role always comes from the directory, never from the token
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        role: user.role,
    });

    Ok(next.run(request).await)
}
