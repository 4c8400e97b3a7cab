use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::ledger::{LedgerStanding, PaymentConfirmation};
use crate::{
    domain::ledger::{LedgerService, LedgerServiceApi},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

pub struct SubscriptionController {
    ledger_service: Arc<LedgerService>,
}

impl SubscriptionController {
    pub fn new(ledger_service: Arc<LedgerService>) -> Self {
        Self { ledger_service }
    }

    /// POST /api/subscriptions - Credit a payment-confirmed purchase (admin)
    pub async fn create_entry(
        State(controller): State<Arc<SubscriptionController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(confirmation): Json<PaymentConfirmation>,
    ) -> AppResult<(StatusCode, Json<LedgerStanding>)> {
        auth_user.require_admin()?;
        let standing = controller.ledger_service.create_entry(confirmation).await?;
        Ok((StatusCode::CREATED, Json(standing)))
    }

    /// GET /api/subscriptions/{userId} - Balance and latest purchase
    pub async fn get_standing(
        State(controller): State<Arc<SubscriptionController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(user_id): Path<Uuid>,
    ) -> AppResult<Json<LedgerStanding>> {
        auth_user.require_self_or_admin(user_id)?;
        let standing = controller.ledger_service.get_standing(user_id).await?;
        Ok(Json(standing))
    }
}
