use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::menu::{DailyMenu, ItemRemoval, MenuRequest, MenuService};
use crate::domain::shared::MealType;
use crate::{error::AppResult, infrastructure::auth::AuthUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    pub date: NaiveDate,
    pub meal_type: Option<MealType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRemovedResponse {
    pub message: String,
    pub menu_deleted: bool,
}

pub struct MenuController {
    menu_service: Arc<MenuService>,
}

impl MenuController {
    pub fn new(menu_service: Arc<MenuService>) -> Self {
        Self { menu_service }
    }

    /// PUT /api/menus - Publish or replace a day's menu (admin)
    pub async fn publish_menu(
        State(controller): State<Arc<MenuController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<MenuRequest>,
    ) -> AppResult<(StatusCode, Json<DailyMenu>)> {
        auth_user.require_admin()?;
        let (menu, created) = controller
            .menu_service
            .publish_menu(auth_user.user_id, request)
            .await?;
        let status = if created {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        Ok((status, Json(menu)))
    }

    /// GET /api/menus?date=&mealType=
    pub async fn get_menu(
        State(controller): State<Arc<MenuController>>,
        Query(query): Query<MenuQuery>,
    ) -> AppResult<Json<Vec<DailyMenu>>> {
        let menus = controller
            .menu_service
            .menu_for(query.date, query.meal_type)
            .await?;
        Ok(Json(menus))
    }

    /// DELETE /api/menus/{menuId}/items/{itemId} (admin)
    pub async fn remove_item(
        State(controller): State<Arc<MenuController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path((menu_id, item_id)): Path<(Uuid, Uuid)>,
    ) -> AppResult<Json<ItemRemovedResponse>> {
        auth_user.require_admin()?;
        let removal = controller.menu_service.remove_item(menu_id, item_id).await?;
        Ok(Json(ItemRemovedResponse {
            message: "Item removed successfully".to_string(),
            menu_deleted: removal == ItemRemoval::MenuDeleted,
        }))
    }
}
