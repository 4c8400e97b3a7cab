use super::error::MenuError;
use super::{DailyMenu, ItemRemoval, MenuRepository, MenuRequest};
use crate::domain::shared::{Clock, MealType};
use chrono::NaiveDate;
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

pub struct MenuService {
    menu_repo: Arc<dyn MenuRepository>,
    clock: Arc<dyn Clock>,
}

impl MenuService {
    pub fn new(menu_repo: Arc<dyn MenuRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { menu_repo, clock }
    }

    /// Publishes the menu for a date and meal, replacing any earlier one.
    /// The flag is true when no menu existed yet.
    pub async fn publish_menu(
        &self,
        admin_id: Uuid,
        request: MenuRequest,
    ) -> Result<(DailyMenu, bool), MenuError> {
        if request.items.is_empty() {
            return Err(MenuError::Validation(
                "At least one item is required".to_string(),
            ));
        }
        let incomplete = request.items.iter().any(|item| {
            item.name.trim().is_empty()
                || item.weight.trim().is_empty()
                || item.kind.trim().is_empty()
        });
        if incomplete {
            return Err(MenuError::Validation(
                "Every item needs a name, weight and type".to_string(),
            ));
        }

        let now = self.clock.now();
        let menu = DailyMenu {
            id: Uuid::new_v4(),
            date: request.date,
            meal_type: request.meal_type,
            items: Json(request.items.into_iter().map(|i| i.into_item()).collect()),
            updated_by: admin_id,
            created_at: now,
            updated_at: now,
        };
        let (stored, created) = self.menu_repo.upsert(&menu).await?;

        tracing::info!(
            menu_id = %stored.id,
            date = %stored.date,
            meal = %stored.meal_type,
            items = stored.items.0.len(),
            created,
            "Menu published"
        );

        Ok((stored, created))
    }

    pub async fn menu_for(
        &self,
        date: NaiveDate,
        meal: Option<MealType>,
    ) -> Result<Vec<DailyMenu>, MenuError> {
        Ok(self.menu_repo.find_by_date(date, meal).await?)
    }

    pub async fn remove_item(&self, menu_id: Uuid, item_id: Uuid) -> Result<ItemRemoval, MenuError> {
        let removal = self.menu_repo.remove_item(menu_id, item_id).await?;
        match removal {
            ItemRemoval::MenuNotFound => Err(MenuError::MenuNotFound(menu_id)),
            ItemRemoval::ItemNotFound => Err(MenuError::ItemNotFound { menu_id, item_id }),
            ItemRemoval::Removed | ItemRemoval::MenuDeleted => {
                tracing::info!(
                    menu_id = %menu_id,
                    item_id = %item_id,
                    menu_deleted = removal == ItemRemoval::MenuDeleted,
                    "Menu item removed"
                );
                Ok(removal)
            }
        }
    }
}
