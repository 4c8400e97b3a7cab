pub mod error;
pub mod model;
pub mod service;

pub use error::MenuError;
pub use model::{DailyMenu, ItemRemoval, MenuItem, MenuRequest, NewMenuItem};
pub use service::MenuService;

use crate::domain::shared::MealType;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// Storage for the published menu of each date and meal
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Stores `menu`, replacing the items of an existing menu for the same
    /// date and meal. Returns the stored row and whether it was created.
    async fn upsert(&self, menu: &DailyMenu) -> AppResult<(DailyMenu, bool)>;

    /// Menus for `date`, lunch before dinner
    async fn find_by_date(&self, date: NaiveDate, meal: Option<MealType>)
        -> AppResult<Vec<DailyMenu>>;

    /// Drops one item atomically; a menu left without items is deleted
    async fn remove_item(&self, menu_id: Uuid, item_id: Uuid) -> AppResult<ItemRemoval>;
}
