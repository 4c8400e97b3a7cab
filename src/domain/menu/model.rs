use crate::domain::shared::MealType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One dish on a published menu
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub weight: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The dishes served for one meal on one date
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyMenu {
    pub id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub items: Json<Vec<MenuItem>>,
    pub updated_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyMenu {
    /// Items left after dropping `item_id`, or `None` when it is not on the menu
    pub fn without_item(&self, item_id: Uuid) -> Option<Vec<MenuItem>> {
        if !self.items.0.iter().any(|item| item.id == item_id) {
            return None;
        }
        Some(
            self.items
                .0
                .iter()
                .filter(|item| item.id != item_id)
                .cloned()
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub weight: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewMenuItem {
    pub fn into_item(self) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            weight: self.weight.trim().to_string(),
            kind: self.kind.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }
}

/// Body of PUT /api/menus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRequest {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub items: Vec<NewMenuItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRemoval {
    Removed,
    /// The last item went, so the menu itself was deleted
    MenuDeleted,
    ItemNotFound,
    MenuNotFound,
}
