use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single deliverable meal slot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 2] = [MealType::Lunch, MealType::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    /// Column holding the current-day credits for this meal
    pub fn balance_column(&self) -> &'static str {
        match self {
            MealType::Lunch => "lunch_meals",
            MealType::Dinner => "dinner_meals",
        }
    }

    /// Column holding the date this meal was last debited
    pub fn last_debit_column(&self) -> &'static str {
        match self {
            MealType::Lunch => "last_lunch_debit_on",
            MealType::Dinner => "last_dinner_debit_on",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            other => Err(format!(
                "Invalid meal type: {} (expected lunch or dinner)",
                other
            )),
        }
    }
}

/// Which meals a cancellation applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealSelection {
    Lunch,
    Dinner,
    Both,
}

impl MealSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSelection::Lunch => "lunch",
            MealSelection::Dinner => "dinner",
            MealSelection::Both => "both",
        }
    }

    pub fn covers(&self, meal: MealType) -> bool {
        match self {
            MealSelection::Both => true,
            MealSelection::Lunch => meal == MealType::Lunch,
            MealSelection::Dinner => meal == MealType::Dinner,
        }
    }

    pub fn meals(&self) -> Vec<MealType> {
        MealType::ALL
            .into_iter()
            .filter(|meal| self.covers(*meal))
            .collect()
    }
}

impl From<MealType> for MealSelection {
    fn from(meal: MealType) -> Self {
        match meal {
            MealType::Lunch => MealSelection::Lunch,
            MealType::Dinner => MealSelection::Dinner,
        }
    }
}

impl fmt::Display for MealSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
