use chrono::{Duration, NaiveDate};
use mealprep_backend::domain::auth::JwtManager;
use mealprep_backend::domain::holiday::{Holiday, HolidayRepository};
use mealprep_backend::domain::ledger::MealBalance;
use mealprep_backend::domain::user::{User, UserRole};
use mealprep_backend::infrastructure::repositories::in_memory::{
    InMemoryHolidayRepository, InMemoryLedgerRepository, InMemoryUserDirectory,
};
use std::sync::Arc;
use uuid::Uuid;

/// A directory user plus a bearer token for it
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

pub struct TestFixtures {
    users: Arc<InMemoryUserDirectory>,
    ledger: Arc<InMemoryLedgerRepository>,
    holidays: Arc<InMemoryHolidayRepository>,
    jwt: JwtManager,
}

impl TestFixtures {
    pub fn new(
        users: Arc<InMemoryUserDirectory>,
        ledger: Arc<InMemoryLedgerRepository>,
        holidays: Arc<InMemoryHolidayRepository>,
        jwt_secret: &str,
    ) -> Self {
        Self {
            users,
            ledger,
            holidays,
            jwt: JwtManager::new(jwt_secret.to_string()),
        }
    }

    pub fn create_user(&self, first_name: &str, last_name: &str) -> TestUser {
        self.create_with_role(first_name, last_name, UserRole::User)
    }

    pub fn create_admin(&self, first_name: &str) -> TestUser {
        self.create_with_role(first_name, "Admin", UserRole::Admin)
    }

    fn create_with_role(&self, first_name: &str, last_name: &str, role: UserRole) -> TestUser {
        let user = User {
            id: Uuid::new_v4(),
            role,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: format!(
                "{}.{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            ),
            mobile: "+919800000000".to_string(),
            postal_address: Some("4 Residency Road, Bengaluru".to_string()),
        };
        self.users.insert(user.clone());
        let token = self.token_for(user.id);
        TestUser { user, token }
    }

    /// Valid token for an id the directory may not know
    pub fn token_for(&self, user_id: Uuid) -> String {
        self.jwt
            .generate_token(user_id, Duration::hours(1))
            .expect("Failed to issue test token")
    }

    pub fn balance(&self, user_id: Uuid) -> Option<MealBalance> {
        self.ledger.balance(user_id)
    }

    pub async fn add_holiday(&self, date: NaiveDate, description: &str) {
        self.holidays
            .insert(&Holiday {
                id: Uuid::new_v4(),
                date,
                description: description.to_string(),
            })
            .await
            .expect("Failed to insert holiday");
    }
}
