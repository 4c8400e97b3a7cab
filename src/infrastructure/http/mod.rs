use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::activity::{ActivityRepository, ActivityService};
use crate::domain::billing::BalanceAdjustmentEngine;
use crate::domain::cancellation::{
    CancellationRepository, CancellationService, CancellationWindowPolicy,
};
use crate::domain::customisation::{CustomisationRepository, CustomisationService};
use crate::domain::holiday::{HolidayCalendar, HolidayRepository};
use crate::domain::ledger::{LedgerRepository, LedgerService};
use crate::domain::menu::{MenuRepository, MenuService};
use crate::domain::roster::RosterBuilder;
use crate::domain::shared::Clock;
use crate::domain::user::UserDirectory;
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::{
    PostgresActivityRepository, PostgresCancellationRepository, PostgresCustomisationRepository,
    PostgresHolidayRepository, PostgresLedgerRepository, PostgresMenuRepository, UserRepository,
};
use crate::infrastructure::scheduler::MealScheduler;
use crate::{
    controllers::{
        activity::ActivityController, cancellation::CancellationController,
        customisation::CustomisationController, health, holiday, jobs::JobsController,
        menu::MenuController, roster::RosterController, subscription::SubscriptionController,
    },
    infrastructure::auth::{auth_middleware, request_id_middleware},
};

/// Storage ports the application is wired against
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserDirectory>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub cancellations: Arc<dyn CancellationRepository>,
    pub holidays: Arc<dyn HolidayRepository>,
    pub activities: Arc<dyn ActivityRepository>,
    pub customisations: Arc<dyn CustomisationRepository>,
    pub menus: Arc<dyn MenuRepository>,
}

impl Repositories {
    pub fn postgres(pool: Arc<DbPool>) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            ledger: Arc::new(PostgresLedgerRepository::new(pool.clone())),
            cancellations: Arc::new(PostgresCancellationRepository::new(pool.clone())),
            holidays: Arc::new(PostgresHolidayRepository::new(pool.clone())),
            activities: Arc::new(PostgresActivityRepository::new(pool.clone())),
            customisations: Arc::new(PostgresCustomisationRepository::new(pool.clone())),
            menus: Arc::new(PostgresMenuRepository::new(pool)),
        }
    }
}

pub struct Application {
    pub router: Router,
    pub scheduler: Arc<MealScheduler>,
}

/// Instantiate services and controllers on top of `repos` and build the router
pub fn build_application(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    repos: Repositories,
    clock: Arc<dyn Clock>,
) -> Result<Application, String> {
    let reference = config.reference_time()?;

    tracing::debug!("Instantiating services...");
    let holidays = Arc::new(HolidayCalendar::new(repos.holidays.clone()));
    let activity_service = Arc::new(ActivityService::new(
        repos.activities.clone(),
        clock.clone(),
    ));
    let ledger_service = Arc::new(LedgerService::new(
        repos.ledger.clone(),
        repos.users.clone(),
        clock.clone(),
        reference,
    ));
    let cancellation_service = Arc::new(CancellationService::new(
        repos.cancellations.clone(),
        repos.users.clone(),
        activity_service.clone(),
        clock.clone(),
        CancellationWindowPolicy::new(reference),
    ));
    let customisation_service = Arc::new(CustomisationService::new(
        repos.customisations.clone(),
        repos.users.clone(),
        activity_service.clone(),
        clock.clone(),
        reference,
    ));
    let menu_service = Arc::new(MenuService::new(repos.menus.clone(), clock.clone()));
    let roster_builder = Arc::new(RosterBuilder::new(
        repos.ledger.clone(),
        repos.cancellations.clone(),
        repos.users.clone(),
    ));
    let engine = Arc::new(BalanceAdjustmentEngine::new(
        repos.ledger.clone(),
        repos.cancellations.clone(),
        holidays.clone(),
    ));
    let scheduler = Arc::new(MealScheduler::new(
        engine,
        clock,
        reference,
        config.job_schedule(),
    ));

    tracing::debug!("Instantiating controllers...");
    let subscription_controller = Arc::new(SubscriptionController::new(ledger_service));
    let cancellation_controller = Arc::new(CancellationController::new(cancellation_service));
    let customisation_controller =
        Arc::new(CustomisationController::new(customisation_service));
    let menu_controller = Arc::new(MenuController::new(menu_service));
    let roster_controller = Arc::new(RosterController::new(roster_builder));
    let activity_controller = Arc::new(ActivityController::new(activity_service));
    let jobs_controller = Arc::new(JobsController::new(scheduler.clone()));

    let auth = middleware::from_fn_with_state((repos.users.clone(), config.clone()), auth_middleware);

    // Subscription routes (admin writes, self or admin reads)
    let subscription_routes = Router::new()
        .route("/api/subscriptions", post(SubscriptionController::create_entry))
        .route("/api/subscriptions/:userId", get(SubscriptionController::get_standing))
        .with_state(subscription_controller)
        .layer(auth.clone());

    let cancellation_routes = Router::new()
        .route(
            "/api/cancellations",
            post(CancellationController::create_cancellation)
                .get(CancellationController::list_cancellations),
        )
        .with_state(cancellation_controller)
        .layer(auth.clone());

    let customisation_routes = Router::new()
        .route(
            "/api/customisations",
            put(CustomisationController::request_customisation)
                .get(CustomisationController::list_customisations),
        )
        .with_state(customisation_controller)
        .layer(auth.clone());

    // Menu routes (admin writes, any user reads)
    let menu_routes = Router::new()
        .route(
            "/api/menus",
            put(MenuController::publish_menu).get(MenuController::get_menu),
        )
        .route(
            "/api/menus/:menuId/items/:itemId",
            delete(MenuController::remove_item),
        )
        .with_state(menu_controller)
        .layer(auth.clone());

    let roster_routes = Router::new()
        .route("/api/roster", get(RosterController::get_roster))
        .with_state(roster_controller)
        .layer(auth.clone());

    let activity_routes = Router::new()
        .route("/api/activities", get(ActivityController::list_activities))
        .with_state(activity_controller)
        .layer(auth.clone());

    let holiday_routes = Router::new()
        .route("/api/holidays", get(holiday::list_holidays))
        .with_state(holidays)
        .layer(auth.clone());

    let job_routes = Router::new()
        .route("/api/admin/jobs/:job", post(JobsController::run_job))
        .with_state(jobs_controller)
        .layer(auth);

    let mut router = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(subscription_routes)
        .merge(cancellation_routes)
        .merge(customisation_routes)
        .merge(menu_routes)
        .merge(roster_routes)
        .merge(activity_routes)
        .merge(holiday_routes)
        .merge(job_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    // Local admin frontends run on another origin
    if config.is_development() {
        router = router.layer(CorsLayer::permissive());
    }

    Ok(Application { router, scheduler })
}

/// Serve `router` until `shutdown` resolves
pub async fn start_http_server<F>(
    router: Router,
    config: &Config,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
