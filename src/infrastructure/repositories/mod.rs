pub mod activity_repository;
pub mod cancellation_repository;
pub mod customisation_repository;
pub mod holiday_repository;
pub mod in_memory;
pub mod ledger_repository;
pub mod menu_repository;
pub mod user_repository;

pub use activity_repository::PostgresActivityRepository;
pub use cancellation_repository::PostgresCancellationRepository;
pub use customisation_repository::PostgresCustomisationRepository;
pub use holiday_repository::PostgresHolidayRepository;
pub use ledger_repository::PostgresLedgerRepository;
pub use menu_repository::PostgresMenuRepository;
pub use user_repository::UserRepository;
