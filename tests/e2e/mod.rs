// End-to-end tests for the Mealprep Backend HTTP API
//
// Each test gets its own application instance and a fixed clock, served on
// an ephemeral port and driven through a real HTTP client.
//
// Most suites wire the in-memory repository adapters, run in parallel
// without sharing state and need no database. The `test_persistence_*`
// suites wire the Postgres adapters instead: they start one PostgreSQL
// container through testcontainers (Docker is required) and lease each
// test its own migrated database.
//
// The clock starts on Monday 2024-06-10 at 09:00 reference time (+05:30),
// before both cancellation cutoffs.

mod test_cancellations;
mod test_customisations;
mod test_health;
mod test_menus;
mod test_persistence_jobs;
mod test_persistence_subscriptions;
