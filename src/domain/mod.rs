pub mod activity;
pub mod auth;
pub mod billing;
pub mod cancellation;
pub mod customisation;
pub mod holiday;
pub mod ledger;
pub mod menu;
pub mod roster;
pub mod shared;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
