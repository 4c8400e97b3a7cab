pub mod activity;
pub mod cancellation;
pub mod customisation;
pub mod health;
pub mod holiday;
pub mod jobs;
pub mod menu;
pub mod roster;
pub mod subscription;
