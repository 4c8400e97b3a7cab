use crate::domain::shared::ReferenceTime;
use crate::infrastructure::scheduler::JobSchedule;
use chrono::NaiveTime;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Reference time
    pub reference_utc_offset_minutes: i32,
    pub lunch_cutoff: NaiveTime,
    pub dinner_cutoff: NaiveTime,
    // Scheduler
    pub next_day_transfer_at: NaiveTime,
    pub lunch_debit_at: NaiveTime,
    pub dinner_debit_at: NaiveTime,
    pub scheduler_enabled: bool,
    pub scheduler_poll_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            jwt_secret: env::var("JWT_SECRET")?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            reference_utc_offset_minutes: env::var("REFERENCE_UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "330".to_string())
                .parse()?,
            lunch_cutoff: time_var("LUNCH_CUTOFF", "11:00")?,
            dinner_cutoff: time_var("DINNER_CUTOFF", "16:30")?,
            next_day_transfer_at: time_var("NEXT_DAY_TRANSFER_AT", "05:00")?,
            lunch_debit_at: time_var("LUNCH_DEBIT_AT", "11:15")?,
            dinner_debit_at: time_var("DINNER_DEBIT_AT", "16:45")?,
            scheduler_enabled: env::var("SCHEDULER_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(true),
            scheduler_poll_seconds: env::var("SCHEDULER_POLL_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        };

        // Fail at startup rather than on the first request
        config.reference_time()?;
        config.validate_schedule()?;

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn reference_time(&self) -> Result<ReferenceTime, String> {
        ReferenceTime::from_offset_minutes(
            self.reference_utc_offset_minutes,
            self.lunch_cutoff,
            self.dinner_cutoff,
        )
        .ok_or_else(|| {
            format!(
                "REFERENCE_UTC_OFFSET_MINUTES out of range: {}",
                self.reference_utc_offset_minutes
            )
        })
    }

    /// Next-day credits must land before the lunch cutoff, and each debit
    /// must fire after its cutoff so accepted same-day cancellations count.
    pub fn validate_schedule(&self) -> Result<(), String> {
        if self.next_day_transfer_at >= self.lunch_cutoff {
            return Err(format!(
                "NEXT_DAY_TRANSFER_AT ({}) must be before LUNCH_CUTOFF ({})",
                self.next_day_transfer_at.format("%H:%M"),
                self.lunch_cutoff.format("%H:%M")
            ));
        }
        if self.lunch_debit_at <= self.lunch_cutoff {
            return Err(format!(
                "LUNCH_DEBIT_AT ({}) must be after LUNCH_CUTOFF ({})",
                self.lunch_debit_at.format("%H:%M"),
                self.lunch_cutoff.format("%H:%M")
            ));
        }
        if self.dinner_debit_at <= self.dinner_cutoff {
            return Err(format!(
                "DINNER_DEBIT_AT ({}) must be after DINNER_CUTOFF ({})",
                self.dinner_debit_at.format("%H:%M"),
                self.dinner_cutoff.format("%H:%M")
            ));
        }
        Ok(())
    }

    pub fn job_schedule(&self) -> JobSchedule {
        JobSchedule {
            transfer_at: self.next_day_transfer_at,
            lunch_debit_at: self.lunch_debit_at,
            dinner_debit_at: self.dinner_debit_at,
        }
    }

    pub fn scheduler_poll_interval(&self) -> Duration {
        Duration::from_secs(self.scheduler_poll_seconds.max(1))
    }
}

fn time_var(name: &str, default: &str) -> Result<NaiveTime, String> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    parse_clock_time(&raw).map_err(|e| format!("{}: {}", name, e))
}

/// Parses `HH:MM` (24h)
pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|e| format!("expected HH:MM, got '{}' ({})", raw, e))
}
