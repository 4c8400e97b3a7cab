pub mod engine;
pub mod error;
pub mod report;

pub use engine::BalanceAdjustmentEngine;
pub use error::EngineError;
pub use report::{DebitReport, TransferReport};
