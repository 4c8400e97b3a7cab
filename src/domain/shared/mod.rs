pub mod clock;
pub mod meal;
pub mod reference_time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use meal::{MealSelection, MealType};
pub use reference_time::ReferenceTime;
