//! kitapo-domain
//!
//! Pure domain models for the budget period engine: categories, budget rows,
//! expense/sale records, canonical periods, weekday sets, and derived
//! summaries. No I/O, no storage. Only data types and calendar math.

pub mod amount;
pub mod budget;
pub mod category;
pub mod expense;
pub mod period;
pub mod summary;
pub mod weekday;

pub use amount::*;
pub use budget::*;
pub use category::*;
pub use expense::*;
pub use period::*;
pub use summary::*;
pub use weekday::*;
