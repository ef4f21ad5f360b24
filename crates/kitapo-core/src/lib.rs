//! kitapo-core
//!
//! Services for the budget period engine: period summaries, recurring daily
//! budget generation, dashboard statistics, and the [`BudgetStore`] contract
//! persistence backends implement.

pub mod budget_service;
pub mod error;
pub mod recurrence_service;
pub mod stats;
pub mod storage;
pub mod summary_service;

pub use budget_service::BudgetService;
pub use error::{CoreError, CoreResult};
pub use recurrence_service::{RecurrenceService, RecurringRequest};
pub use stats::{DashboardStats, MonthlyFlow, PeriodTotals, StatsService};
pub use storage::BudgetStore;
pub use summary_service::SummaryService;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with sensible defaults. Safe to call more
/// than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("kitapo_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("kitapo core tracing initialized");
    });
}
