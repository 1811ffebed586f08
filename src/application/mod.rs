// Console reporting of roster, teams and history
pub mod reporting;

// Balance session: roster, history and assignments
pub mod session;

pub use reporting::SessionReporter;
pub use session::{BalanceReport, BalanceSession, PersistedSession, SessionError};
