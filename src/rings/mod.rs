//! Fraud ring result sets and the views derived from them.

mod projector;
mod record;
mod summary;

pub use projector::{EdgePolicy, Palette, ProjectionOptions, SeverityStyle, project};
pub use record::{
	AccountId, EngineSummary, PatternType, ResultSet, RingId, RingRecord, SuspiciousAccount,
};
pub use summary::{SummaryRow, tabulate};
