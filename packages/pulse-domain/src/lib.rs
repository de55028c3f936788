pub mod aggregate;
pub mod filter;
pub mod profile;

pub use aggregate::{
	CallFacts, CallMetrics, CostBreakdown, SMS_COST_PER_MESSAGE, call_metrics, count_tags,
	message_cost, normalize_status,
};
pub use filter::{Combinator, FilterNode, FilterValue, Operator, RangeBounds};
pub use profile::DashboardProfile;
