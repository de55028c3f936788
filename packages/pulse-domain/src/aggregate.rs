use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Upstream price per SMS segment, in USD. Hard-coded; if the provider's
/// pricing changes this constant goes stale silently.
pub const SMS_COST_PER_MESSAGE: f64 = 0.0079;

/// Counts tag occurrences over a fixed category universe.
///
/// Every universe key is present in the output, zeroed when nothing matched,
/// so the response shape is stable regardless of data. Tags outside the
/// universe are ignored.
pub fn count_tags<'a, I>(tag_lists: I, universe: &[&str]) -> BTreeMap<String, u64>
where
	I: IntoIterator<Item = &'a [String]>,
{
	let mut counts: BTreeMap<String, u64> =
		universe.iter().map(|tag| (tag.to_string(), 0)).collect();

	for tags in tag_lists {
		for tag in tags {
			if let Some(count) = counts.get_mut(tag.as_str()) {
				*count += 1;
			}
		}
	}

	counts
}

/// Summary metrics over a batch of call records.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CallMetrics {
	pub total_calls: u64,
	pub inbound: u64,
	pub outbound: u64,
	pub by_status: BTreeMap<String, u64>,
	pub by_disconnection_reason: BTreeMap<String, u64>,
}

/// The per-call facts the metrics aggregation reads.
#[derive(Clone, Copy, Debug)]
pub struct CallFacts<'a> {
	pub direction: Option<&'a str>,
	pub call_status: Option<&'a str>,
	pub disconnection_reason: Option<&'a str>,
}

// Fallback bucket labels predate this service; downstream dashboards key on
// them, so they stay as-is.
const STATUS_FALLBACK: &str = "sin_status";
const REASON_FALLBACK: &str = "sin_razon";

pub fn call_metrics<'a, I>(calls: I) -> CallMetrics
where
	I: IntoIterator<Item = CallFacts<'a>>,
{
	let mut metrics = CallMetrics {
		total_calls: 0,
		inbound: 0,
		outbound: 0,
		by_status: BTreeMap::new(),
		by_disconnection_reason: BTreeMap::new(),
	};

	for call in calls {
		metrics.total_calls += 1;

		match call.direction {
			Some("inbound") => metrics.inbound += 1,
			Some("outbound") => metrics.outbound += 1,
			_ => {},
		}

		let status = call.call_status.filter(|s| !s.is_empty()).unwrap_or(STATUS_FALLBACK);
		*metrics.by_status.entry(status.to_string()).or_insert(0) += 1;

		let reason =
			call.disconnection_reason.filter(|r| !r.is_empty()).unwrap_or(REASON_FALLBACK);
		*metrics.by_disconnection_reason.entry(reason.to_string()).or_insert(0) += 1;
	}

	metrics
}

const KNOWN_MESSAGE_STATUSES: &[&str] = &["delivered", "sent", "failed", "undelivered", "pending"];

/// Normalizes a raw message status to one of the known buckets. Absent or
/// unrecognized statuses land in "pending".
pub fn normalize_status(raw: Option<&str>) -> &'static str {
	let Some(raw) = raw else {
		return "pending";
	};
	let lowered = raw.trim().to_ascii_lowercase();

	KNOWN_MESSAGE_STATUSES.iter().find(|known| **known == lowered).copied().unwrap_or("pending")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostBreakdown {
	pub counted: u64,
	pub total: f64,
}

/// Multiplies the per-unit cost by the number of messages, optionally keeping
/// only messages whose normalized status matches `status_filter`
/// (case-insensitive). Full float precision; rounding is a display concern.
pub fn message_cost<'a, I>(
	statuses: I,
	per_unit: f64,
	status_filter: Option<&str>,
) -> CostBreakdown
where
	I: IntoIterator<Item = Option<&'a str>>,
{
	let wanted = status_filter.map(|f| f.trim().to_ascii_lowercase());
	let counted = statuses
		.into_iter()
		.filter(|status| match wanted.as_deref() {
			Some(wanted) => normalize_status(*status) == wanted,
			None => true,
		})
		.count() as u64;

	CostBreakdown { counted, total: counted as f64 * per_unit }
}
