use serde::Serialize;

use pulse_domain::{SMS_COST_PER_MESSAGE, message_cost};
use pulse_ghl::{PAGE_LIMIT, fetch_all_messages};

use crate::{PulseService, Result};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsCostsResponse {
	pub messages_counted: u64,
	pub total_reported: u64,
	pub cost_per_message: f64,
	pub total_cost: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status_filter: Option<String>,
}

impl PulseService {
	/// Drains the message export and prices the (optionally status-filtered)
	/// message count at the fixed per-message rate.
	pub async fn sms_costs(&self, status_filter: Option<&str>) -> Result<SmsCostsResponse> {
		let fetch = fetch_all_messages(self.transports.messages.as_ref(), PAGE_LIMIT).await?;
		let breakdown = message_cost(
			fetch.messages.iter().map(|message| message.status.as_deref()),
			SMS_COST_PER_MESSAGE,
			status_filter,
		);

		tracing::info!(
			fetched = fetch.messages.len(),
			counted = breakdown.counted,
			"Message export complete."
		);

		Ok(SmsCostsResponse {
			messages_counted: breakdown.counted,
			total_reported: fetch.total_reported,
			cost_per_message: SMS_COST_PER_MESSAGE,
			total_cost: breakdown.total,
			status_filter: status_filter.map(str::to_string),
		})
	}
}
