use std::collections::BTreeMap;

use serde::Serialize;

use pulse_domain::{DashboardProfile, count_tags};
use pulse_ghl::{PAGE_LIMIT, fetch_all_contacts};

use crate::{PulseService, Result};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionsResponse {
	pub total_reported: u64,
	pub total_fetched: u64,
	pub counts: BTreeMap<String, u64>,
	pub tags: Vec<String>,
	pub dashboard_type: String,
}

impl PulseService {
	/// Drains the contact search for the profile's filter tree and counts tag
	/// occurrences over the profile's category universe.
	pub async fn conversions(&self, profile: DashboardProfile) -> Result<ConversionsResponse> {
		let filters = profile.build_filters();
		let fetch = fetch_all_contacts(
			self.transports.search.as_ref(),
			&self.cfg.ghl.location_id,
			PAGE_LIMIT,
			&filters,
		)
		.await?;

		tracing::info!(
			dashboard_type = profile.slug(),
			fetched = fetch.contacts.len(),
			reported = fetch.total_reported,
			"Contact fetch complete."
		);

		let counts = count_tags(
			fetch.contacts.values().map(|contact| contact.tags.as_slice()),
			profile.tags(),
		);

		Ok(ConversionsResponse {
			total_reported: fetch.total_reported,
			total_fetched: fetch.contacts.len() as u64,
			counts,
			tags: profile.tags().iter().map(|tag| tag.to_string()).collect(),
			dashboard_type: profile.slug().to_string(),
		})
	}
}
