use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use pulse_domain::{CallFacts, CallMetrics, call_metrics};

use crate::{PulseService, Result};

const STALE_CACHE_WARNING: &str = "Using cached data due to fetch error";
const EMPTY_TABLE_WARNING: &str = "No calls found in database";

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
	pub data: CallMetrics,
	pub cached: bool,
	pub last_update: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub warning: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
	pub success: bool,
	pub data: CallMetrics,
	pub cached: bool,
	pub last_update: String,
}

impl PulseService {
	/// Returns call metrics, served from the cache while it is fresh. When a
	/// fresh computation fails and a stale cached value exists, the stale
	/// value is served with a warning instead of surfacing the error.
	pub async fn call_metrics(&self) -> Result<MetricsResponse> {
		if self.cache.is_valid()
			&& let Some((data, stored_at)) = self.cache.get()
		{
			tracing::debug!("Serving cached call metrics.");

			return Ok(MetricsResponse {
				data,
				cached: true,
				last_update: rfc3339(stored_at),
				warning: None,
			});
		}

		match self.compute_metrics().await {
			Ok(response) => Ok(response),
			Err(err) => {
				if let Some((data, stored_at)) = self.cache.get() {
					tracing::warn!(error = %err, "Metrics fetch failed; serving stale cache.");

					return Ok(MetricsResponse {
						data,
						cached: true,
						last_update: rfc3339(stored_at),
						warning: Some(STALE_CACHE_WARNING.to_string()),
					});
				}

				Err(err)
			},
		}
	}

	/// Drops the cache and recomputes. Failures surface; there is no stale
	/// fallback on an explicit refresh.
	pub async fn refresh_metrics(&self) -> Result<RefreshResponse> {
		self.cache.clear();

		let fresh = self.compute_metrics().await?;

		tracing::info!(last_update = %fresh.last_update, "Metrics cache refreshed.");

		Ok(RefreshResponse {
			success: true,
			data: fresh.data,
			cached: false,
			last_update: fresh.last_update,
		})
	}

	async fn compute_metrics(&self) -> Result<MetricsResponse> {
		let records = self.calls.fetch_all().await?;
		let warning = records.is_empty().then(|| EMPTY_TABLE_WARNING.to_string());
		let data = call_metrics(records.iter().map(|record| CallFacts {
			direction: record.direction.as_deref(),
			call_status: record.call_status.as_deref(),
			disconnection_reason: record.disconnection_reason.as_deref(),
		}));

		self.cache.set(data.clone());

		Ok(MetricsResponse {
			data,
			cached: false,
			last_update: rfc3339(OffsetDateTime::now_utc()),
			warning,
		})
	}
}

pub(crate) fn rfc3339(ts: OffsetDateTime) -> String {
	ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}
