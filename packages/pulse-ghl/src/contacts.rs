use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use pulse_domain::FilterNode;

use crate::{MAX_ROUNDS, Result, SearchTransport};

/// A contact as returned by the search endpoint. Everything beyond the
/// identity and tag list is carried opaquely.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Contact {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// One page of the contact search response, already normalized: the record
/// array may arrive under either `contacts` or `results`, and missing fields
/// collapse to defaults instead of failing.
#[derive(Clone, Debug, Default)]
pub struct SearchPage {
	pub contacts: Vec<Contact>,
	/// Server-reported total, zero when absent or non-numeric.
	pub total: u64,
	pub search_after: Option<String>,
}
impl SearchPage {
	pub fn from_value(json: Value) -> Self {
		let contacts = json
			.get("contacts")
			.and_then(Value::as_array)
			.or_else(|| json.get("results").and_then(Value::as_array))
			.map(|items| {
				items
					.iter()
					.filter_map(|item| serde_json::from_value(item.clone()).ok())
					.collect()
			})
			.unwrap_or_default();
		let total = json.get("total").and_then(Value::as_u64).unwrap_or(0);
		let search_after = json
			.get("searchAfter")
			.and_then(Value::as_str)
			.filter(|token| !token.is_empty())
			.map(str::to_string);

		Self { contacts, total, search_after }
	}
}

/// The outcome of draining the search endpoint: contacts deduplicated by id,
/// plus the larger of the server-reported total and the deduplicated size.
#[derive(Debug, Default)]
pub struct ContactFetch {
	pub contacts: HashMap<String, Contact>,
	pub total_reported: u64,
}

/// Drains the contact search endpoint for one filter tree.
///
/// Starts in page-number pagination and switches to cursor (`searchAfter`)
/// pagination the moment the server hands out a token. The switch is one-way:
/// even if a later page omits the token, the driver keeps sending the last
/// one rather than falling back to page numbers, since the server's page
/// numbering is undefined once a cursor session has begun.
///
/// Contacts are deduplicated across pages by id, first occurrence winning.
/// Records without an id are dropped.
///
/// Stop conditions, checked in order after each page: the deduplicated set
/// has reached the total reported on the first page; the page came back
/// empty; or, in page-number mode with no reported total, the page was short.
/// The round ceiling returns whatever accumulated, as a success.
pub async fn fetch_all_contacts<T>(
	transport: &T,
	location_id: &str,
	page_limit: u32,
	filters: &[FilterNode],
) -> Result<ContactFetch>
where
	T: SearchTransport + ?Sized,
{
	let mut contacts: HashMap<String, Contact> = HashMap::new();
	let mut total: u64 = 0;
	let mut using_cursor = false;
	let mut search_after: Option<String> = None;
	let mut page: u64 = 1;

	for round in 0..MAX_ROUNDS {
		let mut body = serde_json::json!({
			"locationId": location_id,
			"pageLimit": page_limit,
			"filters": filters,
		});

		if using_cursor {
			if let Some(token) = search_after.as_deref() {
				body["searchAfter"] = Value::from(token);
			}
		} else {
			body["page"] = Value::from(page);
		}

		let fetched_page = transport.search(&body).await?;

		// Only the first page's total is trusted; later pages may report a
		// shrinking figure as the cursor advances.
		if round == 0 {
			total = fetched_page.total;
		}

		let fetched = fetched_page.contacts.len();

		for contact in fetched_page.contacts {
			if contact.id.is_empty() {
				continue;
			}

			contacts.entry(contact.id.clone()).or_insert(contact);
		}

		if let Some(token) = fetched_page.search_after {
			using_cursor = true;
			search_after = Some(token);
		}

		if total > 0 && contacts.len() as u64 >= total {
			break;
		}
		if fetched == 0 {
			break;
		}
		if !using_cursor {
			page += 1;

			if total == 0 && fetched < page_limit as usize {
				break;
			}
		}
		if round + 1 == MAX_ROUNDS {
			tracing::warn!(
				rounds = MAX_ROUNDS,
				fetched = contacts.len(),
				"Contact search hit the round ceiling; returning what accumulated."
			);
		}
	}

	let total_reported = total.max(contacts.len() as u64);

	Ok(ContactFetch { contacts, total_reported })
}
