use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MAX_ROUNDS, MessageTransport, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
	#[serde(default)]
	pub id: String,
	pub status: Option<String>,
	pub direction: Option<String>,
	pub date_added: Option<String>,
}

/// One page of the message export response with defensive defaults.
#[derive(Clone, Debug, Default)]
pub struct MessagePage {
	pub messages: Vec<Message>,
	pub next_cursor: Option<String>,
	pub total: u64,
}
impl MessagePage {
	pub fn from_value(json: Value) -> Self {
		let messages = json
			.get("messages")
			.and_then(Value::as_array)
			.map(|items| {
				items
					.iter()
					.filter_map(|item| serde_json::from_value(item.clone()).ok())
					.collect()
			})
			.unwrap_or_default();
		let next_cursor = json
			.get("nextCursor")
			.and_then(Value::as_str)
			.filter(|cursor| !cursor.is_empty())
			.map(str::to_string);
		let total = json.get("total").and_then(Value::as_u64).unwrap_or(0);

		Self { messages, next_cursor, total }
	}
}

#[derive(Debug, Default)]
pub struct MessageFetch {
	pub messages: Vec<Message>,
	pub total_reported: u64,
}

/// Drains the cursor-only message export endpoint. Unlike the contact search
/// there is no pagination mode to detect: the loop ends when the server stops
/// handing out a cursor or a page comes back empty. Messages keep arrival
/// order and are deduplicated by id, first occurrence winning.
pub async fn fetch_all_messages<T>(transport: &T, page_limit: u32) -> Result<MessageFetch>
where
	T: MessageTransport + ?Sized,
{
	let mut messages = Vec::new();
	let mut seen: HashSet<String> = HashSet::new();
	let mut cursor: Option<String> = None;
	let mut total: u64 = 0;

	for round in 0..MAX_ROUNDS {
		let page = transport.export(cursor.as_deref(), page_limit).await?;

		if round == 0 {
			total = page.total;
		}

		let fetched = page.messages.len();

		for message in page.messages {
			if message.id.is_empty() || !seen.insert(message.id.clone()) {
				continue;
			}

			messages.push(message);
		}

		if fetched == 0 {
			break;
		}

		match page.next_cursor {
			Some(next) => cursor = Some(next),
			None => break,
		}

		if round + 1 == MAX_ROUNDS {
			tracing::warn!(
				rounds = MAX_ROUNDS,
				fetched = messages.len(),
				"Message export hit the round ceiling; returning what accumulated."
			);
		}
	}

	let total_reported = total.max(messages.len() as u64);

	Ok(MessageFetch { messages, total_reported })
}
