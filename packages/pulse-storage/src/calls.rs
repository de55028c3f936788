use sqlx::FromRow;

use crate::{Result, db::Db};

/// Rows fetched per round of the offset loop.
pub const PAGE_SIZE: i64 = 1_000;

/// A call record as ingested by the telephony webhook. Nullable columns stay
/// optional; the aggregation layer decides their fallback buckets.
#[derive(Clone, Debug, FromRow)]
pub struct CallRecord {
	pub id: i64,
	pub call_id: String,
	pub from_number: String,
	pub to_number: String,
	pub direction: Option<String>,
	pub call_status: Option<String>,
	pub disconnection_reason: Option<String>,
}

/// Pulls every call record, one fixed-size offset page at a time, ordered by
/// `id` so pages are stable. A short page means the table is exhausted.
///
/// The table name is interpolated, not bound; config validation restricts it
/// to identifier characters.
pub async fn fetch_all_calls(db: &Db, table: &str) -> Result<Vec<CallRecord>> {
	let sql = format!(
		"\
SELECT id, call_id, from_number, to_number, direction, call_status, disconnection_reason
FROM {table}
ORDER BY id
LIMIT $1 OFFSET $2"
	);
	let mut calls = Vec::new();
	let mut offset: i64 = 0;

	loop {
		let rows: Vec<CallRecord> = sqlx::query_as(&sql)
			.bind(PAGE_SIZE)
			.bind(offset)
			.fetch_all(&db.pool)
			.await?;
		let fetched = rows.len();

		calls.extend(rows);

		if fetched < PAGE_SIZE as usize {
			break;
		}

		offset += PAGE_SIZE;
	}

	tracing::debug!(calls = calls.len(), "Fetched call records.");

	Ok(calls)
}
