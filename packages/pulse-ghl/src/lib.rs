pub mod contacts;
pub mod messages;

mod error;

pub use contacts::{Contact, ContactFetch, SearchPage, fetch_all_contacts};
pub use error::{Error, Result};
pub use messages::{Message, MessageFetch, MessagePage, fetch_all_messages};

use std::{future::Future, pin::Pin, time::Duration};

use reqwest::{
	Client, Response, StatusCode,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Records returned per search request. High enough to keep pagination rounds
/// down; the upstream caps page sizes above this.
pub const PAGE_LIMIT: u32 = 100;
/// Hard bound on pagination rounds per fetch, purely a guard against a
/// misbehaving upstream cursor looping forever.
pub const MAX_ROUNDS: usize = 200;

/// Seam for the contact search endpoint so the fetch driver can run against
/// scripted pages in tests.
pub trait SearchTransport
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, Result<SearchPage>>;
}

/// Seam for the cursor-paginated message export endpoint.
pub trait MessageTransport
where
	Self: Send + Sync,
{
	fn export<'a>(
		&'a self,
		cursor: Option<&'a str>,
		limit: u32,
	) -> BoxFuture<'a, Result<MessagePage>>;
}

/// HTTP client for the GHL API.
pub struct GhlClient {
	http: Client,
	cfg: pulse_config::Ghl,
}
impl GhlClient {
	pub fn new(cfg: &pulse_config::Ghl) -> Result<Self> {
		let mut headers = HeaderMap::new();

		headers.insert(
			AUTHORIZATION,
			HeaderValue::from_str(&cfg.api_key).map_err(|_| Error::InvalidConfig {
				message: "ghl.api_key is not a valid header value.".to_string(),
			})?,
		);
		headers.insert(
			"Version",
			HeaderValue::from_str(&cfg.api_version).map_err(|_| Error::InvalidConfig {
				message: "ghl.api_version is not a valid header value.".to_string(),
			})?,
		);
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(headers)
			.build()?;

		Ok(Self { http, cfg: cfg.clone() })
	}

	async fn search_contacts(&self, body: &Value) -> Result<SearchPage> {
		let url = format!("{}/contacts/search", self.cfg.api_base);
		let res = self.http.post(url).json(body).send().await?;
		let json = read_json(res).await?;

		Ok(SearchPage::from_value(json))
	}

	async fn export_messages(&self, cursor: Option<&str>, limit: u32) -> Result<MessagePage> {
		let url = format!("{}/conversations/messages/export", self.cfg.api_base);
		let mut query = vec![
			("locationId", self.cfg.location_id.clone()),
			("limit", limit.to_string()),
			("sort", "dateAdded:desc".to_string()),
		];

		if let Some(cursor) = cursor {
			query.push(("cursor", cursor.to_string()));
		}

		let res = self.http.get(url).query(&query).send().await?;
		let json = read_json(res).await?;

		Ok(MessagePage::from_value(json))
	}
}

impl SearchTransport for GhlClient {
	fn search<'a>(&'a self, body: &'a Value) -> BoxFuture<'a, Result<SearchPage>> {
		Box::pin(self.search_contacts(body))
	}
}

impl MessageTransport for GhlClient {
	fn export<'a>(
		&'a self,
		cursor: Option<&'a str>,
		limit: u32,
	) -> BoxFuture<'a, Result<MessagePage>> {
		Box::pin(self.export_messages(cursor, limit))
	}
}

/// Reads the response body, surfacing non-2xx responses verbatim. Bodies that
/// are not valid JSON are treated as empty objects rather than failures.
async fn read_json(res: Response) -> Result<Value> {
	let status = res.status();

	if !status.is_success() {
		let body = res.text().await.unwrap_or_default();

		return Err(Error::Upstream { status: status.as_u16(), body });
	}
	if status == StatusCode::NO_CONTENT {
		return Ok(Value::Null);
	}

	let text = res.text().await?;

	Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
}
