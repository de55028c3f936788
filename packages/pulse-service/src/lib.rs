pub mod cache;
pub mod conversions;
pub mod metrics;
pub mod sms;

mod error;

pub use cache::TtlCache;
pub use conversions::ConversionsResponse;
pub use error::{Error, Result};
pub use metrics::{MetricsResponse, RefreshResponse};
pub use sms::SmsCostsResponse;

use std::{future::Future, pin::Pin, sync::Arc};

use time::Duration;

use pulse_config::Config;
use pulse_domain::CallMetrics;
use pulse_ghl::{GhlClient, MessageTransport, SearchTransport};
use pulse_storage::{CallRecord, Db, calls};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Seam for the call-record store so the metrics pipeline can run against
/// scripted records in tests.
pub trait CallSource
where
	Self: Send + Sync,
{
	fn fetch_all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<CallRecord>>>;
}

/// Default [`CallSource`] backed by the Postgres store.
pub struct DbCalls {
	db: Db,
	table: String,
}
impl DbCalls {
	pub fn new(db: Db, table: impl Into<String>) -> Self {
		Self { db, table: table.into() }
	}
}
impl CallSource for DbCalls {
	fn fetch_all<'a>(&'a self) -> BoxFuture<'a, Result<Vec<CallRecord>>> {
		Box::pin(async move { Ok(calls::fetch_all_calls(&self.db, &self.table).await?) })
	}
}

/// The upstream transports the pipelines talk through. Swappable so tests can
/// script pages instead of hitting the network.
#[derive(Clone)]
pub struct Transports {
	pub search: Arc<dyn SearchTransport>,
	pub messages: Arc<dyn MessageTransport>,
}
impl Transports {
	pub fn new(search: Arc<dyn SearchTransport>, messages: Arc<dyn MessageTransport>) -> Self {
		Self { search, messages }
	}
}

pub struct PulseService {
	pub cfg: Config,
	pub cache: TtlCache<CallMetrics>,
	pub calls: Arc<dyn CallSource>,
	pub transports: Transports,
}
impl PulseService {
	pub fn new(cfg: Config, db: Db) -> Result<Self> {
		let client = Arc::new(GhlClient::new(&cfg.ghl)?);
		let transports = Transports::new(client.clone(), client);
		let calls = Arc::new(DbCalls::new(db, cfg.storage.postgres.calls_table.clone()));

		Ok(Self::with_sources(cfg, calls, transports))
	}

	pub fn with_sources(cfg: Config, calls: Arc<dyn CallSource>, transports: Transports) -> Self {
		let cache = TtlCache::new(Duration::seconds(cfg.cache.ttl_secs as i64));

		Self { cfg, cache, calls, transports }
	}
}
