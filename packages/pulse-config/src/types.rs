use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub ghl: Ghl,
	pub storage: Storage,
	#[serde(default)]
	pub cache: Cache,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Ghl {
	pub api_base: String,
	pub api_key: String,
	#[serde(default = "default_api_version")]
	pub api_version: String,
	pub location_id: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	#[serde(default = "default_calls_table")]
	pub calls_table: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Cache {
	#[serde(default = "default_ttl_secs")]
	pub ttl_secs: u64,
}
impl Default for Cache {
	fn default() -> Self {
		Self { ttl_secs: default_ttl_secs() }
	}
}

fn default_api_version() -> String {
	"2021-07-28".to_string()
}

fn default_timeout_ms() -> u64 {
	30_000
}

fn default_calls_table() -> String {
	"retell_calls".to_string()
}

fn default_ttl_secs() -> u64 {
	240
}
