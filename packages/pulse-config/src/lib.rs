mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Cache, Config, Ghl, Postgres, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a valid socket address.".to_string(),
		});
	}
	if cfg.ghl.api_base.trim().is_empty() {
		return Err(Error::Validation { message: "ghl.api_base must be non-empty.".to_string() });
	}
	if cfg.ghl.api_key.trim().is_empty() {
		return Err(Error::Validation { message: "ghl.api_key must be non-empty.".to_string() });
	}
	if cfg.ghl.location_id.trim().is_empty() {
		return Err(Error::Validation {
			message: "ghl.location_id must be non-empty.".to_string(),
		});
	}
	if cfg.ghl.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "ghl.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	// The table name is interpolated into SQL, so it must stay a bare
	// identifier.
	if cfg.storage.postgres.calls_table.is_empty()
		|| !cfg
			.storage
			.postgres
			.calls_table
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_')
	{
		return Err(Error::Validation {
			message: "storage.postgres.calls_table must contain only ASCII alphanumerics or underscores.".to_string(),
		});
	}
	if cfg.cache.ttl_secs == 0 {
		return Err(Error::Validation {
			message: "cache.ttl_secs must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.ghl.api_base.ends_with('/') {
		cfg.ghl.api_base.pop();
	}
	if cfg.ghl.api_version.trim().is_empty() {
		cfg.ghl.api_version = "2021-07-28".to_string();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> Config {
		toml::from_str(
			r#"
			[service]
			http_bind = "127.0.0.1:8080"
			log_level = "info"

			[ghl]
			api_base    = "https://services.leadconnectorhq.com/"
			api_key     = "key"
			location_id = "loc"

			[storage.postgres]
			dsn            = "postgres://localhost/pulse"
			pool_max_conns = 5
			"#,
		)
		.expect("sample config must parse")
	}

	#[test]
	fn defaults_and_normalization_apply() {
		let mut cfg = sample();
		normalize(&mut cfg);

		assert_eq!(cfg.ghl.api_base, "https://services.leadconnectorhq.com");
		assert_eq!(cfg.ghl.api_version, "2021-07-28");
		assert_eq!(cfg.ghl.timeout_ms, 30_000);
		assert_eq!(cfg.storage.postgres.calls_table, "retell_calls");
		assert_eq!(cfg.cache.ttl_secs, 240);
		assert!(validate(&cfg).is_ok());
	}

	#[test]
	fn rejects_sql_unsafe_table_names() {
		let mut cfg = sample();
		cfg.storage.postgres.calls_table = "calls; DROP TABLE calls".to_string();

		assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));
	}

	#[test]
	fn rejects_unparseable_http_bind() {
		let mut cfg = sample();
		cfg.service.http_bind = "localhost".to_string();

		assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));

		cfg.service.http_bind = String::new();

		assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));
	}

	#[test]
	fn rejects_blank_api_key() {
		let mut cfg = sample();
		cfg.ghl.api_key = "  ".to_string();

		assert!(matches!(validate(&cfg), Err(Error::Validation { .. })));
	}
}
