use std::sync::Arc;

use pulse_service::PulseService;
use pulse_storage::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PulseService>,
}
impl AppState {
	pub async fn new(config: pulse_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;
		let service = PulseService::new(config, db)?;

		Ok(Self { service: Arc::new(service) })
	}
}
