pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error("GHL request failed with status {status}.")]
	Upstream { status: u16, body: String },
	#[error("{message}")]
	InvalidConfig { message: String },
}
