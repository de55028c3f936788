pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("GHL request failed with status {status}.")]
	Upstream { status: u16, details: String },
	#[error("GHL client error: {message}")]
	Ghl { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}

impl From<pulse_ghl::Error> for Error {
	fn from(err: pulse_ghl::Error) -> Self {
		match err {
			pulse_ghl::Error::Upstream { status, body } => Self::Upstream { status, details: body },
			other => Self::Ghl { message: other.to_string() },
		}
	}
}

impl From<pulse_storage::Error> for Error {
	fn from(err: pulse_storage::Error) -> Self {
		match err {
			pulse_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
		}
	}
}
