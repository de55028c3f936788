pub mod calls;
pub mod db;

mod error;

pub use calls::{CallRecord, fetch_all_calls};
pub use db::Db;
pub use error::{Error, Result};
