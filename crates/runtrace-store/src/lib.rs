pub mod error;
pub mod file;
pub mod store;

pub use error::{Error, Result};
pub use file::LogFile;
pub use store::CommandLog;
