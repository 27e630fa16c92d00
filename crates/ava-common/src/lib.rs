pub mod errors;
pub mod id;

pub use errors::{AvaError, ConfigError};
pub use id::{new_id, MessageId};

pub type Result<T> = std::result::Result<T, AvaError>;
