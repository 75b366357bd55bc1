mod device_tokens_repository;
mod error;

pub use device_tokens_repository::*;
pub use error::*;
