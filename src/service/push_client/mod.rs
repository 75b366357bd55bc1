mod dto;
mod error;
mod fcm_push_client;
mod push_client;

pub use dto::*;
pub use error::*;
pub use fcm_push_client::*;
pub use push_client::*;
