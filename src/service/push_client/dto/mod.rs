mod multicast_outcome;
mod push_message;
mod send_outcome;
mod service_account_key;

pub use multicast_outcome::*;
pub use push_message::*;
pub use send_outcome::*;
pub use service_account_key::*;
