mod device_token;
mod device_token_list;
mod dispatch_summary;
mod message;
mod multicast_report;
mod registered_device;
mod send_outcome;

pub use device_token::*;
pub use device_token_list::*;
pub use dispatch_summary::*;
pub use message::*;
pub use multicast_report::*;
pub use registered_device::*;
pub use send_outcome::*;
