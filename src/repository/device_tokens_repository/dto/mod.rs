mod device_token;
mod device_type;

pub use device_token::*;
pub use device_type::*;
