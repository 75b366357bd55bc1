mod device_registration;
mod push_notification;
mod send_to_tokens;
mod send_to_user;
mod send_to_users;

pub use device_registration::*;
pub use push_notification::*;
pub use send_to_tokens::*;
pub use send_to_user::*;
pub use send_to_users::*;
