mod device_id;
mod device_tokens_service;
mod device_tokens_service_impl;

pub use device_tokens_service::*;
pub use device_tokens_service_impl::*;
