mod push_service;
mod push_service_impl;

pub use push_service::*;
pub use push_service_impl::*;
