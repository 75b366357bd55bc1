mod device_tokens_repository;
mod device_tokens_repository_impl;
mod dto;
mod entity;

pub use device_tokens_repository::*;
pub use device_tokens_repository_impl::*;
pub use dto::*;
