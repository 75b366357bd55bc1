pub mod device_tokens_service;
pub mod push_client;
pub mod push_service;
