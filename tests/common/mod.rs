use std::sync::Once;
use uuid::Uuid;

static INIT_ENV_ONCE: Once = Once::new();

pub fn init_env() {
    INIT_ENV_ONCE.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

pub fn address() -> String {
    std::env::var("PUSH_GATEWAY_BIND_ADDRESS").unwrap()
}

pub fn unique_user_id() -> String {
    format!("user_{}", Uuid::new_v4())
}

pub fn unique_token() -> String {
    format!("token_{}", Uuid::new_v4())
}
