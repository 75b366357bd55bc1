use super::SendOutcome;
use crate::service::push_client;
use serde::Serialize;

#[derive(Serialize)]
pub struct MulticastReport {
    pub success_count: usize,
    pub failure_count: usize,
    pub responses: Vec<SendOutcome>,
}

impl From<push_client::MulticastOutcome> for MulticastReport {
    fn from(value: push_client::MulticastOutcome) -> Self {
        Self {
            success_count: value.success_count,
            failure_count: value.failure_count,
            responses: value.responses.into_iter().map(SendOutcome::from).collect(),
        }
    }
}
