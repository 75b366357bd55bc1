use super::MulticastReport;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DispatchSummary {
    pub sent_count: usize,
    pub failed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DispatchSummary {
    ///
    /// Summary returned when none of the recipients
    /// has a registered device.
    ///
    pub fn no_recipients() -> Self {
        Self {
            sent_count: 0,
            failed_count: 0,
            message: Some("no registered devices".to_string()),
        }
    }
}

impl From<MulticastReport> for DispatchSummary {
    fn from(value: MulticastReport) -> Self {
        Self {
            sent_count: value.success_count,
            failed_count: value.failure_count,
            message: None,
        }
    }
}
