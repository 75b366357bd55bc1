use super::SendOutcome;

///
/// Aggregated result of one multicast call.
/// responses keep the order of the tokens passed to the client.
///
#[derive(Debug, PartialEq, Eq)]
pub struct MulticastOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    pub responses: Vec<SendOutcome>,
}
