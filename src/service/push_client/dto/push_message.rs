use std::collections::HashMap;

///
/// Provider agnostic message handed to the push client.
///
pub struct PushMessage {
    pub title: String,
    pub body: String,

    /// String only payload delivered next to the visible notification
    pub data: HashMap<String, String>,

    /// Click target for browser deliveries
    pub link: Option<String>,
}
