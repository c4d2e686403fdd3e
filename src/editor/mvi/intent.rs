/// Marker trait for intents.
///
/// Intents represent:
/// - User actions (open, edit a field, submit, cancel)
/// - Async results (store call succeeded or failed)
pub trait Intent: Send + 'static {}
