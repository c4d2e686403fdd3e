/// Marker trait for dialog state.
///
/// States should be:
/// - Immutable (Clone to derive new states)
/// - Self-contained (all data needed to render the dialog)
/// - Comparable (PartialEq for detecting changes)
pub trait DialogState: Clone + PartialEq + Default + Send + 'static {}
