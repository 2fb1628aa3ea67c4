use std::borrow::Cow;

/// A payload that knows the name it is published under.
///
/// Names follow the `<scope>:<verb>` convention (`basket:changed`,
/// `formErrors:change`); per-field form events embed the field,
/// `<form>.<field>:change`, so their names are computed rather than static.
pub trait Event: Clone + core::fmt::Debug + 'static {
    /// Stable event name used for routing.
    fn event_name(&self) -> Cow<'static, str>;
}
