//! Runtime discriminant guard
//!
//! A total, non-throwing membership check: does this decoded value claim to
//! be a payload for a given event? Only the discriminant is inspected; the
//! typed decode in [`super::payload`] is the stricter check layered on top.

use serde_json::Value;

use super::HookEvent;

/// True when `value` is an object whose `hook_event_name` equals `event`
///
/// Never panics. Primitives, arrays, null, objects without the discriminant,
/// and objects with a non-string discriminant all return false. Safe on
/// attacker-controlled input.
pub fn is_payload_of(value: &Value, event: HookEvent) -> bool {
    claimed_event(value) == Some(event)
}

/// The event a decoded value claims to be, if any
pub fn claimed_event(value: &Value) -> Option<HookEvent> {
    value
        .as_object()?
        .get("hook_event_name")?
        .as_str()
        .and_then(HookEvent::from_wire)
}
