//! Markup neutralization for user-supplied comment fields.
//!
//! Comments are rendered into HTML by downstream consumers, so angle
//! brackets are escaped before storage. This is a narrow filter against
//! accidental or hostile tag injection; it is NOT a general-purpose HTML
//! sanitizer and makes no attempt to handle entities, attributes, or URLs.

/// Trim surrounding whitespace and escape `<` / `>` in a user-supplied
/// string.
pub fn neutralize_markup(input: &str) -> String {
    input.trim().replace('<', "&lt;").replace('>', "&gt;")
}
