//! Escalated Sanitize
//!
//! Neutralizes stored cross-site-scripting payloads in user-supplied rich text
//! (ticket replies, inbound email bodies) before it is stored or re-rendered.
//!
//! Every call runs three stages:
//! - parse the input as an HTML fragment (html5ever, never fails)
//! - filter the tree: drop denied elements with their subtree, strip `on*`
//!   handlers, script and non-image `data:` URIs, and dangerous `style` values
//! - serialize what is left
//!
//! Output is stable under re-sanitization: `sanitize(&sanitize(s)) == sanitize(s)`.
//! When the serialized result would re-parse to a different tree (foster
//! parenting can nest `<a>` in `<a>`), the three stages run again on it until
//! it settles.
//!
//! # Cost
//!
//! Parsing is linear in input length for typical markup but quadratic in
//! element nesting depth: html5ever scans the stack of open elements on most
//! start and end tags. Deep nesting cannot overflow the call stack anywhere in
//! the pipeline, but tens of thousands of nested elements take seconds. Callers
//! that accept large untrusted bodies (inbound email) should bound input size
//! before sanitizing.
//!
//! # Example
//! ```rust
//! let clean = escalated_sanitize::sanitize("<p onclick=\"steal()\">Hi</p><script>x</script>");
//! assert_eq!(clean, "<p>Hi</p>");
//! ```

mod filter;
pub mod policy;
mod report;
mod sanitizer;

pub use filter::Mode;
pub use policy::{Policy, policy};
pub use report::SanitizeReport;
pub use sanitizer::{HtmlSanitizer, Sanitized};

/// Sanitize an HTML fragment with the denylist policy
pub fn sanitize(html: &str) -> String {
    HtmlSanitizer::new().sanitize(html)
}

/// Sanitize possibly-absent input; `None` yields an empty string
pub fn sanitize_opt(html: Option<&str>) -> String {
    html.map(sanitize).unwrap_or_default()
}

/// Sanitize an HTML fragment, also unwrapping elements outside the
/// formatting allowlist
pub fn sanitize_strict(html: &str) -> String {
    HtmlSanitizer::strict().sanitize(html)
}
