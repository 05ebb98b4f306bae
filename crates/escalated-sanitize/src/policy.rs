//! Sanitization policy
//!
//! Fixed tables consulted by the tree filter. The policy is static data; there
//! is no way to build or change one at runtime. Closing a gap means extending
//! these tables.

/// Elements removed together with their whole subtree
const DENIED_TAGS: &[&str] = &[
    "script", "style", "iframe", "frame", "frameset", "object", "embed", "applet", "form",
    "input", "textarea", "button", "select", "option", "link", "meta", "base", "noscript",
    "noframes", "noembed", "template", "xmp", "plaintext", "svg", "math",
];

/// Formatting subset kept by strict mode; anything else that is not denied
/// gets unwrapped
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "b", "i", "u", "strong", "em", "a", "ul", "ol", "li", "blockquote", "pre", "code",
    "h1", "h2", "h3", "h4", "h5", "h6", "img", "table", "thead", "tbody", "tfoot", "caption",
    "colgroup", "col", "tr", "th", "td", "div", "span", "hr", "sub", "sup", "dl", "dt", "dd",
];

/// Attributes whose value is a URI reference
const URI_ATTRIBUTES: &[&str] = &[
    "href", "src", "action", "formaction", "xlink:href", "background", "poster", "cite",
    "longdesc", "lowsrc", "dynsrc",
];

/// Schemes that execute script when navigated to or loaded
const SCRIPT_SCHEMES: &[&str] = &["javascript:", "vbscript:"];

/// The only `data:` URIs allowed through (pasted inline images)
const DATA_SCHEME: &str = "data:";
const DATA_IMAGE_PREFIX: &str = "data:image/";

/// Substrings that disqualify a `style` attribute.
///
/// `url(` is a blanket rule and also catches benign references such as
/// `url(#gradient)`. A backslash starts a CSS escape, which can spell any of
/// the other needles.
const STYLE_NEEDLES: &[&str] = &[
    "expression(",
    "javascript:",
    "url(",
    "vbscript:",
    "-moz-binding",
    "behavior:",
    "\\",
];

/// Immutable sanitization policy
#[derive(Debug)]
pub struct Policy {
    denied_tags: &'static [&'static str],
    allowed_tags: &'static [&'static str],
    uri_attributes: &'static [&'static str],
    script_schemes: &'static [&'static str],
    style_needles: &'static [&'static str],
}

pub(crate) static POLICY: Policy = Policy {
    denied_tags: DENIED_TAGS,
    allowed_tags: ALLOWED_TAGS,
    uri_attributes: URI_ATTRIBUTES,
    script_schemes: SCRIPT_SCHEMES,
    style_needles: STYLE_NEEDLES,
};

/// The process-wide policy
pub fn policy() -> &'static Policy {
    &POLICY
}

impl Policy {
    pub fn denied_tags(&self) -> &'static [&'static str] {
        self.denied_tags
    }

    pub fn allowed_tags(&self) -> &'static [&'static str] {
        self.allowed_tags
    }

    pub fn uri_attributes(&self) -> &'static [&'static str] {
        self.uri_attributes
    }

    /// Whether the element and its subtree must be removed
    pub fn is_denied_tag(&self, tag: &str) -> bool {
        contains_ignore_case(self.denied_tags, tag)
    }

    /// Whether strict mode keeps the element
    pub fn is_allowed_tag(&self, tag: &str) -> bool {
        contains_ignore_case(self.allowed_tags, tag)
    }

    /// Whether a tag name can be written back as-is: an ASCII letter followed
    /// by ASCII alphanumerics, `-`, `_`, `.` or `:`. The tokenizer accepts far
    /// more (`<scr<script>` names an element `scr<script`).
    pub fn is_well_formed_tag(&self, tag: &str) -> bool {
        let mut chars = tag.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
    }

    /// Any attribute named `on*` is treated as an event handler
    pub fn is_event_handler(&self, name: &str) -> bool {
        name.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("on"))
    }

    pub fn is_uri_attribute(&self, name: &str) -> bool {
        contains_ignore_case(self.uri_attributes, name)
    }

    pub fn is_style_attribute(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case("style")
    }

    /// Whether a URI attribute value must be removed
    pub fn is_dangerous_uri(&self, value: &str) -> bool {
        let normalized = normalize(value);
        if self
            .script_schemes
            .iter()
            .any(|scheme| normalized.starts_with(scheme))
        {
            return true;
        }
        normalized.starts_with(DATA_SCHEME) && !normalized.starts_with(DATA_IMAGE_PREFIX)
    }

    /// Whether a `style` attribute value must be removed
    pub fn is_dangerous_style(&self, value: &str) -> bool {
        let compact = normalize(value);
        let uncommented = strip_css_comments(&compact);
        self.style_needles
            .iter()
            .any(|needle| compact.contains(needle) || uncommented.contains(needle))
    }
}

fn contains_ignore_case(table: &[&str], name: &str) -> bool {
    table.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

/// Lowercase and drop every whitespace and control character.
///
/// Browsers skip these when reading a scheme, so `java\tscript:` and
/// ` JAVASCRIPT:` both collapse to `javascript:`. Style values get the same
/// treatment so `url (` and `URL(` match the same needle.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Remove `/* ... */` comments; an unterminated comment runs to the end
fn strip_css_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_tags_case_insensitive() {
        let policy = policy();
        assert!(policy.is_denied_tag("script"));
        assert!(policy.is_denied_tag("SCRIPT"));
        assert!(policy.is_denied_tag("IfRaMe"));
        assert!(!policy.is_denied_tag("p"));
        assert!(!policy.is_denied_tag("scripts"));
    }

    #[test]
    fn test_event_handler_prefix() {
        let policy = policy();
        assert!(policy.is_event_handler("onclick"));
        assert!(policy.is_event_handler("OnError"));
        assert!(policy.is_event_handler("on"));
        assert!(!policy.is_event_handler("o"));
        assert!(!policy.is_event_handler("class"));
        assert!(!policy.is_event_handler("button-on"));
    }

    #[test]
    fn test_well_formed_tags() {
        let policy = policy();
        assert!(policy.is_well_formed_tag("p"));
        assert!(policy.is_well_formed_tag("h1"));
        assert!(policy.is_well_formed_tag("my-widget"));
        assert!(!policy.is_well_formed_tag("scr<script"));
        assert!(!policy.is_well_formed_tag("1abc"));
        assert!(!policy.is_well_formed_tag("a\"b"));
        assert!(!policy.is_well_formed_tag(""));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" Java\tScript:\nalert(1)"), "javascript:alert(1)");
        assert_eq!(normalize("\u{0}\u{1f}JAVASCRIPT:x"), "javascript:x");
        assert_eq!(normalize("java\u{a0}script:x"), "javascript:x");
    }

    #[test]
    fn test_script_schemes_dangerous() {
        let policy = policy();
        assert!(policy.is_dangerous_uri("javascript:alert(1)"));
        assert!(policy.is_dangerous_uri("  JaVaScRiPt:alert(1)"));
        assert!(policy.is_dangerous_uri("java\nscript:alert(1)"));
        assert!(policy.is_dangerous_uri("vbscript:msgbox(1)"));
        assert!(!policy.is_dangerous_uri("https://example.com/javascript:"));
        assert!(!policy.is_dangerous_uri("/relative/path"));
        assert!(!policy.is_dangerous_uri("mailto:help@example.com"));
    }

    #[test]
    fn test_data_uris() {
        let policy = policy();
        assert!(!policy.is_dangerous_uri("data:image/png;base64,AAAA"));
        assert!(!policy.is_dangerous_uri("DATA:IMAGE/gif;base64,AAAA"));
        assert!(policy.is_dangerous_uri("data:text/html;base64,AAAA"));
        assert!(policy.is_dangerous_uri("data:,hello"));
        assert!(policy.is_dangerous_uri(" d a t a :text/html,x"));
    }

    #[test]
    fn test_style_needles() {
        let policy = policy();
        assert!(policy.is_dangerous_style("color:red;expression(alert(1))"));
        assert!(policy.is_dangerous_style("width: EXPRESSION (alert(1))"));
        assert!(policy.is_dangerous_style("background:url(http://evil/x.png)"));
        assert!(policy.is_dangerous_style("background: URL ( x )"));
        assert!(policy.is_dangerous_style("fill:url(#gradient)"));
        assert!(policy.is_dangerous_style("x:expr/**/ession(1)"));
        assert!(policy.is_dangerous_style("x:\\65xpression(1)"));
        assert!(policy.is_dangerous_style("-moz-binding:x"));
        assert!(!policy.is_dangerous_style("color: red; font-weight: bold"));
    }

    #[test]
    fn test_style_comment_cannot_hide_needle() {
        let policy = policy();
        assert!(policy.is_dangerous_style("font-family:\"/*\";background:url(x)"));
    }

    #[test]
    fn test_strip_css_comments() {
        assert_eq!(strip_css_comments("a/*x*/b/*y*/c"), "abc");
        assert_eq!(strip_css_comments("a/*open"), "a");
        assert_eq!(strip_css_comments("plain"), "plain");
    }

    #[test]
    fn test_denied_and_allowed_disjoint() {
        let policy = policy();
        for tag in policy.allowed_tags() {
            assert!(!policy.is_denied_tag(tag), "{tag} is both allowed and denied");
        }
    }
}
