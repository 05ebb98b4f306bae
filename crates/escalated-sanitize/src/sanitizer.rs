//! The parse → filter → serialize pipeline

use escalated_html::{HtmlParser, HtmlSerializer};
use serde::Serialize;

use crate::SanitizeReport;
use crate::filter::{Mode, TreeFilter};
use crate::policy::{POLICY, Policy};

/// Upper bound on parse/filter/serialize rounds per call
const MAX_PASSES: usize = 8;

/// Sanitized markup together with what was removed to produce it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sanitized {
    pub html: String,
    pub report: SanitizeReport,
}

/// HTML sanitizer bound to the process-wide policy.
///
/// Holds no mutable state; one value can be shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct HtmlSanitizer {
    policy: &'static Policy,
    mode: Mode,
}

impl HtmlSanitizer {
    /// Denylist sanitizer: removes dangerous elements and attributes, keeps
    /// everything else
    pub fn new() -> Self {
        Self {
            policy: &POLICY,
            mode: Mode::Permissive,
        }
    }

    /// Allowlist sanitizer: like [`HtmlSanitizer::new`], and additionally
    /// replaces elements outside the formatting subset with their children
    pub fn strict() -> Self {
        Self {
            policy: &POLICY,
            mode: Mode::Strict,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Sanitize an HTML fragment
    pub fn sanitize(&self, html: &str) -> String {
        self.sanitize_with_report(html).html
    }

    /// Sanitize an HTML fragment and report what was removed.
    ///
    /// The parser can build trees it would never build from their own
    /// serialization (foster-parented tables put `<a>` inside `<a>`), so the
    /// result is filtered again until it re-parses to itself.
    pub fn sanitize_with_report(&self, html: &str) -> Sanitized {
        if html.is_empty() {
            return Sanitized::default();
        }

        let mut current = self.pass(html);
        for pass in 2..=MAX_PASSES {
            let next = self.pass(&current.html);
            current.report += next.report;
            if next.html == current.html {
                tracing::debug!(
                    mode = ?self.mode,
                    passes = pass,
                    removed_elements = current.report.removed_elements,
                    unwrapped_elements = current.report.unwrapped_elements,
                    removed_attributes = current.report.removed_attributes,
                    output_len = current.html.len(),
                    "sanitized fragment"
                );
                return current;
            }
            tracing::trace!(pass, "output re-parsed to a different tree");
            current.html = next.html;
        }

        tracing::warn!(passes = MAX_PASSES, "sanitized output did not settle");
        current
    }

    /// One parse, filter and serialize round
    fn pass(&self, html: &str) -> Sanitized {
        let mut tree = HtmlParser::new().parse_fragment(html);
        let report = TreeFilter::new(self.policy, self.mode).apply(&mut tree);
        let html = HtmlSerializer::new().serialize_inner(&tree, tree.root());
        Sanitized { html, report }
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
