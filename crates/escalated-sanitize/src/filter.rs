//! Tree Filter
//!
//! Pre-order walk over the parsed fragment with an explicit stack. A denied
//! element is detached before its children are ever pushed, so nothing inside
//! it is visited.

use escalated_dom::{Attribute, DomTree, ElementData, Node};
use serde::Serialize;

use crate::SanitizeReport;
use crate::policy::Policy;

/// Which elements survive the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Remove denied elements, keep every other well-formed element
    #[default]
    Permissive,
    /// Additionally unwrap elements outside the formatting allowlist
    Strict,
}

enum Verdict {
    Keep,
    Remove,
    Unwrap,
}

pub(crate) struct TreeFilter<'p> {
    policy: &'p Policy,
    mode: Mode,
}

impl<'p> TreeFilter<'p> {
    pub(crate) fn new(policy: &'p Policy, mode: Mode) -> Self {
        Self { policy, mode }
    }

    /// Filter the tree in place
    pub(crate) fn apply(&self, tree: &mut DomTree) -> SanitizeReport {
        let mut report = SanitizeReport::default();
        let mut stack = tree.child_ids(tree.root());
        stack.reverse();

        while let Some(id) = stack.pop() {
            let Some(elem) = tree.get_mut(id).and_then(Node::as_element_mut) else {
                continue;
            };

            match self.judge(elem, &mut report) {
                Verdict::Remove => {
                    if let Err(err) = tree.detach(id) {
                        tracing::warn!(%err, "failed to detach denied element");
                        continue;
                    }
                    report.removed_elements += 1;
                }
                Verdict::Unwrap => match tree.unwrap_element(id) {
                    Ok(children) => {
                        report.unwrapped_elements += 1;
                        stack.extend(children.into_iter().rev());
                    }
                    Err(err) => tracing::warn!(%err, "failed to unwrap element"),
                },
                Verdict::Keep => {
                    stack.extend(tree.child_ids(id).into_iter().rev());
                }
            }
        }

        report
    }

    fn judge(&self, elem: &mut ElementData, report: &mut SanitizeReport) -> Verdict {
        if self.policy.is_denied_tag(&elem.name) {
            tracing::trace!(tag = %elem.name, "removing denied element");
            return Verdict::Remove;
        }
        if !self.policy.is_well_formed_tag(&elem.name) {
            tracing::trace!(tag = %elem.name, "unwrapping malformed element");
            return Verdict::Unwrap;
        }
        if self.mode == Mode::Strict && !self.policy.is_allowed_tag(&elem.name) {
            tracing::trace!(tag = %elem.name, "unwrapping element");
            return Verdict::Unwrap;
        }
        report.removed_attributes += self.scrub_attributes(elem);
        Verdict::Keep
    }

    /// Strip event handlers, script/data URIs and dangerous styles
    fn scrub_attributes(&self, elem: &mut ElementData) -> usize {
        let policy = self.policy;
        elem.remove_attrs_where(|attr| {
            let strip = is_dangerous_attribute(policy, attr);
            if strip {
                tracing::trace!(attr = %attr.name, "stripping attribute");
            }
            strip
        })
    }
}

fn is_dangerous_attribute(policy: &Policy, attr: &Attribute) -> bool {
    if policy.is_event_handler(&attr.name) {
        return true;
    }
    if policy.is_uri_attribute(&attr.name) && policy.is_dangerous_uri(&attr.value) {
        return true;
    }
    policy.is_style_attribute(&attr.name) && policy.is_dangerous_style(&attr.value)
}
