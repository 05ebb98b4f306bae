//! Per-call removal counts

use std::ops::AddAssign;

use serde::Serialize;

/// What the filter took out of one input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    /// Denied elements removed together with their subtree
    pub removed_elements: usize,
    /// Elements replaced by their children (strict mode)
    pub unwrapped_elements: usize,
    /// Attributes stripped from surviving elements
    pub removed_attributes: usize,
}

impl SanitizeReport {
    /// True when the filter removed and unwrapped nothing
    pub fn nothing_removed(&self) -> bool {
        self.removed_elements == 0 && self.unwrapped_elements == 0 && self.removed_attributes == 0
    }
}

impl AddAssign for SanitizeReport {
    fn add_assign(&mut self, other: Self) {
        self.removed_elements += other.removed_elements;
        self.unwrapped_elements += other.unwrapped_elements;
        self.removed_attributes += other.removed_attributes;
    }
}
