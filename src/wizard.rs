//! The four wizard steps and their ordering.
//!
//! The step is an explicit store field mutated by navigation actions; data
//! and status constraints act as guards on forward navigation (see
//! [`crate::store::BillStore::go_to`]), so manual back-navigation always
//! works.

use serde::{Deserialize, Serialize};

/// Steps in the bill-splitting flow, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    /// Upload a receipt image and run extraction
    #[default]
    Upload,
    /// Review and edit the extracted line items
    Confirm,
    /// Add members and assign items to them
    Assign,
    /// Per-member totals
    Summary,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::Upload,
            WizardStep::Confirm,
            WizardStep::Assign,
            WizardStep::Summary,
        ]
    }

    /// 1-based position for progress display.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Upload => 1,
            WizardStep::Confirm => 2,
            WizardStep::Assign => 3,
            WizardStep::Summary => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload Receipt",
            WizardStep::Confirm => "Confirm Items",
            WizardStep::Assign => "Assign Items",
            WizardStep::Summary => "Summary",
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Upload => Some(WizardStep::Confirm),
            WizardStep::Confirm => Some(WizardStep::Assign),
            WizardStep::Assign => Some(WizardStep::Summary),
            WizardStep::Summary => None,
        }
    }

    pub fn prev(self) -> Option<WizardStep> {
        match self {
            WizardStep::Upload => None,
            WizardStep::Confirm => Some(WizardStep::Upload),
            WizardStep::Assign => Some(WizardStep::Confirm),
            WizardStep::Summary => Some(WizardStep::Assign),
        }
    }
}
