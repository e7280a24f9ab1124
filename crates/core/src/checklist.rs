//! The fixed 19-item inspection checklist.
//!
//! Every inspection carries exactly these items, seeded at creation with
//! status `na`. The template is ordered; item numbers are 1-based and
//! stable across the fleet, so historical inspections stay comparable.

use crate::lifecycle::ChecklistStatus;

/// One entry of the checklist template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistTemplateItem {
    pub number: i32,
    pub name: &'static str,
}

/// The canonical checklist, in item-number order.
pub const CHECKLIST_TEMPLATE: [ChecklistTemplateItem; 19] = [
    ChecklistTemplateItem { number: 1, name: "External corrosion" },
    ChecklistTemplateItem { number: 2, name: "Coating / painting condition" },
    ChecklistTemplateItem { number: 3, name: "Insulation condition" },
    ChecklistTemplateItem { number: 4, name: "Corrosion under insulation (CUI) indications" },
    ChecklistTemplateItem { number: 5, name: "Pipe supports and hangers" },
    ChecklistTemplateItem { number: 6, name: "Vibration and movement" },
    ChecklistTemplateItem { number: 7, name: "Flanged connections and gaskets" },
    ChecklistTemplateItem { number: 8, name: "Bolting condition" },
    ChecklistTemplateItem { number: 9, name: "Welded joints" },
    ChecklistTemplateItem { number: 10, name: "Valves and valve stems" },
    ChecklistTemplateItem { number: 11, name: "Small bore connections" },
    ChecklistTemplateItem { number: 12, name: "Leaks or weeping" },
    ChecklistTemplateItem { number: 13, name: "Grounding / earthing connections" },
    ChecklistTemplateItem { number: 14, name: "Marking and tagging legibility" },
    ChecklistTemplateItem { number: 15, name: "Deformation, dents or bulging" },
    ChecklistTemplateItem { number: 16, name: "Drain and vent points" },
    ChecklistTemplateItem { number: 17, name: "Instrument connections" },
    ChecklistTemplateItem { number: 18, name: "Access for inspection and maintenance" },
    ChecklistTemplateItem { number: 19, name: "Housekeeping around the asset" },
];

/// Status every seeded item starts in.
pub const SEED_STATUS: ChecklistStatus = ChecklistStatus::NotApplicable;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_numbered_one_through_nineteen() {
        assert_eq!(CHECKLIST_TEMPLATE.len(), 19);
        for (idx, item) in CHECKLIST_TEMPLATE.iter().enumerate() {
            assert_eq!(item.number, idx as i32 + 1);
            assert!(!item.name.is_empty());
        }
    }

    #[test]
    fn seed_status_is_not_applicable() {
        assert_eq!(SEED_STATUS.as_str(), "na");
    }
}
