//! Entity lifecycles as explicit state machines.
//!
//! Every status column in the database is TEXT holding one of the codes
//! defined here. The isolation-plan and isolation-point lifecycles carry a
//! transition table; whether invalid transitions are rejected or applied
//! as requested is controlled by [`GuardMode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Whether lifecycle transitions are checked against the transition table.
///
/// `Strict` rejects out-of-order actions (e.g. verifying a point that was
/// never isolated). `Lenient` applies any requested transition, matching
/// legacy operator-driven workflows where the software records what the
/// field crew did rather than gating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardMode {
    Strict,
    Lenient,
}

impl FromStr for GuardMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(GuardMode::Strict),
            "lenient" => Ok(GuardMode::Lenient),
            other => Err(CoreError::Validation(format!(
                "Unknown guard mode '{other}' (expected 'strict' or 'lenient')"
            ))),
        }
    }
}

/// Declare a TEXT-coded status enum with `as_str`, `FromStr`, and `Display`.
macro_rules! define_code_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant ),+
        }

        impl $name {
            /// The database / wire code for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $code => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        concat!("Unknown ", $label, " '{}'"), other
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_code_enum! {
    /// What an annotation marks on the diagram.
    AnnotationKind ("annotation type") {
        Pipe = "pipe",
        Tank = "tank",
        Component = "component",
    }
}

define_code_enum! {
    /// Manually-set condition status of an annotation.
    ///
    /// Not derived from inspection or measurement data; see
    /// [`crate::suggestion`] for the computed counterpart.
    AnnotationStatus ("annotation status") {
        Ok = "ok",
        Warning = "warning",
        Critical = "critical",
        NotInspected = "not_inspected",
    }
}

define_code_enum! {
    /// Overall outcome of an inspection.
    InspectionOutcome ("inspection status") {
        Approved = "approved",
        Conditional = "conditional",
        Rejected = "rejected",
        Pending = "pending",
    }
}

define_code_enum! {
    /// Evaluation of a single checklist item. `1`..`3` grade findings by
    /// severity; `na` marks the item not applicable (the seeded default).
    ChecklistStatus ("checklist status") {
        Ok = "ok",
        Grade1 = "1",
        Grade2 = "2",
        Grade3 = "3",
        NotApplicable = "na",
    }
}

define_code_enum! {
    /// Kind of tagged item within an isolation plan.
    PointType ("point type") {
        WorkPoint = "work_point",
        Valve = "valve",
        BlindFlange = "blindflange",
        Electrical = "electrical",
        Drain = "drain",
        Vent = "vent",
        Lock = "lock",
        Instrument = "instrument",
        Other = "other",
    }
}

// ---------------------------------------------------------------------------
// Isolation plan lifecycle
// ---------------------------------------------------------------------------

define_code_enum! {
    /// Isolation plan workflow status.
    PlanStatus ("plan status") {
        Draft = "draft",
        PendingApproval = "pending_approval",
        Approved = "approved",
        Active = "active",
        Completed = "completed",
        Cancelled = "cancelled",
    }
}

impl PlanStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, PlanStatus::Completed | PlanStatus::Cancelled)
    }

    /// Whether `self -> to` is a legal workflow step.
    ///
    /// The forward chain is draft -> pending_approval -> approved ->
    /// active -> completed; `cancelled` is reachable from any non-terminal
    /// state. Re-asserting the current status is always allowed (partial
    /// updates may resend it).
    pub fn allows_transition_to(self, to: PlanStatus) -> bool {
        if self == to {
            return true;
        }
        match (self, to) {
            (PlanStatus::Draft, PlanStatus::PendingApproval)
            | (PlanStatus::PendingApproval, PlanStatus::Approved)
            | (PlanStatus::Approved, PlanStatus::Active)
            | (PlanStatus::Active, PlanStatus::Completed) => true,
            (from, PlanStatus::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// Check a requested plan status change under the given guard mode.
pub fn check_plan_transition(
    mode: GuardMode,
    from: PlanStatus,
    to: PlanStatus,
) -> Result<(), CoreError> {
    match mode {
        GuardMode::Lenient => Ok(()),
        GuardMode::Strict => {
            if from.allows_transition_to(to) {
                Ok(())
            } else {
                Err(CoreError::Validation(format!(
                    "Invalid plan transition {from} -> {to}"
                )))
            }
        }
    }
}

/// Check that a plan may be approved from its current status.
///
/// Strict mode requires the plan to be awaiting approval. In both modes the
/// caller must separately enforce that approval stamps are written at most
/// once; that invariant is not mode-dependent.
pub fn check_plan_approval(mode: GuardMode, current: PlanStatus) -> Result<(), CoreError> {
    match mode {
        GuardMode::Lenient => Ok(()),
        GuardMode::Strict => {
            if current == PlanStatus::PendingApproval {
                Ok(())
            } else {
                Err(CoreError::Validation(format!(
                    "Plan cannot be approved from status {current}"
                )))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Isolation point lifecycle
// ---------------------------------------------------------------------------

define_code_enum! {
    /// Isolation point lifecycle status.
    PointStatus ("point status") {
        Pending = "pending",
        Isolated = "isolated",
        Verified = "verified",
        Restored = "restored",
    }
}

/// The three dedicated point transition operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointAction {
    Isolate,
    Verify,
    Restore,
}

impl PointAction {
    /// Status the action drives the point into.
    pub fn target(self) -> PointStatus {
        match self {
            PointAction::Isolate => PointStatus::Isolated,
            PointAction::Verify => PointStatus::Verified,
            PointAction::Restore => PointStatus::Restored,
        }
    }

    /// The only status the action is valid from, under strict guarding.
    pub fn required_current(self) -> PointStatus {
        match self {
            PointAction::Isolate => PointStatus::Pending,
            PointAction::Verify => PointStatus::Isolated,
            PointAction::Restore => PointStatus::Verified,
        }
    }
}

/// Apply a point action under the given guard mode, yielding the new status.
pub fn apply_point_action(
    mode: GuardMode,
    current: PointStatus,
    action: PointAction,
) -> Result<PointStatus, CoreError> {
    match mode {
        GuardMode::Lenient => Ok(action.target()),
        GuardMode::Strict => {
            if current == action.required_current() {
                Ok(action.target())
            } else {
                Err(CoreError::Validation(format!(
                    "Point in status {current} cannot transition to {}",
                    action.target()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn plan_forward_chain_is_legal() {
        let chain = [
            PlanStatus::Draft,
            PlanStatus::PendingApproval,
            PlanStatus::Approved,
            PlanStatus::Active,
            PlanStatus::Completed,
        ];
        for pair in chain.windows(2) {
            assert!(
                pair[0].allows_transition_to(pair[1]),
                "{} -> {} should be legal",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn plan_cancel_from_non_terminal_only() {
        for &status in PlanStatus::ALL {
            let legal = status.allows_transition_to(PlanStatus::Cancelled);
            if status == PlanStatus::Completed {
                assert!(!legal);
            } else {
                // Cancelled -> cancelled is the self-transition, allowed.
                assert!(legal);
            }
        }
    }

    #[test]
    fn plan_skipping_states_rejected_in_strict_mode() {
        assert_matches!(
            check_plan_transition(GuardMode::Strict, PlanStatus::Draft, PlanStatus::Active),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            check_plan_transition(GuardMode::Strict, PlanStatus::Completed, PlanStatus::Draft),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn lenient_mode_applies_anything() {
        assert_matches!(
            check_plan_transition(GuardMode::Lenient, PlanStatus::Completed, PlanStatus::Draft),
            Ok(())
        );
        assert_eq!(
            apply_point_action(GuardMode::Lenient, PointStatus::Pending, PointAction::Restore)
                .unwrap(),
            PointStatus::Restored
        );
    }

    #[test]
    fn approval_requires_pending_approval_in_strict_mode() {
        assert_matches!(
            check_plan_approval(GuardMode::Strict, PlanStatus::PendingApproval),
            Ok(())
        );
        assert_matches!(
            check_plan_approval(GuardMode::Strict, PlanStatus::Draft),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            check_plan_approval(GuardMode::Strict, PlanStatus::Approved),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn point_actions_follow_the_ledger_order() {
        let status = apply_point_action(
            GuardMode::Strict,
            PointStatus::Pending,
            PointAction::Isolate,
        )
        .unwrap();
        assert_eq!(status, PointStatus::Isolated);

        let status =
            apply_point_action(GuardMode::Strict, status, PointAction::Verify).unwrap();
        assert_eq!(status, PointStatus::Verified);

        let status =
            apply_point_action(GuardMode::Strict, status, PointAction::Restore).unwrap();
        assert_eq!(status, PointStatus::Restored);
    }

    #[test]
    fn verify_before_isolate_rejected_in_strict_mode() {
        assert_matches!(
            apply_point_action(GuardMode::Strict, PointStatus::Pending, PointAction::Verify),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            apply_point_action(GuardMode::Strict, PointStatus::Restored, PointAction::Isolate),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn status_codes_round_trip() {
        for &status in PlanStatus::ALL {
            assert_eq!(status.as_str().parse::<PlanStatus>().unwrap(), status);
        }
        for &status in PointStatus::ALL {
            assert_eq!(status.as_str().parse::<PointStatus>().unwrap(), status);
        }
        assert_eq!("1".parse::<ChecklistStatus>().unwrap(), ChecklistStatus::Grade1);
        assert_matches!(
            "bogus".parse::<PlanStatus>(),
            Err(CoreError::Validation(_))
        );
    }
}
