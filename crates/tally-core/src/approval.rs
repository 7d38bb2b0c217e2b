//! Approval state machine for expenses and timesheets.
//!
//! [`ApprovalStateMachine::apply_transition`] validates one status change and
//! returns the updated record. It performs no I/O and reads no clock: the
//! actor and the decision timestamp are arguments, so the same inputs always
//! produce the same result.
//!
//! Checks run in this order:
//! 1. target equals current status: no-op success, record returned unchanged
//! 2. `(current, target)` must be in the legal transition table
//! 3. rejections need a non-blank reason
//! 4. approver-only targets refuse the submitter, and (when roles are
//!    enforced) actors whose role cannot approve
//! 5. expense approvals above the receipt threshold need a receipt

use std::fmt;

use chrono::{DateTime, Utc};

use crate::entities::{Actor, Expense, Review, Timesheet};
use crate::enums::{EntityType, ExpenseStatus, TimesheetStatus};
use crate::errors::{ForbiddenRule, TransitionError};

/// A status enum governed by a legal-transition table.
pub trait WorkflowStatus: Copy + Eq + fmt::Debug + fmt::Display {
    fn can_transition_to(self, next: Self) -> bool;

    /// Target that records an approval decision.
    fn is_approval(self) -> bool;

    /// Target that records a rejection decision and requires a reason.
    fn is_rejection(self) -> bool;

    /// Target that only someone other than the submitter may set.
    fn requires_approver(self) -> bool;
}

impl WorkflowStatus for ExpenseStatus {
    fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    fn is_approval(self) -> bool {
        self == Self::Approved
    }

    fn is_rejection(self) -> bool {
        self == Self::Rejected
    }

    fn requires_approver(self) -> bool {
        matches!(
            self,
            Self::Approved | Self::Rejected | Self::Reimbursed | Self::Paid
        )
    }
}

impl WorkflowStatus for TimesheetStatus {
    fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    fn is_approval(self) -> bool {
        self == Self::Approved
    }

    fn is_rejection(self) -> bool {
        self == Self::Rejected
    }

    fn requires_approver(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// A record that moves through an approval workflow.
pub trait Approvable: Clone {
    type Status: WorkflowStatus;

    const ENTITY_TYPE: EntityType;

    fn id(&self) -> &str;
    fn submitter_id(&self) -> &str;
    fn status(&self) -> Self::Status;
    fn set_status(&mut self, status: Self::Status);
    fn review(&self) -> &Review;
    fn review_mut(&mut self) -> &mut Review;

    /// Claimed amount when the record has no receipt attached.
    ///
    /// `None` for records that never carry receipts.
    fn unreceipted_amount(&self) -> Option<f64> {
        None
    }
}

impl Approvable for Expense {
    type Status = ExpenseStatus;

    const ENTITY_TYPE: EntityType = EntityType::Expense;

    fn id(&self) -> &str {
        &self.id
    }

    fn submitter_id(&self) -> &str {
        &self.submitter_id
    }

    fn status(&self) -> ExpenseStatus {
        self.status
    }

    fn set_status(&mut self, status: ExpenseStatus) {
        self.status = status;
    }

    fn review(&self) -> &Review {
        &self.review
    }

    fn review_mut(&mut self) -> &mut Review {
        &mut self.review
    }

    fn unreceipted_amount(&self) -> Option<f64> {
        self.receipt_file_id.is_none().then_some(self.amount)
    }
}

impl Approvable for Timesheet {
    type Status = TimesheetStatus;

    const ENTITY_TYPE: EntityType = EntityType::Timesheet;

    fn id(&self) -> &str {
        &self.id
    }

    fn submitter_id(&self) -> &str {
        &self.submitter_id
    }

    fn status(&self) -> TimesheetStatus {
        self.status
    }

    fn set_status(&mut self, status: TimesheetStatus) {
        self.status = status;
    }

    fn review(&self) -> &Review {
        &self.review
    }

    fn review_mut(&mut self) -> &mut Review {
        &mut self.review
    }
}

/// Organisation rules layered on top of the transition tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApprovalPolicy {
    /// Refuse approver-only targets to roles that cannot approve.
    pub enforce_roles: bool,
    /// Expense approvals above this amount need a receipt. `None` disables the rule.
    pub receipt_required_above: Option<f64>,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            enforce_roles: true,
            receipt_required_above: None,
        }
    }
}

/// Validates and applies single status transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApprovalStateMachine {
    policy: ApprovalPolicy,
}

impl ApprovalStateMachine {
    #[must_use]
    pub const fn new(policy: ApprovalPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> ApprovalPolicy {
        self.policy
    }

    /// Move `entity` to `target` on behalf of `actor`.
    ///
    /// Returns the updated record; `entity` itself is never modified. Only
    /// `status` and the decision fields in [`Review`] change.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition`, `MissingReason`, `Forbidden`, or
    /// `ReceiptRequired` when the corresponding rule refuses the change.
    pub fn apply_transition<E: Approvable>(
        &self,
        entity: &E,
        target: E::Status,
        actor: &Actor,
        reason: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<E, TransitionError> {
        let current = entity.status();
        if current == target {
            return Ok(entity.clone());
        }

        self.check(entity, target, actor, reason)?;

        let mut next = entity.clone();
        next.set_status(target);
        let review = next.review_mut();
        if target.is_approval() {
            review.approved_by = Some(actor.id.clone());
            review.approved_at = Some(at);
        } else if target.is_rejection() {
            review.rejected_by = Some(actor.id.clone());
            review.rejected_at = Some(at);
            review.rejection_reason = normalized_reason(reason).map(String::from);
        }

        tracing::debug!(
            entity_type = %E::ENTITY_TYPE,
            id = entity.id(),
            from = %current,
            to = %target,
            actor = %actor.id,
            "transition applied"
        );
        Ok(next)
    }

    fn check<E: Approvable>(
        &self,
        entity: &E,
        target: E::Status,
        actor: &Actor,
        reason: Option<&str>,
    ) -> Result<(), TransitionError> {
        let current = entity.status();
        if !current.can_transition_to(target) {
            return Err(TransitionError::InvalidTransition {
                entity_type: E::ENTITY_TYPE,
                id: entity.id().to_string(),
                from: current.to_string(),
                to: target.to_string(),
            });
        }

        if target.is_rejection() && normalized_reason(reason).is_none() {
            return Err(TransitionError::MissingReason {
                entity_type: E::ENTITY_TYPE,
                id: entity.id().to_string(),
            });
        }

        if target.requires_approver() {
            let rule = if actor.id == entity.submitter_id() {
                Some(ForbiddenRule::SelfApproval)
            } else if self.policy.enforce_roles && !actor.role.can_approve() {
                Some(ForbiddenRule::RoleNotPermitted)
            } else {
                None
            };
            if let Some(rule) = rule {
                return Err(TransitionError::Forbidden {
                    entity_type: E::ENTITY_TYPE,
                    id: entity.id().to_string(),
                    actor_id: actor.id.clone(),
                    to: target.to_string(),
                    rule,
                });
            }
        }

        if target.is_approval() {
            if let (Some(threshold), Some(amount)) = (
                self.policy.receipt_required_above,
                entity.unreceipted_amount(),
            ) {
                if amount > threshold {
                    return Err(TransitionError::ReceiptRequired {
                        entity_type: E::ENTITY_TYPE,
                        id: entity.id().to_string(),
                        amount,
                        threshold,
                    });
                }
            }
        }

        Ok(())
    }
}

fn normalized_reason(reason: Option<&str>) -> Option<&str> {
    reason.map(str::trim).filter(|reason| !reason.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::enums::Role;
    use crate::errors::TransitionErrorKind;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
    }

    fn expense(status: ExpenseStatus) -> Expense {
        Expense {
            id: "exp-1".into(),
            submitter_id: "usr-alice".into(),
            status,
            amount: 120.0,
            tax_amount: 21.6,
            is_billable: true,
            receipt_file_id: None,
            review: Review::default(),
        }
    }

    fn timesheet(status: TimesheetStatus) -> Timesheet {
        Timesheet {
            id: "ts-1".into(),
            submitter_id: "usr-alice".into(),
            status,
            hours: 7.5,
            is_billable: true,
            bill_rate: Some(90.0),
            cost_rate: Some(40.0),
            review: Review::default(),
        }
    }

    fn manager() -> Actor {
        Actor::new("usr-bob", Role::ProjectManager)
    }

    fn machine() -> ApprovalStateMachine {
        ApprovalStateMachine::default()
    }

    #[test]
    fn approve_records_decision() {
        let approved = machine()
            .apply_transition(
                &expense(ExpenseStatus::Submitted),
                ExpenseStatus::Approved,
                &manager(),
                None,
                at(),
            )
            .unwrap();

        let mut expected = expense(ExpenseStatus::Approved);
        expected.review.approved_by = Some("usr-bob".into());
        expected.review.approved_at = Some(at());
        assert_eq!(approved, expected);
    }

    #[test]
    fn reject_stores_trimmed_reason() {
        let rejected = machine()
            .apply_transition(
                &timesheet(TimesheetStatus::Pending),
                TimesheetStatus::Rejected,
                &manager(),
                Some("  hours exceed task estimate "),
                at(),
            )
            .unwrap();

        assert_eq!(rejected.status, TimesheetStatus::Rejected);
        assert_eq!(rejected.review.rejected_by.as_deref(), Some("usr-bob"));
        assert_eq!(rejected.review.rejected_at, Some(at()));
        assert_eq!(
            rejected.review.rejection_reason.as_deref(),
            Some("hours exceed task estimate")
        );
        assert_eq!(rejected.review.approved_by, None);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn reject_without_reason_fails(#[case] reason: Option<&str>) {
        let original = expense(ExpenseStatus::Submitted);
        let err = machine()
            .apply_transition(
                &original,
                ExpenseStatus::Rejected,
                &manager(),
                reason,
                at(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), TransitionErrorKind::MissingReason);
        assert_eq!(original.status, ExpenseStatus::Submitted);
    }

    #[rstest]
    #[case(ExpenseStatus::Draft, ExpenseStatus::Approved)]
    #[case(ExpenseStatus::Paid, ExpenseStatus::Approved)]
    #[case(ExpenseStatus::Rejected, ExpenseStatus::Submitted)]
    #[case(ExpenseStatus::Submitted, ExpenseStatus::Reimbursed)]
    fn illegal_expense_transitions(#[case] from: ExpenseStatus, #[case] to: ExpenseStatus) {
        let err = machine()
            .apply_transition(&expense(from), to, &manager(), Some("x"), at())
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                entity_type: EntityType::Expense,
                id: "exp-1".into(),
                from: from.to_string(),
                to: to.to_string(),
            }
        );
    }

    #[test]
    fn approved_timesheet_cannot_be_rejected() {
        let err = machine()
            .apply_transition(
                &timesheet(TimesheetStatus::Approved),
                TimesheetStatus::Rejected,
                &manager(),
                Some("late"),
                at(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), TransitionErrorKind::InvalidTransition);
    }

    #[test]
    fn same_status_is_a_no_op() {
        let original = expense(ExpenseStatus::Paid);
        let submitter = Actor::new("usr-alice", Role::TeamMember);
        let result = machine()
            .apply_transition(&original, ExpenseStatus::Paid, &submitter, None, at())
            .unwrap();
        assert_eq!(result, original);
    }

    #[test]
    fn submitter_cannot_approve_own_expense() {
        let admin_submitter = Actor::new("usr-alice", Role::Admin);
        let err = machine()
            .apply_transition(
                &expense(ExpenseStatus::Submitted),
                ExpenseStatus::Approved,
                &admin_submitter,
                None,
                at(),
            )
            .unwrap_err();
        match err {
            TransitionError::Forbidden { rule, actor_id, .. } => {
                assert_eq!(rule, ForbiddenRule::SelfApproval);
                assert_eq!(actor_id, "usr-alice");
            }
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    #[test]
    fn submitter_may_submit_own_draft() {
        let submitter = Actor::new("usr-alice", Role::TeamMember);
        let submitted = machine()
            .apply_transition(
                &expense(ExpenseStatus::Draft),
                ExpenseStatus::Submitted,
                &submitter,
                None,
                at(),
            )
            .unwrap();
        assert_eq!(submitted.status, ExpenseStatus::Submitted);
        assert_eq!(submitted.review, Review::default());
    }

    #[test]
    fn team_member_cannot_approve_when_roles_enforced() {
        let member = Actor::new("usr-carol", Role::TeamMember);
        let err = machine()
            .apply_transition(
                &timesheet(TimesheetStatus::Pending),
                TimesheetStatus::Approved,
                &member,
                None,
                at(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            TransitionError::Forbidden {
                rule: ForbiddenRule::RoleNotPermitted,
                ..
            }
        ));

        let lenient = ApprovalStateMachine::new(ApprovalPolicy {
            enforce_roles: false,
            ..ApprovalPolicy::default()
        });
        let approved = lenient
            .apply_transition(
                &timesheet(TimesheetStatus::Pending),
                TimesheetStatus::Approved,
                &member,
                None,
                at(),
            )
            .unwrap();
        assert_eq!(approved.status, TimesheetStatus::Approved);
    }

    #[test]
    fn payout_leaves_decision_fields_alone() {
        let mut approved = expense(ExpenseStatus::Approved);
        approved.review.approved_by = Some("usr-bob".into());
        approved.review.approved_at = Some(at());

        let finance = Actor::new("usr-dana", Role::Finance);
        let paid = machine()
            .apply_transition(&approved, ExpenseStatus::Paid, &finance, None, at())
            .unwrap();
        assert_eq!(paid.status, ExpenseStatus::Paid);
        assert_eq!(paid.review, approved.review);
    }

    #[test]
    fn receipt_rule_applies_above_threshold() {
        let strict = ApprovalStateMachine::new(ApprovalPolicy {
            receipt_required_above: Some(100.0),
            ..ApprovalPolicy::default()
        });

        let err = strict
            .apply_transition(
                &expense(ExpenseStatus::Submitted),
                ExpenseStatus::Approved,
                &manager(),
                None,
                at(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), TransitionErrorKind::ReceiptRequired);

        let mut with_receipt = expense(ExpenseStatus::Submitted);
        with_receipt.receipt_file_id = Some("file-9".into());
        assert!(
            strict
                .apply_transition(&with_receipt, ExpenseStatus::Approved, &manager(), None, at())
                .is_ok()
        );

        // Rejection never needs a receipt.
        assert!(
            strict
                .apply_transition(
                    &expense(ExpenseStatus::Submitted),
                    ExpenseStatus::Rejected,
                    &manager(),
                    Some("no receipt"),
                    at(),
                )
                .is_ok()
        );
    }

    #[test]
    fn invalid_transition_reported_before_missing_reason() {
        let err = machine()
            .apply_transition(
                &expense(ExpenseStatus::Draft),
                ExpenseStatus::Rejected,
                &manager(),
                None,
                at(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), TransitionErrorKind::InvalidTransition);
    }
}
