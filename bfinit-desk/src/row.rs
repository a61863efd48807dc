//! Optimistic row status editor
//!
//! ```text
//! Viewing --select(other)--> PendingConfirmation --confirm--> Submitting
//!    ^                          |                                |
//!    +--------cancel------------+         ok: Viewing | Locked   |
//!    +------------------------------------ err: Viewing (rolled back)
//! ```
//!
//! The editor never talks to the network. The owner calls
//! [`RowEditor::begin_submit`], performs the remote call, then reports the
//! outcome through [`RowEditor::finish`].

use crate::error::{DeskError, DeskResult};
use crate::status::EditableStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPhase {
    Viewing,
    PendingConfirmation,
    Submitting,
    /// Terminal; the select stays disabled
    Locked,
}

/// Transient message left by the last confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowNotice {
    Updated(String),
    Failed(String),
}

/// Result of a confirm as seen by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Applied,
    RolledBack(String),
}

/// One entry of the status select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOption<S> {
    pub value: S,
    pub label: &'static str,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone)]
pub struct RowEditor<S> {
    id: String,
    persisted: S,
    displayed: S,
    phase: RowPhase,
    notice: Option<RowNotice>,
}

impl<S: EditableStatus> RowEditor<S> {
    pub fn new(id: impl Into<String>, persisted: S) -> Self {
        Self {
            id: id.into(),
            persisted,
            displayed: persisted,
            phase: initial_phase(persisted),
            notice: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> RowPhase {
        self.phase
    }

    /// Value the select shows
    pub fn displayed(&self) -> S {
        self.displayed
    }

    /// Last value confirmed by the server
    pub fn persisted(&self) -> S {
        self.persisted
    }

    pub fn notice(&self) -> Option<&RowNotice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<RowNotice> {
        self.notice.take()
    }

    /// Confirm and cancel are shown
    pub fn shows_controls(&self) -> bool {
        matches!(
            self.phase,
            RowPhase::PendingConfirmation | RowPhase::Submitting
        )
    }

    /// Select and buttons are disabled
    pub fn is_disabled(&self) -> bool {
        matches!(self.phase, RowPhase::Submitting | RowPhase::Locked)
    }

    /// Options with their enabled state
    pub fn options(&self) -> Vec<StatusOption<S>> {
        self.persisted
            .options()
            .iter()
            .map(|&value| StatusOption {
                value,
                label: value.label(),
                selected: value == self.displayed,
                disabled: self.is_disabled() || !self.may_select(value),
            })
            .collect()
    }

    /// Pick a value in the select.
    ///
    /// Picking the persisted value returns to Viewing without a pending
    /// change.
    pub fn select(&mut self, value: S) -> DeskResult<()> {
        match self.phase {
            RowPhase::Locked => return Err(DeskError::RowLocked(self.id.clone())),
            RowPhase::Submitting => return Err(DeskError::RowBusy(self.id.clone())),
            RowPhase::Viewing | RowPhase::PendingConfirmation => {}
        }
        if !self.may_select(value) {
            return Err(DeskError::InvalidStatus {
                id: self.id.clone(),
                status: value.to_string(),
            });
        }
        if value == self.persisted {
            self.displayed = self.persisted;
            self.phase = RowPhase::Viewing;
            return Ok(());
        }
        self.displayed = value;
        self.phase = RowPhase::PendingConfirmation;
        self.notice = None;
        Ok(())
    }

    fn may_select(&self, value: S) -> bool {
        if self.displayed.is_one_way() && value != self.displayed {
            return false;
        }
        value == self.persisted || self.persisted.can_transition(&value)
    }

    /// Drop a pending change; no-op in any other phase
    pub fn cancel(&mut self) {
        if self.phase == RowPhase::PendingConfirmation {
            self.displayed = self.persisted;
            self.phase = RowPhase::Viewing;
        }
    }

    /// Enter Submitting and return the value to send
    pub fn begin_submit(&mut self) -> DeskResult<S> {
        match self.phase {
            RowPhase::PendingConfirmation => {
                self.phase = RowPhase::Submitting;
                Ok(self.displayed)
            }
            RowPhase::Submitting => Err(DeskError::RowBusy(self.id.clone())),
            RowPhase::Locked => Err(DeskError::RowLocked(self.id.clone())),
            RowPhase::Viewing => Err(DeskError::NothingToConfirm(self.id.clone())),
        }
    }

    /// Settle a submit: keep the new value on success, roll back on failure
    pub fn finish(&mut self, result: Result<(), String>) -> RowOutcome {
        if self.phase != RowPhase::Submitting {
            tracing::warn!(row = %self.id, phase = ?self.phase, "finish called outside Submitting");
        }
        match result {
            Ok(()) => {
                self.persisted = self.displayed;
                self.phase = initial_phase(self.persisted);
                self.notice = Some(RowNotice::Updated(format!(
                    "Status updated to {}",
                    self.persisted.label()
                )));
                RowOutcome::Applied
            }
            Err(message) => {
                self.displayed = self.persisted;
                self.phase = RowPhase::Viewing;
                self.notice = Some(RowNotice::Failed(message.clone()));
                RowOutcome::RolledBack(message)
            }
        }
    }
}

fn initial_phase<S: EditableStatus>(persisted: S) -> RowPhase {
    if persisted.is_locked() {
        RowPhase::Locked
    } else {
        RowPhase::Viewing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ManualStatus, PaymentStatus};

    #[test]
    fn test_selecting_persisted_value_is_noop() {
        let mut row = RowEditor::new("m1", ManualStatus::Pending);
        row.select(ManualStatus::Pending).unwrap();
        assert_eq!(row.phase(), RowPhase::Viewing);
        assert!(!row.shows_controls());
    }

    #[test]
    fn test_select_then_cancel_reverts() {
        let mut row = RowEditor::new("m1", ManualStatus::Pending);
        row.select(ManualStatus::Completed).unwrap();
        assert_eq!(row.phase(), RowPhase::PendingConfirmation);
        assert!(row.shows_controls());
        assert_eq!(row.displayed(), ManualStatus::Completed);

        row.cancel();
        assert_eq!(row.phase(), RowPhase::Viewing);
        assert_eq!(row.displayed(), ManualStatus::Pending);
    }

    #[test]
    fn test_reselecting_persisted_value_drops_pending_change() {
        let mut row = RowEditor::new("m1", ManualStatus::Processing);
        row.select(ManualStatus::Cancle).unwrap();
        row.select(ManualStatus::Processing).unwrap();
        assert_eq!(row.phase(), RowPhase::Viewing);
        assert!(matches!(row.begin_submit(), Err(DeskError::NothingToConfirm(_))));
    }

    #[test]
    fn test_submit_success_commits() {
        let mut row = RowEditor::new("m1", ManualStatus::Pending);
        row.select(ManualStatus::Completed).unwrap();
        assert_eq!(row.begin_submit().unwrap(), ManualStatus::Completed);
        assert!(row.is_disabled());
        assert!(matches!(row.select(ManualStatus::Processing), Err(DeskError::RowBusy(_))));
        assert!(matches!(row.begin_submit(), Err(DeskError::RowBusy(_))));

        assert_eq!(row.finish(Ok(())), RowOutcome::Applied);
        assert_eq!(row.phase(), RowPhase::Viewing);
        assert_eq!(row.persisted(), ManualStatus::Completed);
        assert!(!row.shows_controls());
        assert!(matches!(row.notice(), Some(RowNotice::Updated(_))));
    }

    #[test]
    fn test_submit_failure_rolls_back() {
        let mut row = RowEditor::new("m1", ManualStatus::Pending);
        row.select(ManualStatus::Processing).unwrap();
        row.begin_submit().unwrap();
        let outcome = row.finish(Err("network down".into()));
        assert_eq!(outcome, RowOutcome::RolledBack("network down".into()));
        assert_eq!(row.displayed(), ManualStatus::Pending);
        assert_eq!(row.persisted(), ManualStatus::Pending);
        assert_eq!(row.phase(), RowPhase::Viewing);
        assert_eq!(row.take_notice(), Some(RowNotice::Failed("network down".into())));
        assert!(row.notice().is_none());
    }

    #[test]
    fn test_paid_locks_permanently() {
        let mut row = RowEditor::new("p1", PaymentStatus::Unpaid);
        let unpaid_option = &row.options()[0];
        assert_eq!(unpaid_option.value, PaymentStatus::Unpaid);
        assert!(!unpaid_option.disabled);

        row.select(PaymentStatus::Paid).unwrap();
        row.begin_submit().unwrap();
        row.finish(Ok(()));
        assert_eq!(row.phase(), RowPhase::Locked);
        assert!(row.is_disabled());
        assert!(row.options().iter().all(|o| o.disabled));
        assert!(matches!(row.select(PaymentStatus::Unpaid), Err(DeskError::RowLocked(_))));
    }

    #[test]
    fn test_unpaid_cannot_be_reselected_once_paid_is_shown() {
        let mut row = RowEditor::new("p1", PaymentStatus::Unpaid);
        row.select(PaymentStatus::Paid).unwrap();

        let unpaid = row
            .options()
            .into_iter()
            .find(|o| o.value == PaymentStatus::Unpaid)
            .unwrap();
        assert!(unpaid.disabled);
        assert!(matches!(
            row.select(PaymentStatus::Unpaid),
            Err(DeskError::InvalidStatus { .. })
        ));
        assert_eq!(row.phase(), RowPhase::PendingConfirmation);
        assert_eq!(row.displayed(), PaymentStatus::Paid);

        row.cancel();
        assert_eq!(row.displayed(), PaymentStatus::Unpaid);
        assert!(row.options().iter().all(|o| !o.disabled));
    }

    #[test]
    fn test_already_paid_row_starts_locked() {
        let row = RowEditor::new("p2", PaymentStatus::Paid);
        assert_eq!(row.phase(), RowPhase::Locked);
        let options = row.options();
        assert!(options.iter().any(|o| o.value == PaymentStatus::Paid && o.selected));
    }

    #[test]
    fn test_unreachable_option_is_disabled_and_rejected() {
        use shared::models::OnlineStatus;
        let mut row = RowEditor::new("o1", OnlineStatus::Pending);
        let disabled: Vec<_> = row
            .options()
            .into_iter()
            .filter(|o| o.disabled)
            .map(|o| o.value)
            .collect();
        assert_eq!(disabled, [OnlineStatus::Processing, OnlineStatus::Cancelled]);
        assert!(matches!(
            row.select(OnlineStatus::Cancelled),
            Err(DeskError::InvalidStatus { .. })
        ));
        row.select(OnlineStatus::Completed).unwrap();
        assert_eq!(row.phase(), RowPhase::PendingConfirmation);
    }
}
