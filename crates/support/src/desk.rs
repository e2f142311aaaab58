//! Modal dialogs and the submit flow of the support form.
//!
//! The desk only tracks state. The DOM layer mirrors it after every
//! transition through the observer passed to [`run_submission`].

use std::cell::RefCell;

use crate::config::SupportConfig;
use crate::error::{SendError, SubmitError};
use crate::ticket::Ticket;
use crate::transport::{SupportEmail, SupportRequest, SupportTransport};

/// Which dialog, if any, is on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    SupportForm,
    Response,
}

/// Identifies a dialog for close buttons and backdrop clicks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModalKind {
    Support,
    Response,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    /// Submit control disabled and showing its loading label.
    Sending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Response dialog shown; the form fields should be cleared.
    Delivered(Ticket),
    /// Support form still open with its fields intact.
    Failed(SendError),
}

#[derive(Debug, Clone)]
pub struct SupportDesk {
    config: SupportConfig,
    modal: Modal,
    submit: SubmitState,
    last_ticket: Option<Ticket>,
}

impl SupportDesk {
    pub fn new(config: SupportConfig) -> Self {
        Self {
            config,
            modal: Modal::Closed,
            submit: SubmitState::Idle,
            last_ticket: None,
        }
    }

    pub fn config(&self) -> &SupportConfig {
        &self.config
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit == SubmitState::Idle
    }

    /// Ticket of the most recent successful send, shown in the response dialog.
    pub fn last_ticket(&self) -> Option<&Ticket> {
        self.last_ticket.as_ref()
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        matches!(
            (self.modal, kind),
            (Modal::SupportForm, ModalKind::Support) | (Modal::Response, ModalKind::Response)
        )
    }

    pub fn open_support(&mut self) {
        self.modal = Modal::SupportForm;
    }

    /// Closes `kind` if it is the dialog on screen; otherwise a no-op.
    pub fn close(&mut self, kind: ModalKind) {
        if self.is_open(kind) {
            self.modal = Modal::Closed;
        }
    }

    /// A click that landed on the dialog's backdrop rather than its content.
    pub fn click_backdrop(&mut self, kind: ModalKind) {
        self.close(kind);
    }

    /// Enters the loading state and composes the outbound message.
    pub fn begin_submit(&mut self, request: &SupportRequest) -> Result<SupportEmail, SubmitError> {
        if self.submit == SubmitState::Sending {
            return Err(SubmitError::SendInFlight);
        }
        if self.modal != Modal::SupportForm {
            return Err(SubmitError::FormClosed);
        }
        self.submit = SubmitState::Sending;
        Ok(SupportEmail::compose(&self.config, request))
    }

    /// Applies the transport result. The submit control is restored on
    /// every path.
    pub fn finish_submit(&mut self, sent: Result<Ticket, SendError>) -> SubmitOutcome {
        self.submit = SubmitState::Idle;
        match sent {
            Ok(ticket) => {
                self.last_ticket = Some(ticket.clone());
                self.modal = Modal::Response;
                SubmitOutcome::Delivered(ticket)
            }
            Err(err) => {
                log::warn!("{err}");
                SubmitOutcome::Failed(err)
            }
        }
    }
}

/// Drives one submission end to end. `observe` runs after entering the
/// loading state and again after the result is applied.
pub async fn run_submission<T, F>(
    desk: &RefCell<SupportDesk>,
    transport: &T,
    request: SupportRequest,
    observe: F,
) -> Result<SubmitOutcome, SubmitError>
where
    T: SupportTransport,
    F: Fn(&SupportDesk),
{
    let email = desk.borrow_mut().begin_submit(&request)?;
    observe(&*desk.borrow());

    let sent = transport.send(&email).await;

    let outcome = desk.borrow_mut().finish_submit(sent);
    observe(&*desk.borrow());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Instant;

    impl SupportTransport for Instant {
        async fn send(&self, _email: &SupportEmail) -> Result<Ticket, SendError> {
            Ok(Ticket {
                id: "TKT-ABC-1234".to_string(),
                issued_at_ms: 1,
            })
        }
    }

    struct Broken;

    impl SupportTransport for Broken {
        async fn send(&self, _email: &SupportEmail) -> Result<Ticket, SendError> {
            Err(SendError::Transport("offline".to_string()))
        }
    }

    /// Records (modal, submit state) after each observed transition.
    fn record(
        desk: &RefCell<SupportDesk>,
        transport: &impl SupportTransport,
    ) -> (Result<SubmitOutcome, SubmitError>, Vec<(Modal, SubmitState)>) {
        let seen = RefCell::new(Vec::new());
        let out = pollster::block_on(run_submission(
            desk,
            transport,
            SupportRequest::default(),
            |d: &SupportDesk| seen.borrow_mut().push((d.modal(), d.submit_state())),
        ));
        (out, seen.into_inner())
    }

    fn open_desk() -> RefCell<SupportDesk> {
        let mut desk = SupportDesk::new(SupportConfig::default());
        desk.open_support();
        RefCell::new(desk)
    }

    #[test]
    fn modal_flow_open_close() {
        let mut desk = SupportDesk::new(SupportConfig::default());
        assert_eq!(desk.modal(), Modal::Closed);
        desk.open_support();
        assert!(desk.is_open(ModalKind::Support));

        // Closing the other dialog does nothing.
        desk.close(ModalKind::Response);
        assert_eq!(desk.modal(), Modal::SupportForm);

        desk.click_backdrop(ModalKind::Support);
        assert_eq!(desk.modal(), Modal::Closed);
    }

    #[test]
    fn success_passes_through_loading_to_response() {
        let desk = open_desk();
        let (out, seen) = record(&desk, &Instant);

        assert_eq!(
            seen,
            vec![
                (Modal::SupportForm, SubmitState::Sending),
                (Modal::Response, SubmitState::Idle),
            ]
        );
        let ticket = match out {
            Ok(SubmitOutcome::Delivered(t)) => t,
            other => panic!("unexpected outcome {other:?}"),
        };
        let desk = desk.borrow();
        assert_eq!(desk.last_ticket(), Some(&ticket));
        assert!(desk.is_submit_enabled());
        assert!(!desk.is_open(ModalKind::Support));
    }

    #[test]
    fn failure_keeps_form_open_and_reenables_submit() {
        let desk = open_desk();
        let (out, seen) = record(&desk, &Broken);

        assert_eq!(
            out,
            Ok(SubmitOutcome::Failed(SendError::Transport("offline".to_string())))
        );
        assert_eq!(seen.last(), Some(&(Modal::SupportForm, SubmitState::Idle)));
        assert!(desk.borrow().is_submit_enabled());
        assert_eq!(desk.borrow().last_ticket(), None);
    }

    #[test]
    fn submit_rejected_when_form_closed() {
        let desk = RefCell::new(SupportDesk::new(SupportConfig::default()));
        let (out, seen) = record(&desk, &Instant);
        assert_eq!(out, Err(SubmitError::FormClosed));
        assert!(seen.is_empty());
    }

    #[test]
    fn second_submit_while_sending_is_rejected() {
        let mut desk = SupportDesk::new(SupportConfig::default());
        desk.open_support();
        desk.begin_submit(&SupportRequest::default()).unwrap();
        assert_eq!(
            desk.begin_submit(&SupportRequest::default()),
            Err(SubmitError::SendInFlight)
        );
        assert!(!desk.is_submit_enabled());
    }

    #[test]
    fn response_dialog_closes_back_to_idle() {
        let desk = open_desk();
        record(&desk, &Instant).0.unwrap();
        let mut desk = desk.into_inner();
        desk.close(ModalKind::Response);
        assert_eq!(desk.modal(), Modal::Closed);
        assert_eq!(desk.submit_state(), SubmitState::Idle);
    }
}
