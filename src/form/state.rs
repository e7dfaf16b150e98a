use std::cell::{Cell, RefCell};

use super::{FormData, FormError, FormView, SubmissionTransport, SubmitError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Submitting,
    Success,
    Error(FormError),
}

/// Single-flight flag. Holding the guard marks a submission as pending.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: Cell<bool>,
}

pub struct InFlightGuard<'a> {
    flag: &'a InFlight,
}

impl InFlight {
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        if self.busy.replace(true) {
            return None;
        }
        Some(InFlightGuard { flag: self })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.busy.set(false);
    }
}

/// Drives one contact form through validation and submission.
pub struct ContactForm<T, V> {
    transport: T,
    view: V,
    state: RefCell<FormState>,
    in_flight: InFlight,
}

impl<T: SubmissionTransport, V: FormView> ContactForm<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self {
            transport,
            view,
            state: RefCell::new(FormState::Idle),
            in_flight: InFlight::default(),
        }
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    #[cfg(test)]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Runs one submit attempt and returns the state it ended in. A submit
    /// that arrives while another is pending is dropped and leaves the
    /// state untouched.
    pub async fn submit(&self, data: FormData) -> FormState {
        let Some(_guard) = self.in_flight.try_acquire() else {
            log::warn!("ignoring contact form submit while one is in flight");
            return self.state();
        };

        self.set_state(FormState::Validating);
        if let Err(err) = data.validate() {
            log::debug!("contact form rejected: {}", err);
            self.view.show_error(&err.to_string());
            return self.set_state(FormState::Error(err));
        }

        self.set_state(FormState::Submitting);
        self.view.enter_loading();

        let outcome = self.transport.submit(&data).await.and_then(|receipt| {
            if receipt.success {
                Ok(())
            } else {
                Err(SubmitError::Rejected("transport reported failure".to_string()))
            }
        });

        match outcome {
            Ok(()) => {
                self.view.show_success();
                self.set_state(FormState::Success)
            }
            Err(e) => {
                log::error!("Form submission error: {}", e);
                let err = FormError::from(e);
                self.view.show_error(&err.to_string());
                self.view.restore_button();
                self.set_state(FormState::Error(err))
            }
        }
    }

    fn set_state(&self, next: FormState) -> FormState {
        *self.state.borrow_mut() = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::transport::{MockSubmissionTransport, SubmitReceipt};
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum ViewCall {
        Error(String),
        Loading,
        Restore,
        Success,
    }

    #[derive(Default)]
    struct RecordingView {
        calls: RefCell<Vec<ViewCall>>,
    }

    impl RecordingView {
        fn calls(&self) -> Vec<ViewCall> {
            self.calls.borrow().clone()
        }
    }

    impl FormView for RecordingView {
        fn show_error(&self, message: &str) {
            self.calls.borrow_mut().push(ViewCall::Error(message.to_string()));
        }
        fn enter_loading(&self) {
            self.calls.borrow_mut().push(ViewCall::Loading);
        }
        fn restore_button(&self) {
            self.calls.borrow_mut().push(ViewCall::Restore);
        }
        fn show_success(&self) {
            self.calls.borrow_mut().push(ViewCall::Success);
        }
    }

    fn valid() -> FormData {
        FormData::new("Ola Nordmann", "ola@example.com", "12345678", "Need gravel work")
    }

    fn unused_transport() -> MockSubmissionTransport {
        let mut transport = MockSubmissionTransport::new();
        transport.expect_submit().never();
        transport
    }

    #[test]
    fn test_starts_idle() {
        let form = ContactForm::new(unused_transport(), RecordingView::default());
        assert_eq!(form.state(), FormState::Idle);
    }

    #[test]
    fn test_empty_description_rejected_before_loading() {
        let form = ContactForm::new(unused_transport(), RecordingView::default());
        let mut data = valid();
        data.description = String::new();

        let state = block_on(form.submit(data));

        assert_eq!(state, FormState::Error(FormError::MissingRequired));
        assert_eq!(
            form.view().calls(),
            vec![ViewCall::Error("Vennligst fyll ut alle obligatoriske felt.".to_string())]
        );
    }

    #[test]
    fn test_malformed_email_rejected_before_loading() {
        let form = ContactForm::new(unused_transport(), RecordingView::default());
        let mut data = valid();
        data.email = "not-an-email".to_string();

        let state = block_on(form.submit(data));

        assert_eq!(state, FormState::Error(FormError::InvalidEmail));
        assert_eq!(
            form.view().calls(),
            vec![ViewCall::Error("Vennligst oppgi en gyldig e-postadresse.".to_string())]
        );
    }

    #[test]
    fn test_valid_request_shows_success() {
        let mut transport = MockSubmissionTransport::new();
        transport
            .expect_submit()
            .withf(|data| data.name == "Ola Nordmann" && data.email == "ola@example.com")
            .times(1)
            .returning(|_| Ok(SubmitReceipt { success: true }));
        let form = ContactForm::new(transport, RecordingView::default());

        let state = block_on(form.submit(valid()));

        assert_eq!(state, FormState::Success);
        assert_eq!(form.view().calls(), vec![ViewCall::Loading, ViewCall::Success]);
    }

    #[test]
    fn test_transport_failure_restores_button() {
        let mut transport = MockSubmissionTransport::new();
        transport
            .expect_submit()
            .times(1)
            .returning(|_| Err(SubmitError::Transport("connection reset".to_string())));
        let form = ContactForm::new(transport, RecordingView::default());

        let state = block_on(form.submit(valid()));

        assert_eq!(
            state,
            FormState::Error(FormError::Submission(SubmitError::Transport(
                "connection reset".to_string()
            )))
        );
        assert_eq!(
            form.view().calls(),
            vec![
                ViewCall::Loading,
                ViewCall::Error(
                    "Det oppstod en feil. Vennligst prøv igjen eller ring oss direkte.".to_string()
                ),
                ViewCall::Restore,
            ]
        );
    }

    #[test]
    fn test_unsuccessful_receipt_is_an_error() {
        let mut transport = MockSubmissionTransport::new();
        transport
            .expect_submit()
            .times(1)
            .returning(|_| Ok(SubmitReceipt { success: false }));
        let form = ContactForm::new(transport, RecordingView::default());

        let state = block_on(form.submit(valid()));

        assert!(matches!(
            state,
            FormState::Error(FormError::Submission(SubmitError::Rejected(_)))
        ));
        assert_eq!(form.view().calls().last(), Some(&ViewCall::Restore));
    }

    #[test]
    fn test_retry_after_validation_error() {
        let mut transport = MockSubmissionTransport::new();
        transport
            .expect_submit()
            .times(1)
            .returning(|_| Ok(SubmitReceipt { success: true }));
        let form = ContactForm::new(transport, RecordingView::default());

        let mut bad = valid();
        bad.phone = String::new();
        block_on(form.submit(bad));
        let state = block_on(form.submit(valid()));

        assert_eq!(state, FormState::Success);
    }

    #[test]
    fn test_in_flight_guard_is_single_use() {
        let flag = InFlight::default();
        let guard = flag.try_acquire();
        assert!(guard.is_some());
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert!(flag.try_acquire().is_some());
    }

    /// Transport that stays pending until the test releases it.
    struct GatedTransport {
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl SubmissionTransport for GatedTransport {
        async fn submit(&self, _data: &FormData) -> Result<SubmitReceipt, SubmitError> {
            self.calls.set(self.calls.get() + 1);
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(SubmitReceipt { success: true })
        }
    }

    #[test]
    fn test_second_submit_while_pending_is_ignored() {
        let (release, gate) = oneshot::channel();
        let transport = GatedTransport {
            gate: RefCell::new(Some(gate)),
            calls: Cell::new(0),
        };
        let form = Rc::new(ContactForm::new(transport, RecordingView::default()));

        let mut pool = LocalPool::new();
        let first = form.clone();
        pool.spawner()
            .spawn_local(async move {
                first.submit(valid()).await;
            })
            .unwrap();
        pool.run_until_stalled();
        assert_eq!(form.state(), FormState::Submitting);

        let state = block_on(form.submit(valid()));
        assert_eq!(state, FormState::Submitting);
        assert_eq!(form.transport.calls.get(), 1);

        release.send(()).unwrap();
        pool.run();
        assert_eq!(form.state(), FormState::Success);
        assert_eq!(form.view().calls(), vec![ViewCall::Loading, ViewCall::Success]);
    }
}
