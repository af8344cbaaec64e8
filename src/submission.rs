use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::transport::TransportError;
use crate::validation::{validate, Field, FieldError};

/// Success and error banners remove themselves after this long.
pub const BANNER_TTL_MS: u32 = 3_000;

pub const SUBMIT_LABEL: &str = "Send";
pub const SENDING_LABEL: &str = "Sending...";

const SUCCESS_TEXT: &str = "Your message was sent successfully. Thank you!";
const FAILURE_TEXT: &str = "Sending failed. Please try again in a little while.";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn class(self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u32,
    pub kind: BannerKind,
    pub text: &'static str,
}

/// When a freshly pushed banner should be taken down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerExpiry {
    pub id: u32,
    pub after_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<FieldError>),
}

/// Everything the contact form knows between events: current values, at most
/// one inline error per field, where the submit flow is, and which banners are
/// on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<Field, String>,
    errors: BTreeMap<Field, FieldError>,
    phase: SubmissionPhase,
    banners: Vec<Banner>,
    next_banner_id: u32,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Input event: store the value and drop any error optimistically.
    pub fn set_value(&mut self, field: Field, value: String) {
        self.values.insert(field, value);
        self.errors.remove(&field);
    }

    /// Blur event: validate one field, replacing whatever error it had.
    pub fn blur(&mut self, field: Field) -> bool {
        match validate(field, self.value(field)) {
            Ok(()) => {
                self.errors.remove(&field);
                true
            }
            Err(err) => {
                self.errors.insert(field, err);
                false
            }
        }
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// The submit control is disabled exactly while a send is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SENDING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    /// Revalidates every field. On success the form moves to `Submitting`
    /// and hands back the payload for the transport.
    pub fn begin_submit(&mut self) -> Result<ContactPayload, SubmitRejected> {
        if self.is_submitting() {
            return Err(SubmitRejected::InFlight);
        }

        self.phase = SubmissionPhase::Validating;
        let mut failures = Vec::new();
        for field in Field::ALL {
            if !self.blur(field) {
                if let Some(err) = self.error(field) {
                    failures.push(err.clone());
                }
            }
        }

        if !failures.is_empty() {
            self.phase = SubmissionPhase::Idle;
            return Err(SubmitRejected::Invalid(failures));
        }

        self.phase = SubmissionPhase::Submitting;
        Ok(ContactPayload {
            name: self.value(Field::Name).trim().to_string(),
            email: self.value(Field::Email).trim().to_string(),
            message: self.value(Field::Message).trim().to_string(),
        })
    }

    /// Settles a send and says when the banner reporting it expires.
    pub fn finish_submit(&mut self, outcome: Result<(), TransportError>) -> BannerExpiry {
        self.phase = SubmissionPhase::Idle;
        let id = match outcome {
            Ok(()) => {
                self.values.clear();
                self.errors.clear();
                self.push_banner(BannerKind::Success, SUCCESS_TEXT)
            }
            Err(_) => self.push_banner(BannerKind::Error, FAILURE_TEXT),
        };
        BannerExpiry { id, after_ms: BANNER_TTL_MS }
    }

    pub fn dismiss_banner(&mut self, id: u32) -> bool {
        let before = self.banners.len();
        self.banners.retain(|banner| banner.id != id);
        self.banners.len() != before
    }

    fn push_banner(&mut self, kind: BannerKind, text: &'static str) -> u32 {
        let id = self.next_banner_id;
        self.next_banner_id = self.next_banner_id.wrapping_add(1);
        self.banners.push(Banner { id, kind, text });
        id
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;

    use super::*;
    use crate::transport::ContactTransport;

    struct RecordingTransport<'a> {
        calls: Cell<usize>,
        form: &'a RefCell<FormState>,
        outcome: Result<(), TransportError>,
    }

    impl ContactTransport for RecordingTransport<'_> {
        async fn send(&self, _payload: &ContactPayload) -> Result<(), TransportError> {
            self.calls.set(self.calls.get() + 1);
            assert!(self.form.borrow().is_submitting(), "control must be disabled during send");
            self.outcome.clone()
        }
    }

    // Same sequence the component runs: validate, send, settle.
    fn submit(form: &RefCell<FormState>, transport: &RecordingTransport<'_>) -> Result<BannerExpiry, SubmitRejected> {
        let payload = form.borrow_mut().begin_submit()?;
        let outcome = block_on(transport.send(&payload));
        Ok(form.borrow_mut().finish_submit(outcome))
    }

    fn filled() -> FormState {
        let mut state = FormState::new();
        state.set_value(Field::Name, "Mio".into());
        state.set_value(Field::Email, "mio@example.com".into());
        state.set_value(Field::Message, "Hello there".into());
        state
    }

    #[test]
    fn empty_form_never_reaches_transport() {
        let form = RefCell::new(FormState::new());
        let transport = RecordingTransport { calls: Cell::new(0), form: &form, outcome: Ok(()) };

        let err = submit(&form, &transport).unwrap_err();

        assert_eq!(transport.calls.get(), 0);
        assert_eq!(
            err,
            SubmitRejected::Invalid(vec![
                FieldError::Required(Field::Name),
                FieldError::Required(Field::Email),
                FieldError::Required(Field::Message),
            ])
        );
        assert_eq!(form.borrow().error_count(), 3);
        assert_eq!(form.borrow().phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn one_error_per_invalid_field_even_after_repeated_attempts() {
        let mut state = filled();
        state.set_value(Field::Email, "not an email".into());
        assert!(state.begin_submit().is_err());
        assert!(state.begin_submit().is_err());
        state.blur(Field::Email);

        assert_eq!(state.error_count(), 1);
        assert_eq!(state.error(Field::Email), Some(&FieldError::InvalidEmail));
    }

    #[test]
    fn successful_send_resets_and_shows_one_success_banner() {
        let form = RefCell::new(filled());
        let transport = RecordingTransport { calls: Cell::new(0), form: &form, outcome: Ok(()) };

        let expiry = submit(&form, &transport).unwrap();

        let state = form.borrow();
        assert_eq!(transport.calls.get(), 1);
        assert!(!state.is_submitting());
        assert_eq!(state.submit_label(), SUBMIT_LABEL);
        assert_eq!(state.banners().len(), 1);
        assert_eq!(state.banners()[0].id, expiry.id);
        assert_eq!(expiry.after_ms, 3_000);
        assert_eq!(state.banners()[0].kind, BannerKind::Success);
        for field in Field::ALL {
            assert_eq!(state.value(field), "");
        }
    }

    #[test]
    fn failed_send_keeps_values_and_shows_error_banner() {
        let form = RefCell::new(filled());
        let transport = RecordingTransport {
            calls: Cell::new(0),
            form: &form,
            outcome: Err(TransportError::Status(500)),
        };

        submit(&form, &transport).unwrap();

        let state = form.borrow();
        assert_eq!(state.phase(), SubmissionPhase::Idle);
        assert_eq!(state.banners()[0].kind, BannerKind::Error);
        assert_eq!(state.value(Field::Name), "Mio");
    }

    #[test]
    fn second_submit_while_sending_is_refused() {
        let mut state = filled();
        state.begin_submit().unwrap();
        assert_eq!(state.submit_label(), SENDING_LABEL);
        assert_eq!(state.begin_submit(), Err(SubmitRejected::InFlight));
    }

    #[test]
    fn payload_is_trimmed() {
        let mut state = filled();
        state.set_value(Field::Name, "  Mio  ".into());
        let payload = state.begin_submit().unwrap();
        assert_eq!(payload.name, "Mio");
        assert_eq!(payload.email, "mio@example.com");
    }

    #[test]
    fn typing_clears_the_field_error() {
        let mut state = FormState::new();
        assert!(!state.blur(Field::Name));
        state.set_value(Field::Name, "M".into());
        assert_eq!(state.error(Field::Name), None);
    }

    #[test]
    fn banners_expire_individually() {
        let mut state = filled();
        state.begin_submit().unwrap();
        let first = state.finish_submit(Err(TransportError::Network("offline".into())));
        state.begin_submit().unwrap();
        let second = state.finish_submit(Ok(()));

        assert_eq!(first.after_ms, BANNER_TTL_MS);
        assert_eq!(second.after_ms, BANNER_TTL_MS);
        assert_ne!(first.id, second.id);

        assert!(state.dismiss_banner(first.id));
        assert!(!state.dismiss_banner(first.id));
        assert_eq!(state.banners().len(), 1);
        assert_eq!(state.banners()[0].id, second.id);
    }

    #[test]
    fn every_outcome_schedules_removal_after_three_seconds() {
        for outcome in [Ok(()), Err(TransportError::Status(503))] {
            let mut state = filled();
            state.begin_submit().unwrap();
            let expiry = state.finish_submit(outcome);
            assert_eq!(expiry, BannerExpiry { id: state.banners()[0].id, after_ms: 3_000 });
            assert_eq!(state.phase(), SubmissionPhase::Idle);
            assert!(state.dismiss_banner(expiry.id));
            assert!(state.banners().is_empty());
        }
    }
}
