//! Call lifecycle translation
//!
//! Maps an engine call-status transition into the consumer's callback
//! vocabulary. The same mapping serves both the terminal response to an
//! in-flight initiate/drop request and unsolicited status changes on an
//! already-established call.
//!
//! Terminal statuses fold in the auxiliary context accumulated from
//! `CallPstnStatus` and `CallFailureReason` events: a `Finished` with a
//! nonzero PSTN code is reported as a PSTN-side failure, and a `Failed`
//! carries the decoded failure reason.

use tracing::warn;

use crate::engine::CallStatus;
use crate::events::{CallEndKind, CallbackEvent};
use crate::failure;

/// Failure detail gathered ahead of a terminal call status.
///
/// Cleared when a new initiate-call request is accepted, written by the
/// auxiliary events that precede (or accompany) the terminal status, and
/// read when that status is translated.
#[derive(Debug, Default)]
pub struct CallFailureContext {
    pub pstn_code: u32,
    pub pstn_message: String,
    pub failure_code: u32,
    pub failure_message: String,
}

impl CallFailureContext {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record the PSTN leg status for the upcoming terminal event.
    pub fn record_pstn(&mut self, code: u32, message: String) {
        self.pstn_code = code;
        self.pstn_message = message;
    }

    /// Record and decode an engine failure reason code.
    pub fn record_failure(&mut self, code: u32) {
        self.failure_code = code;
        self.failure_message = failure::decode(code).to_string();
    }
}

/// Translate a call-status transition into a consumer notification.
///
/// Returns `None` for engine statuses the adapter does not surface
/// (holds, early media, missed/busy); those are logged and dropped.
pub fn translate(
    call_id: u32,
    status: CallStatus,
    context: &CallFailureContext,
) -> Option<CallbackEvent> {
    match status {
        CallStatus::Routing => Some(CallbackEvent::Dial { call_id }),
        CallStatus::Ringing => Some(CallbackEvent::Ring { call_id }),
        CallStatus::InProgress => Some(CallbackEvent::Connected { call_id }),
        CallStatus::Cancelled => Some(CallbackEvent::CallEnd {
            call_id,
            kind: CallEndKind::Cancelled,
            code: 0,
            descr: String::new(),
        }),
        CallStatus::None => Some(CallbackEvent::CallEnd {
            call_id,
            kind: CallEndKind::None,
            code: 0,
            descr: String::new(),
        }),
        CallStatus::Finished if context.pstn_code != 0 => Some(CallbackEvent::CallEnd {
            call_id,
            kind: CallEndKind::FailedPstn,
            code: context.pstn_code,
            descr: context.pstn_message.clone(),
        }),
        CallStatus::Finished => Some(CallbackEvent::CallEnd {
            call_id,
            kind: CallEndKind::Finished,
            code: 0,
            descr: String::new(),
        }),
        CallStatus::Failed => Some(CallbackEvent::CallEnd {
            call_id,
            kind: CallEndKind::Failed,
            code: context.failure_code,
            descr: context.failure_message.clone(),
        }),
        CallStatus::Refused => Some(CallbackEvent::CallEnd {
            call_id,
            kind: CallEndKind::Refused,
            code: 0,
            descr: String::new(),
        }),
        other => {
            warn!("call {}: unhandled status {:?}", call_id, other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CallFailureContext {
        CallFailureContext::default()
    }

    #[test]
    fn progress_statuses_map_to_lifecycle_events() {
        assert_eq!(
            translate(42, CallStatus::Routing, &ctx()),
            Some(CallbackEvent::Dial { call_id: 42 })
        );
        assert_eq!(
            translate(42, CallStatus::Ringing, &ctx()),
            Some(CallbackEvent::Ring { call_id: 42 })
        );
        assert_eq!(
            translate(42, CallStatus::InProgress, &ctx()),
            Some(CallbackEvent::Connected { call_id: 42 })
        );
    }

    #[test]
    fn finished_without_pstn_failure_is_a_clean_end() {
        assert_eq!(
            translate(7, CallStatus::Finished, &ctx()),
            Some(CallbackEvent::CallEnd {
                call_id: 7,
                kind: CallEndKind::Finished,
                code: 0,
                descr: String::new(),
            })
        );
    }

    #[test]
    fn finished_with_pstn_code_reports_pstn_failure() {
        let mut context = ctx();
        context.record_pstn(503, "service unavailable".to_string());
        assert_eq!(
            translate(7, CallStatus::Finished, &context),
            Some(CallbackEvent::CallEnd {
                call_id: 7,
                kind: CallEndKind::FailedPstn,
                code: 503,
                descr: "service unavailable".to_string(),
            })
        );
    }

    #[test]
    fn failed_carries_decoded_failure_reason() {
        let mut context = ctx();
        context.record_failure(2);
        let event = translate(7, CallStatus::Failed, &context).unwrap();
        match event {
            CallbackEvent::CallEnd {
                call_id,
                kind,
                code,
                descr,
            } => {
                assert_eq!(call_id, 7);
                assert_eq!(kind, CallEndKind::Failed);
                assert_eq!(code, 2);
                assert!(descr.starts_with("User or phone number does not exist"));
            }
            other => panic!("expected CallEnd, got {:?}", other),
        }
    }

    #[test]
    fn cancelled_none_and_refused_are_terminal() {
        for (status, kind) in [
            (CallStatus::Cancelled, CallEndKind::Cancelled),
            (CallStatus::None, CallEndKind::None),
            (CallStatus::Refused, CallEndKind::Refused),
        ] {
            match translate(1, status, &ctx()) {
                Some(CallbackEvent::CallEnd { kind: got, .. }) => assert_eq!(got, kind),
                other => panic!("status {:?}: expected CallEnd, got {:?}", status, other),
            }
        }
    }

    #[test]
    fn unlisted_statuses_emit_nothing() {
        for status in [
            CallStatus::EarlyMedia,
            CallStatus::LocalHold,
            CallStatus::RemoteHold,
            CallStatus::Missed,
            CallStatus::Busy,
        ] {
            assert_eq!(translate(1, status, &ctx()), None);
        }
    }

    #[test]
    fn clear_resets_both_code_pairs() {
        let mut context = ctx();
        context.record_pstn(1, "x".to_string());
        context.record_failure(3);
        context.clear();
        assert_eq!(context.pstn_code, 0);
        assert_eq!(context.failure_code, 0);
        assert!(context.pstn_message.is_empty());
        assert!(context.failure_message.is_empty());
    }
}
