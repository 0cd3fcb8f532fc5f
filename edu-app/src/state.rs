//! Status messages shown by the page views.
//!
//! Every recoverable failure a view handles ends up here instead of in a
//! panic or a silently wrong number.

use edu_core::ErrorClass;
use edu_core::flow::FlowError;

/// Shown when cart totals cannot be computed.
pub const TOTAL_UNAVAILABLE: &str = "unable to compute total";
/// Shown when the stored profile cannot be read.
pub const PROFILE_REENTRY: &str = "프로필 정보를 다시 입력해주세요.";

/// How a status message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Blocking notice for the user to acknowledge.
    Notification,
    /// Failure the user cannot fix by retrying the same input.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: MessageType,
    pub text: String,
}

impl StatusMessage {
    pub fn notification(text: impl Into<String>) -> Self {
        Self {
            kind: MessageType::Notification,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageType::Error,
            text: text.into(),
        }
    }

    /// Validation failures become notifications; everything else is an error.
    pub fn from_flow_error(err: &FlowError) -> Self {
        match err.class() {
            ErrorClass::Validation => Self::notification(err.user_message()),
            _ => Self::error(err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pass_required_is_a_notification() {
        let msg = StatusMessage::from_flow_error(&FlowError::PassRequired);

        assert_eq!(msg, StatusMessage::notification("패스를 선택해주세요."));
    }

    #[test]
    fn unmapped_pass_is_an_error() {
        let msg = StatusMessage::from_flow_error(&FlowError::UnmappedPass(9));

        assert_eq!(msg.kind, MessageType::Error);
        assert_eq!(msg.text, "해당 패스에 맞는 서비스를 찾을 수 없습니다.");
    }
}
