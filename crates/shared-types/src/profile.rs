//! Display-name editor: the request DTO and the submit driver shared by the
//! dashboard dialog and its tests.

use crate::{AppError, Profile, Session};
use serde::{Deserialize, Serialize};
use std::future::Future;

pub const DISPLAY_NAME_MAX_CHARS: usize = 80;

/// Body of the profile update server function.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct UpdateProfileRequest {
    #[cfg_attr(
        feature = "validation",
        validate(custom(function = "validate_display_name"))
    )]
    pub display_name: String,
}

impl UpdateProfileRequest {
    /// Build a request from a form draft, or `None` when the draft is blank.
    pub fn from_draft(draft: &str) -> Option<Self> {
        let trimmed = draft.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            display_name: trimmed.to_string(),
        })
    }
}

#[cfg(feature = "validation")]
pub fn validate_display_name(value: &str) -> Result<(), validator::ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(validator::ValidationError::new("required")
            .with_message("Display name is required".into()));
    }
    if trimmed.chars().count() > DISPLAY_NAME_MAX_CHARS {
        return Err(validator::ValidationError::new("length")
            .with_message("Display name must be at most 80 characters".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications (toasts in the app).
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Single in-flight guard for a form.
pub trait InFlight {
    fn is_set(&self) -> bool;
    fn set(&mut self, value: bool);
}

impl InFlight for bool {
    fn is_set(&self) -> bool {
        *self
    }

    fn set(&mut self, value: bool) {
        *self = value;
    }
}

pub const PROFILE_SAVED_MESSAGE: &str = "Profile updated";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing was dispatched: no session, a blank draft, or a write already in flight.
    Skipped,
    Saved(Profile),
    Failed(AppError),
}

/// Drive one submit of the display-name form.
///
/// On success the notifier gets one success notification and `on_close` runs
/// once. On failure the notifier gets the error's message and `on_close` is
/// not called. `saving` is set for the duration of the write and cleared
/// afterwards either way.
pub async fn submit_display_name<S, N, W, Fut, C>(
    session: Option<&Session>,
    draft: &str,
    saving: &mut S,
    notifier: &mut N,
    write: W,
    on_close: C,
) -> SubmitOutcome
where
    S: InFlight,
    N: Notifier,
    W: FnOnce(UpdateProfileRequest) -> Fut,
    Fut: Future<Output = Result<Profile, AppError>>,
    C: FnOnce(),
{
    if session.is_none() || saving.is_set() {
        return SubmitOutcome::Skipped;
    }
    let Some(request) = UpdateProfileRequest::from_draft(draft) else {
        return SubmitOutcome::Skipped;
    };

    saving.set(true);
    let result = write(request).await;
    saving.set(false);

    match result {
        Ok(profile) => {
            notifier.notify(Notification::success(PROFILE_SAVED_MESSAGE));
            on_close();
            SubmitOutcome::Saved(profile)
        }
        Err(err) => {
            notifier.notify(Notification::failure(err.message.clone()));
            SubmitOutcome::Failed(err)
        }
    }
}
