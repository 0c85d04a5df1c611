use dioxus::prelude::*;
use shared_types::{
    submit_display_name, AppError, InFlight, Notification, NotificationKind, Notifier,
    SubmitOutcome, DISPLAY_NAME_MAX_CHARS,
};
use shared_ui::{
    use_toast, Button, ButtonVariant, DialogContent, DialogDescription, DialogRoot, DialogTitle,
    Form, Input, ToastOptions, Toasts,
};

use crate::session::use_session;

/// Routes profile-edit notifications to the toast stack.
struct ToastNotifier(Toasts);

impl Notifier for ToastNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => self.0.success(notification.message, ToastOptions::new()),
            NotificationKind::Failure => self.0.error(notification.message, ToastOptions::new()),
        }
    }
}

/// The dialog's `saving` signal as the driver's in-flight guard.
struct SavingSignal(Signal<bool>);

impl InFlight for SavingSignal {
    fn is_set(&self) -> bool {
        *self.0.peek()
    }

    fn set(&mut self, value: bool) {
        self.0.set(value);
    }
}

/// Modal for changing the signed-in user's display name.
///
/// Stays open on failure so the user can retry; closes itself on success.
#[component]
pub fn ProfileEditDialog(open: Signal<bool>) -> Element {
    let mut open = open;
    let mut session = use_session();
    let toast = use_toast();
    let mut draft = use_signal(String::new);
    let saving = use_signal(|| false);

    // Reset the field to the saved name each time the dialog opens.
    use_effect(move || {
        if open() {
            let saved = session.session().map(|s| s.display_name).unwrap_or_default();
            draft.set(saved);
        }
    });

    let handle_submit = move |_: FormEvent| async move {
        let current = session.session();
        let text = draft.peek().clone();
        let mut notifier = ToastNotifier(toast);
        let mut in_flight = SavingSignal(saving);

        let outcome = submit_display_name(
            current.as_ref(),
            &text,
            &mut in_flight,
            &mut notifier,
            |request| async move {
                server::api::update_display_name(request)
                    .await
                    .map_err(|e| AppError::from_server_fn_message(&e.to_string()))
            },
            move || open.set(false),
        )
        .await;

        if let SubmitOutcome::Saved(profile) = outcome {
            session.set_display_name(profile.display_name.unwrap_or_default());
        }
    };

    let is_saving = saving();
    let blank = draft.read().trim().is_empty();

    rsx! {
        DialogRoot {
            open: open(),
            on_open_change: move |value: bool| {
                if !saving() {
                    open.set(value);
                }
            },
            DialogContent {
                DialogTitle { "Edit profile" }
                DialogDescription { "This is the name other members see on the site." }
                Form { onsubmit: handle_submit,
                    Input {
                        label: "Display name",
                        value: draft(),
                        placeholder: "Up to {DISPLAY_NAME_MAX_CHARS} characters",
                        disabled: is_saving,
                        on_input: move |e: FormEvent| draft.set(e.value()),
                    }
                    div { class: "dialog-actions",
                        Button {
                            variant: ButtonVariant::Ghost,
                            disabled: is_saving,
                            onclick: move |_| open.set(false),
                            "Cancel"
                        }
                        Button {
                            submit: true,
                            variant: ButtonVariant::Primary,
                            disabled: is_saving || blank,
                            if is_saving { "Saving..." } else { "Save" }
                        }
                    }
                }
            }
        }
    }
}
