//! The dialog controller: blocking-style dialogs without blocking.

use crate::surface::{
    responder_channel, DialogKind, DialogOutcome, DialogRequest, DialogSurface,
};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

const DEFAULT_CONFIRM_TITLE: &str = "Confirm";
const DEFAULT_ALERT_TITLE: &str = "Notice";
const DEFAULT_PROMPT_TITLE: &str = "Input";

/// Observable lifecycle of the shared dialog slot.
///
/// Resolution and cancellation are instantaneous transitions reported
/// through the returned value; between them the slot moves
/// `Idle -> Showing -> Closing -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// No dialog visible
    Idle,
    /// A dialog is on the surface, waiting for the user
    Showing,
    /// The outcome is decided and the dialog is being torn down
    Closing,
}

/// Presents confirm/alert/prompt dialogs through a [`DialogSurface`] and
/// resolves each invocation with a deferred result.
///
/// Exactly one dialog is visible at a time: the shared surface is reused
/// and later invocations wait for the current one to settle. Dismissal
/// follows a fixed convention — confirm resolves `false`, prompt resolves
/// `None`, and an alert counts as confirmed since it has no negative
/// outcome.
pub struct DialogController {
    surface: Arc<dyn DialogSurface>,
    /// Held while a dialog is visible; serializes invocations.
    visible: Mutex<()>,
    state: StdMutex<DialogState>,
}

impl DialogController {
    /// Create a controller over a surface.
    pub fn new(surface: Arc<dyn DialogSurface>) -> Self {
        Self {
            surface,
            visible: Mutex::new(()),
            state: StdMutex::new(DialogState::Idle),
        }
    }

    /// Controller over the blocking terminal fallback surface.
    pub fn blocking() -> Self {
        Self::new(Arc::new(crate::surface::BlockingTerminalSurface))
    }

    /// Current lifecycle state of the dialog slot.
    pub fn state(&self) -> DialogState {
        *self.state.lock().expect("dialog state lock poisoned")
    }

    /// Ask a yes/no question. Resolves `true` on confirm, `false` on any
    /// dismissal.
    pub async fn confirm(&self, message: &str) -> bool {
        self.confirm_titled(message, DEFAULT_CONFIRM_TITLE).await
    }

    /// [`confirm`](Self::confirm) with a custom title.
    pub async fn confirm_titled(&self, message: &str, title: &str) -> bool {
        let outcome = self
            .show(DialogKind::Confirm, title, message, String::new())
            .await;
        matches!(outcome, DialogOutcome::Confirmed(_))
    }

    /// Show a message; resolves when dismissed, however dismissed.
    pub async fn alert(&self, message: &str) {
        self.alert_titled(message, DEFAULT_ALERT_TITLE).await;
    }

    /// [`alert`](Self::alert) with a custom title.
    pub async fn alert_titled(&self, message: &str, title: &str) {
        // Cancellation is treated as confirmed; either way the alert is done.
        let _ = self
            .show(DialogKind::Alert, title, message, String::new())
            .await;
    }

    /// Ask for a line of text. Resolves the entered string on confirm and
    /// `None` on any dismissal.
    pub async fn prompt(&self, message: &str, default_value: &str) -> Option<String> {
        self.prompt_titled(message, default_value, DEFAULT_PROMPT_TITLE)
            .await
    }

    /// [`prompt`](Self::prompt) with a custom title.
    pub async fn prompt_titled(
        &self,
        message: &str,
        default_value: &str,
        title: &str,
    ) -> Option<String> {
        let outcome = self
            .show(DialogKind::Prompt, title, message, default_value.to_string())
            .await;
        match outcome {
            // A surface that confirms without an explicit value keeps the
            // prefilled default, like an untouched input field.
            DialogOutcome::Confirmed(value) => {
                Some(value.unwrap_or_else(|| default_value.to_string()))
            }
            DialogOutcome::Canceled => None,
        }
    }

    async fn show(
        &self,
        kind: DialogKind,
        title: &str,
        message: &str,
        default_value: String,
    ) -> DialogOutcome {
        let _visible = self.visible.lock().await;
        self.set_state(DialogState::Showing);

        let (responder, settled) = responder_channel();
        let request = DialogRequest {
            kind,
            title: title.to_string(),
            message: message.to_string(),
            default_value,
        };
        self.surface.present(request, responder).await;

        // A surface that dropped the responder without answering counts
        // as a dismissal; the deferred result always settles.
        let outcome = settled.await.unwrap_or(DialogOutcome::Canceled);

        self.set_state(DialogState::Closing);
        self.set_state(DialogState::Idle);
        outcome
    }

    fn set_state(&self, next: DialogState) {
        *self.state.lock().expect("dialog state lock poisoned") = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DialogResponder;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::time::Duration;

    /// What the scripted surface does with each dialog, in order.
    enum Script {
        Confirm,
        Submit(&'static str),
        Cancel,
        DropResponder,
    }

    struct ScriptedSurface {
        script: StdMutex<VecDeque<Script>>,
    }

    impl ScriptedSurface {
        fn new(steps: Vec<Script>) -> Arc<Self> {
            Arc::new(Self {
                script: StdMutex::new(steps.into()),
            })
        }
    }

    #[async_trait]
    impl DialogSurface for ScriptedSurface {
        async fn present(&self, _request: DialogRequest, responder: DialogResponder) {
            let step = self
                .script
                .lock()
                .expect("script lock")
                .pop_front()
                .expect("script exhausted");
            match step {
                Script::Confirm => responder.confirm(),
                Script::Submit(value) => responder.submit(value),
                Script::Cancel => responder.cancel(),
                Script::DropResponder => drop(responder),
            }
        }
    }

    #[tokio::test]
    async fn confirm_resolves_true_on_confirm_and_false_on_cancel() {
        let controller =
            DialogController::new(ScriptedSurface::new(vec![Script::Confirm, Script::Cancel]));

        assert!(controller.confirm("Delete this post?").await);
        assert!(!controller.confirm("Delete this post?").await);
    }

    #[tokio::test]
    async fn prompt_resolves_value_on_confirm_and_none_on_cancel() {
        let controller = DialogController::new(ScriptedSurface::new(vec![
            Script::Submit("edited text"),
            Script::Cancel,
        ]));

        assert_eq!(
            controller.prompt("Edit your comment.", "old").await,
            Some("edited text".to_string())
        );
        assert_eq!(controller.prompt("Edit your comment.", "old").await, None);
    }

    #[tokio::test]
    async fn prompt_keeps_default_when_confirmed_without_value() {
        let controller = DialogController::new(ScriptedSurface::new(vec![Script::Confirm]));

        assert_eq!(
            controller.prompt("Edit your comment.", "old").await,
            Some("old".to_string())
        );
    }

    #[tokio::test]
    async fn alert_resolves_even_when_dismissed() {
        let controller =
            DialogController::new(ScriptedSurface::new(vec![Script::Confirm, Script::Cancel]));

        controller.alert("Saved.").await;
        controller.alert("Saved.").await;
        assert_eq!(controller.state(), DialogState::Idle);
    }

    #[tokio::test]
    async fn dropped_responder_counts_as_cancel() {
        let controller =
            DialogController::new(ScriptedSurface::new(vec![Script::DropResponder]));

        assert!(!controller.confirm("Still there?").await);
        assert_eq!(controller.state(), DialogState::Idle);
    }

    /// Surface that parks responders so the test controls settlement.
    struct ParkingSurface {
        parked: StdMutex<Vec<DialogResponder>>,
    }

    #[async_trait]
    impl DialogSurface for ParkingSurface {
        async fn present(&self, _request: DialogRequest, responder: DialogResponder) {
            self.parked.lock().expect("parked lock").push(responder);
        }
    }

    #[tokio::test]
    async fn one_dialog_at_a_time() {
        let surface = Arc::new(ParkingSurface {
            parked: StdMutex::new(Vec::new()),
        });
        let controller = Arc::new(DialogController::new(
            Arc::clone(&surface) as Arc<dyn DialogSurface>
        ));

        let first = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.confirm("first").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(surface.parked.lock().expect("parked lock").len(), 1);
        assert_eq!(controller.state(), DialogState::Showing);

        let second = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.confirm("second").await })
        };

        // The second invocation waits; only one dialog is on the surface.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(surface.parked.lock().expect("parked lock").len(), 1);

        let parked = surface.parked.lock().expect("parked lock").remove(0);
        parked.confirm();
        assert!(first.await.expect("first dialog"));

        // Now the second one is allowed on the surface.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let parked = surface.parked.lock().expect("parked lock").remove(0);
        parked.cancel();
        assert!(!second.await.expect("second dialog"));

        assert_eq!(controller.state(), DialogState::Idle);
    }
}
