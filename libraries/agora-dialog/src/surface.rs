//! Dialog surfaces: where a dialog is actually presented.

use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use tokio::sync::oneshot;
use tracing::debug;

/// The kind of dialog being presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Informational, single dismiss action
    Alert,
    /// Yes/no question
    Confirm,
    /// Free-text input with a prefilled default
    Prompt,
}

/// Everything a surface needs to render one dialog.
#[derive(Debug, Clone)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    /// Prefilled input value, only meaningful for prompts
    pub default_value: String,
}

/// How the user left the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DialogOutcome {
    /// Positive action; carries the input value for prompts
    Confirmed(Option<String>),
    /// Negative action: cancel button, close icon, outside click
    Canceled,
}

/// Single-use resolver handed to the surface alongside each request.
///
/// Dropping the responder without calling any method counts as
/// cancellation, so a surface that dies mid-dialog never leaves the
/// caller pending forever.
#[derive(Debug)]
pub struct DialogResponder {
    tx: Option<oneshot::Sender<DialogOutcome>>,
}

impl DialogResponder {
    /// The user confirmed (OK button, Enter).
    pub fn confirm(mut self) {
        self.resolve(DialogOutcome::Confirmed(None));
    }

    /// The user confirmed a prompt with a value.
    pub fn submit(mut self, value: impl Into<String>) {
        self.resolve(DialogOutcome::Confirmed(Some(value.into())));
    }

    /// The user dismissed the dialog.
    pub fn cancel(mut self) {
        self.resolve(DialogOutcome::Canceled);
    }

    fn resolve(&mut self, outcome: DialogOutcome) {
        if let Some(tx) = self.tx.take() {
            // The only receive side is the controller; if it is gone the
            // dialog result has no audience left.
            if tx.send(outcome).is_err() {
                debug!("Dialog resolved after the caller went away");
            }
        }
    }
}

pub(crate) fn responder_channel() -> (DialogResponder, oneshot::Receiver<DialogOutcome>) {
    let (tx, rx) = oneshot::channel();
    (DialogResponder { tx: Some(tx) }, rx)
}

/// A place dialogs can be shown: a desktop window, a TUI layer, a test
/// script. Presenting must not block on the user; the resolution travels
/// through the responder whenever it arrives.
#[async_trait]
pub trait DialogSurface: Send + Sync {
    /// Present a dialog. The surface may return before the user responds.
    async fn present(&self, request: DialogRequest, responder: DialogResponder);
}

/// Fallback surface for hosts with no non-blocking dialog capability.
///
/// Degrades to line-oriented stdin/stdout prompts, resolving before
/// `present` returns, with the same value contract as any other surface.
pub struct BlockingTerminalSurface;

#[async_trait]
impl DialogSurface for BlockingTerminalSurface {
    async fn present(&self, request: DialogRequest, responder: DialogResponder) {
        let outcome = tokio::task::spawn_blocking(move || run_terminal_dialog(&request)).await;

        match outcome {
            Ok(DialogOutcome::Confirmed(Some(value))) => responder.submit(value),
            Ok(DialogOutcome::Confirmed(None)) => responder.confirm(),
            Ok(DialogOutcome::Canceled) | Err(_) => responder.cancel(),
        }
    }
}

fn run_terminal_dialog(request: &DialogRequest) -> DialogOutcome {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match request.kind {
        DialogKind::Alert => {
            let _ = writeln!(out, "{}: {}", request.title, request.message);
            let _ = write!(out, "Press Enter to continue ");
            let _ = out.flush();
            let _ = read_line();
            // An alert has no negative outcome.
            DialogOutcome::Confirmed(None)
        }
        DialogKind::Confirm => {
            let _ = write!(out, "{}: {} [y/N] ", request.title, request.message);
            let _ = out.flush();
            match read_line() {
                Some(line) => {
                    let answer = line.trim();
                    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
                        DialogOutcome::Confirmed(None)
                    } else {
                        DialogOutcome::Canceled
                    }
                }
                None => DialogOutcome::Canceled,
            }
        }
        DialogKind::Prompt => {
            let _ = writeln!(out, "{}: {}", request.title, request.message);
            if request.default_value.is_empty() {
                let _ = write!(out, "> ");
            } else {
                let _ = write!(out, "[{}] > ", request.default_value);
            }
            let _ = out.flush();
            match read_line() {
                Some(line) => {
                    let value = line.trim_end_matches(['\r', '\n']);
                    if value.is_empty() {
                        DialogOutcome::Confirmed(Some(request.default_value.clone()))
                    } else {
                        DialogOutcome::Confirmed(Some(value.to_string()))
                    }
                }
                None => DialogOutcome::Canceled,
            }
        }
    }
}

/// One line from stdin; `None` on EOF or read failure.
fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
