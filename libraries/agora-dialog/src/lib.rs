//! Agora Dialog
//!
//! Promise-style replacement for native blocking dialogs. A
//! [`DialogController`] presents confirm/alert/prompt dialogs on a shared
//! [`DialogSurface`] — one at a time — and resolves each invocation with a
//! deferred result instead of halting the caller.
//!
//! Dismissal convention (fixed here, since the two historical variants of
//! this component disagreed): confirm resolves `false`, prompt resolves
//! `None`, and a dismissed alert counts as confirmed.
//!
//! Hosts without a real dialog surface can fall back to
//! [`BlockingTerminalSurface`], which degrades to stdin/stdout prompts
//! with the same value contract.
//!
//! # Example
//!
//! ```ignore
//! use agora_dialog::DialogController;
//!
//! let dialogs = DialogController::blocking();
//! if dialogs.confirm("Delete this post?").await {
//!     // destructive action confirmed
//! }
//! ```

mod controller;
mod surface;

pub use controller::{DialogController, DialogState};
pub use surface::{
    BlockingTerminalSurface, DialogKind, DialogRequest, DialogResponder, DialogSurface,
};
