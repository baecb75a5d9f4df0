//! Terminal implementations of the engine's collaborator seams.
//!
//! Confirmations go through `dialoguer`, notifications are colored lines
//! on stderr, and refresh requests are recorded for the command handler
//! to act on. Step failures are left to the command's exit error.

use std::io::{self, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use owo_colors::OwoColorize;
use tracing::{debug, warn};

use skymgr_core::{Confirmation, Dialogs, Notifier, OwningPage};

use crate::commands::util;
use crate::messages::text;

// ── Dialogs ──────────────────────────────────────────────────────────

pub struct TerminalDialogs {
    pub yes: bool,
    pub quiet: bool,
    pub color: bool,
}

impl Dialogs for TerminalDialogs {
    fn confirm(&self, text_key: &str) -> Box<dyn Confirmation> {
        Box::new(TerminalConfirmation {
            prompt: text(text_key).to_owned(),
            yes: self.yes,
            quiet: self.quiet,
            color: self.color,
        })
    }
}

struct TerminalConfirmation {
    prompt: String,
    yes: bool,
    quiet: bool,
    color: bool,
}

#[async_trait]
impl Confirmation for TerminalConfirmation {
    async fn accepted(&self) -> bool {
        if self.yes {
            return true;
        }
        if !io::stdin().is_terminal() {
            warn!(prompt = %self.prompt, "stdin is not a terminal, declining");
            eprintln!("{} (use --yes to confirm non-interactively)", self.prompt);
            return false;
        }

        let prompt = self.prompt.clone();
        match tokio::task::spawn_blocking(move || util::confirm(&prompt, false)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(err)) => {
                warn!(error = %err, "confirmation prompt failed");
                false
            }
            Err(err) => {
                warn!(error = %err, "confirmation prompt task failed");
                false
            }
        }
    }

    fn show_processing(&self) {
        if !self.quiet {
            let line = "Processing...";
            if self.color {
                eprintln!("{}", line.dimmed());
            } else {
                eprintln!("{line}");
            }
        }
    }

    // The failed step is reported once, by the command's exit error.
    fn show_done(&self, header_key: &str, message: &str) {
        debug!(header = text(header_key), message = text(message), "step failed");
    }

    fn close(&self) {
        debug!("confirmation closed");
    }
}

// ── Notifications ────────────────────────────────────────────────────

pub struct TerminalNotifier {
    pub quiet: bool,
    pub color: bool,
}

impl Notifier for TerminalNotifier {
    fn show_done(&self, key: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {}", "✓".green(), text(key));
        } else {
            eprintln!("✓ {}", text(key));
        }
    }

    fn show_error(&self, message: &str) {
        debug!(message = text(message), "step failed");
    }

    fn show_warning(&self, key: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {}", "!".yellow(), text(key));
        } else {
            eprintln!("! {}", text(key));
        }
    }
}

// ── Owning page ──────────────────────────────────────────────────────

/// The visor being managed. Refresh requests are latched until taken.
pub struct CliPage {
    visor: String,
    refresh_requested: AtomicBool,
}

impl CliPage {
    pub fn new(visor: String) -> Self {
        Self {
            visor,
            refresh_requested: AtomicBool::new(false),
        }
    }

    /// Whether a refresh was requested since the last call.
    pub fn take_refresh(&self) -> bool {
        self.refresh_requested.swap(false, Ordering::SeqCst)
    }
}

impl OwningPage for CliPage {
    fn refresh_displayed_data(&self) {
        debug!(visor = %self.visor, "refresh requested");
        self.refresh_requested.store(true, Ordering::SeqCst);
    }

    fn current_device_key(&self) -> String {
        self.visor.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_request_is_latched_once() {
        let page = CliPage::new("02abc".into());
        assert!(!page.take_refresh());
        page.refresh_displayed_data();
        assert!(page.take_refresh());
        assert!(!page.take_refresh());
        assert_eq!(page.current_device_key(), "02abc");
    }

    #[tokio::test]
    async fn yes_flag_accepts_without_prompting() {
        let dialogs = TerminalDialogs {
            yes: true,
            quiet: true,
            color: false,
        };
        assert!(dialogs.confirm("apps.stop-confirmation").accepted().await);
    }
}
