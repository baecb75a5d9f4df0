// ── App commands ──
//
// Start/stop and autostart changes, for the selection or a single app,
// plus the settings of configurable apps.
// Bulk operations skip apps that already have the requested value.

use std::sync::Arc;

use super::StepFuture;
use super::batch::{BatchMessages, BatchOutcome, BatchSequencer};
use crate::error::CoreError;
use crate::model::{AppSettings, Application};

const MESSAGES: BatchMessages = BatchMessages {
    done_key: "apps.operation-completed",
    unnecessary_key: "apps.operation-unnecessary",
};

const SETTINGS_MESSAGES: BatchMessages = BatchMessages {
    done_key: "apps.settings-saved",
    unnecessary_key: "apps.operation-unnecessary",
};

/// Names of the apps whose run state would actually change.
pub fn state_targets(selected: &[Arc<Application>], start: bool) -> Vec<String> {
    selected
        .iter()
        .filter(|app| app.is_running() != start)
        .map(|app| app.name.clone())
        .collect()
}

/// Names of the apps whose autostart flag would actually change.
pub fn autostart_targets(selected: &[Arc<Application>], autostart: bool) -> Vec<String> {
    selected
        .iter()
        .filter(|app| app.autostart != autostart)
        .map(|app| app.name.clone())
        .collect()
}

#[derive(Clone)]
pub struct AppCommands {
    sequencer: BatchSequencer,
}

impl AppCommands {
    pub fn new(sequencer: BatchSequencer) -> Self {
        Self { sequencer }
    }

    pub fn sequencer(&self) -> &BatchSequencer {
        &self.sequencer
    }

    /// Start or stop every selected app that is not already in that state.
    /// Stopping asks for confirmation, starting does not.
    pub async fn change_state_of_selected(
        &self,
        selected: &[Arc<Application>],
        start: bool,
    ) -> BatchOutcome {
        let targets = state_targets(selected, start);
        let confirm = (!start).then_some("apps.stop-selected-confirmation");
        self.sequencer
            .confirm_and_run(confirm, targets, MESSAGES, self.run_state_step(start))
            .await
    }

    /// Enable or disable autostart on every selected app that differs.
    pub async fn change_autostart_of_selected(
        &self,
        selected: &[Arc<Application>],
        autostart: bool,
    ) -> BatchOutcome {
        let targets = autostart_targets(selected, autostart);
        let confirm = if autostart {
            "apps.enable-autostart-selected-confirmation"
        } else {
            "apps.disable-autostart-selected-confirmation"
        };
        self.sequencer
            .confirm_and_run(
                Some(confirm),
                targets,
                MESSAGES,
                self.autostart_step(autostart),
            )
            .await
    }

    /// Toggle the run state of one app.
    pub async fn change_app_state(&self, app: &Application) -> BatchOutcome {
        let start = !app.is_running();
        let confirm = (!start).then_some("apps.stop-confirmation");
        self.sequencer
            .confirm_and_run(
                confirm,
                vec![app.name.clone()],
                MESSAGES,
                self.run_state_step(start),
            )
            .await
    }

    /// Toggle the autostart flag of one app.
    pub async fn change_app_autostart(&self, app: &Application) -> BatchOutcome {
        let confirm = if app.autostart {
            "apps.disable-autostart-confirmation"
        } else {
            "apps.enable-autostart-confirmation"
        };
        self.sequencer
            .confirm_and_run(
                Some(confirm),
                vec![app.name.clone()],
                MESSAGES,
                self.autostart_step(!app.autostart),
            )
            .await
    }

    /// Save new settings for one configurable app.
    ///
    /// Fails without contacting the visor when the app has no editable
    /// settings or the settings belong to another app.
    pub async fn configure_app(
        &self,
        app: &Application,
        settings: AppSettings,
    ) -> Result<BatchOutcome, CoreError> {
        if !app.has_config() {
            return Err(CoreError::Validation {
                message: format!("'{}' has no editable settings", app.name),
            });
        }
        if !settings.applies_to(&app.name) {
            return Err(CoreError::Validation {
                message: format!("these settings do not apply to '{}'", app.name),
            });
        }

        let remote = Arc::clone(&self.sequencer.collaborators().remote);
        let page = Arc::clone(&self.sequencer.collaborators().page);
        let step = move |name: String| -> StepFuture {
            let remote = Arc::clone(&remote);
            let settings = settings.clone();
            let device = page.current_device_key();
            Box::pin(async move { remote.apply_settings(&device, &name, &settings).await })
        };
        Ok(self
            .sequencer
            .confirm_and_run(None, vec![app.name.clone()], SETTINGS_MESSAGES, step)
            .await)
    }

    fn run_state_step(&self, running: bool) -> impl FnMut(String) -> StepFuture + Send {
        let remote = Arc::clone(&self.sequencer.collaborators().remote);
        let page = Arc::clone(&self.sequencer.collaborators().page);
        move |name: String| -> StepFuture {
            let remote = Arc::clone(&remote);
            let device = page.current_device_key();
            Box::pin(async move { remote.set_run_state(&device, &name, running).await })
        }
    }

    fn autostart_step(&self, autostart: bool) -> impl FnMut(String) -> StepFuture + Send {
        let remote = Arc::clone(&self.sequencer.collaborators().remote);
        let page = Arc::clone(&self.sequencer.collaborators().page);
        move |name: String| -> StepFuture {
            let remote = Arc::clone(&remote);
            let device = page.current_device_key();
            Box::pin(async move { remote.set_autostart(&device, &name, autostart).await })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppStatus;

    fn app(name: &str, status: AppStatus, autostart: bool) -> Arc<Application> {
        Arc::new(Application {
            name: name.into(),
            status,
            autostart,
            port: 0,
        })
    }

    #[test]
    fn start_skips_running_apps() {
        let selected = [
            app("a", AppStatus::Running, false),
            app("b", AppStatus::Stopped, false),
            app("c", AppStatus::Errored, false),
        ];
        assert_eq!(state_targets(&selected, true), ["b", "c"]);
        assert_eq!(state_targets(&selected, false), ["a"]);
    }

    #[test]
    fn autostart_skips_apps_already_set() {
        let selected = [
            app("a", AppStatus::Running, true),
            app("b", AppStatus::Stopped, false),
        ];
        assert_eq!(autostart_targets(&selected, true), ["b"]);
        assert_eq!(autostart_targets(&selected, false), ["a"]);
    }
}
