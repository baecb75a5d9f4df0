use std::sync::Arc;

use tokio::sync::oneshot;

use crate::command::AppCommands;
use crate::command::batch::BatchOutcome;
use crate::lifecycle::OperationGroup;
use crate::list::view::ListView;
use crate::model::Application;

/// The app list of a visor page.
pub struct AppsPanel {
    view: ListView<Application>,
    commands: AppCommands,
    operations: OperationGroup,
}

impl AppsPanel {
    pub fn new(view: ListView<Application>, commands: AppCommands) -> Self {
        Self {
            view,
            commands,
            operations: OperationGroup::new(),
        }
    }

    pub fn view(&self) -> &ListView<Application> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<Application> {
        &mut self.view
    }

    pub fn commands(&self) -> &AppCommands {
        &self.commands
    }

    /// Start or stop the selected apps.
    pub fn change_state_of_selected(&mut self, start: bool) -> oneshot::Receiver<BatchOutcome> {
        let selected = self.view.selected_entities();
        let commands = self.commands.clone();
        self.operations.spawn(async move {
            commands.change_state_of_selected(&selected, start).await
        })
    }

    /// Enable or disable autostart on the selected apps.
    pub fn change_autostart_of_selected(
        &mut self,
        autostart: bool,
    ) -> oneshot::Receiver<BatchOutcome> {
        let selected = self.view.selected_entities();
        let commands = self.commands.clone();
        self.operations.spawn(async move {
            commands
                .change_autostart_of_selected(&selected, autostart)
                .await
        })
    }

    pub fn change_app_state(&mut self, app: Arc<Application>) -> oneshot::Receiver<BatchOutcome> {
        let commands = self.commands.clone();
        self.operations
            .spawn(async move { commands.change_app_state(&app).await })
    }

    pub fn change_app_autostart(
        &mut self,
        app: Arc<Application>,
    ) -> oneshot::Receiver<BatchOutcome> {
        let commands = self.commands.clone();
        self.operations
            .spawn(async move { commands.change_app_autostart(&app).await })
    }

    /// Release every operation this panel started.
    pub fn teardown(&mut self) {
        self.operations.release();
    }
}
