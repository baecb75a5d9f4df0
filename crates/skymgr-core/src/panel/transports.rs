use tokio::sync::oneshot;

use crate::command::TransportCommands;
use crate::command::batch::BatchOutcome;
use crate::lifecycle::OperationGroup;
use crate::list::view::ListView;
use crate::model::Transport;

/// The transport list of a visor page.
pub struct TransportsPanel {
    view: ListView<Transport>,
    commands: TransportCommands,
    operations: OperationGroup,
}

impl TransportsPanel {
    pub fn new(view: ListView<Transport>, commands: TransportCommands) -> Self {
        Self {
            view,
            commands,
            operations: OperationGroup::new(),
        }
    }

    pub fn view(&self) -> &ListView<Transport> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<Transport> {
        &mut self.view
    }

    pub fn commands(&self) -> &TransportCommands {
        &self.commands
    }

    /// Delete the selected transports.
    pub fn delete_selected(&mut self) -> oneshot::Receiver<BatchOutcome> {
        let ids = self.view.selected_keys();
        let commands = self.commands.clone();
        self.operations
            .spawn(async move { commands.delete_selected(ids).await })
    }

    pub fn delete(&mut self, id: String) -> oneshot::Receiver<BatchOutcome> {
        let commands = self.commands.clone();
        self.operations
            .spawn(async move { commands.delete(&id).await })
    }

    pub fn teardown(&mut self) {
        self.operations.release();
    }
}
