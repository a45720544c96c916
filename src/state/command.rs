//! One-shot commands for the presentation layer.

use crate::model::ServerStatus;

/// Side effects the presentation layer must perform, carried out of band
/// from the state stream so they fire exactly once per triggering
/// operation instead of replaying on every re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Close the add-server dialog after a successful save.
    CloseAddServerDialog,
    /// Reset the add-server form, preselecting the given status.
    ResetServerForm { status: ServerStatus },
}
