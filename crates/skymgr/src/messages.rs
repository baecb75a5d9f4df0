//! English text for the translation keys the engine emits.
//!
//! Keys without an entry are shown verbatim; the visor's own error
//! messages arrive that way.

pub fn text(key: &str) -> &str {
    match key {
        // ── Apps ─────────────────────────────────────────────────────
        "apps.stop-confirmation" => "Stop the app?",
        "apps.stop-selected-confirmation" => "Stop the selected apps?",
        "apps.enable-autostart-confirmation" => "Enable autostart for the app?",
        "apps.disable-autostart-confirmation" => "Disable autostart for the app?",
        "apps.enable-autostart-selected-confirmation" => {
            "Enable autostart for the selected apps?"
        }
        "apps.disable-autostart-selected-confirmation" => {
            "Disable autostart for the selected apps?"
        }
        "apps.operation-completed" => "Operation completed.",
        "apps.operation-unnecessary" => {
            "The selection already has the requested setting."
        }
        "apps.settings-saved" => "Settings saved.",
        "apps.apps-list.state" => "State",
        "apps.apps-list.app-name" => "Name",
        "apps.apps-list.port" => "Port",
        "apps.apps-list.auto-start" => "Autostart",

        // ── Transports ───────────────────────────────────────────────
        "transports.delete-confirmation" => "Delete the transport?",
        "transports.delete-selected-confirmation" => "Delete the selected transports?",
        "transports.deleted" => "Delete operation completed.",
        "transports.operation-unnecessary" => "No transports to delete.",
        "transports.state" => "State",
        "transports.id" => "ID",
        "transports.remote" => "Remote",
        "transports.type" => "Type",

        // ── Common ───────────────────────────────────────────────────
        "common.uploaded" => "Uploaded",
        "common.downloaded" => "Downloaded",
        "common.no-connection-error" => "There is no internet connection or connection to the hypervisor.",
        "common.operation-error" => "The operation could not be completed.",
        "confirmation.error-header-text" => "Error",

        other => other,
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use skymgr_core::{AppColumn, TransportColumn};

    use super::*;

    #[test]
    fn every_column_label_has_text() {
        for label in AppColumn::iter()
            .map(AppColumn::label)
            .chain(TransportColumn::iter().map(TransportColumn::label))
        {
            assert_ne!(text(label), label, "missing text for {label}");
        }
    }

    #[test]
    fn unknown_keys_pass_through() {
        assert_eq!(text("app not running"), "app not running");
    }
}
