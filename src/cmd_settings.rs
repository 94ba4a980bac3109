//! Settings subcommand handlers.

use replykit::settings::{SETTING_KEYS, SettingsError, SettingsStore};

use crate::cli::SettingsAction;

/// Handle settings subcommands.
pub(crate) fn handle_settings_command(
    action: SettingsAction,
    mut store: SettingsStore,
) -> Result<(), SettingsError> {
    match action {
        SettingsAction::Show => {
            let settings = store.load()?;
            println!("# {}", store.path().display());
            for line in settings.display_lines() {
                println!("{line}");
            }
        }
        SettingsAction::Set { key, value } => {
            let mut settings = store.load()?;
            settings.set_field(&key, &value)?;
            store.save(&settings)?;
            log::info!("Updated `{}` in {}", key, store.path().display());
            println!("Updated {key}");
        }
        SettingsAction::Reset => {
            store.reset()?;
            println!("Settings reset to defaults");
        }
        SettingsAction::Path => println!("{}", store.path().display()),
        SettingsAction::Keys => {
            for key in SETTING_KEYS {
                println!("{key}");
            }
        }
    }
    Ok(())
}
