//! Settings manager: shallow patch merge plus the theme fast path.

use std::sync::Arc;

use parley_types::{SettingsPatch, Theme};
use tracing::{debug, warn};

use crate::store::Store;

/// Presentation-layer callback run synchronously whenever the theme changes
pub type ThemeHook = Arc<dyn Fn(Theme) + Send + Sync>;

impl Store {
    /// Merge `patch` into the settings. Only supplied keys overwrite; values
    /// are not range-checked.
    ///
    /// A theme change is written to the fast-path slot and handed to the theme
    /// hook before this returns, independent of the snapshot cycle.
    pub fn update_settings(&self, patch: SettingsPatch) {
        if patch.is_empty() {
            return;
        }

        let new_theme = self
            .modify(|state| Some(state.settings.apply(patch)))
            .flatten();

        if let Some(theme) = new_theme {
            debug!(%theme, "Theme changed");
            self.persist_theme(theme);
            self.apply_theme(theme);
        }
    }

    /// Flip between light and dark, returning the new theme
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.read(|s| s.settings.theme.toggled());
        self.update_settings(SettingsPatch::new().theme(theme));
        theme
    }

    pub(crate) fn apply_theme(&self, theme: Theme) {
        if let Some(hook) = &self.inner.theme_hook {
            hook(theme);
        }
    }

    pub(crate) fn persist_theme(&self, theme: Theme) {
        if let Some(snapshots) = &self.inner.snapshots {
            if let Err(e) = snapshots.save_theme(theme) {
                warn!("Failed to write theme: {}", e);
            }
        }
    }
}
