use tracing::debug;

use picker_core::alias::AliasIndex;
use picker_core::font::FontProbe;
use picker_core::mru::MruList;
use picker_core::settings::Settings;

use super::PickerSession;

impl PickerSession {
    /// Show the picker with freshly loaded settings, aliases and MRU.
    ///
    /// The disabled set is evaluated over the whole catalog here, once, and
    /// reused for every keystroke until the next enable. The view mode
    /// survives from the previous session; the query does not.
    pub fn enable(
        &mut self,
        settings: Settings,
        aliases: AliasIndex,
        mru: MruList,
        probe: &dyn FontProbe,
    ) {
        self.disabled = settings
            .filter_policy()
            .disabled_codes(&self.catalog, probe);
        self.settings = settings;
        self.aliases = aliases;
        self.mru = mru;
        self.search.clear();
        self.search_selected = false;
        self.visible = true;
        self.disabling = false;
        self.rebuild();
        debug!(
            mode = ?self.mode,
            disabled = self.disabled.len(),
            mru = self.mru.len(),
            "picker enabled"
        );
    }

    /// Start hiding the picker. Returns the MRU to persist, or `None` when the
    /// picker is already hidden or a disable is still in progress.
    pub fn begin_disable(&mut self) -> Option<MruList> {
        if !self.visible || self.disabling {
            return None;
        }
        self.visible = false;
        self.disabling = true;
        debug!("picker disabling");
        Some(self.mru.clone())
    }

    pub fn finish_disable(&mut self) {
        self.disabling = false;
    }

    pub fn is_disabling(&self) -> bool {
        self.disabling
    }
}
