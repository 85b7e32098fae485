//! Process-wide engine: the command queue plus the GUI thread that drains it.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use picker_core::catalog::Catalog;
use picker_core::mru::FileMruStore;
use picker_core::settings::{FileSettings, SettingsSource};

use crate::dispatch::{DispatchConfig, Dispatcher, ResetHook};
use crate::frontend::Frontend;
use crate::host::HostLink;
use crate::queue::CommandQueue;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine already started")]
    AlreadyStarted,
    #[error("failed to spawn gui thread: {0}")]
    Spawn(#[from] io::Error),
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub settings_path: PathBuf,
    pub mru_path: PathBuf,
    pub dispatch: DispatchConfig,
}

impl EngineConfig {
    pub fn new(settings_path: impl Into<PathBuf>, mru_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            mru_path: mru_path.into(),
            dispatch: DispatchConfig::default(),
        }
    }
}

pub struct Engine {
    config: EngineConfig,
    settings: FileSettings,
    link: HostLink,
    gui: Option<JoinHandle<()>>,
}

impl Engine {
    /// Prepare the queue and the host link without starting the GUI thread.
    ///
    /// Settings are read once here for the hot-key table; the dispatcher
    /// re-reads them on every enable.
    pub fn new(config: EngineConfig) -> Self {
        let settings = FileSettings::new(&config.settings_path);
        if let Err(e) = settings.write_defaults_if_missing() {
            warn!(path = %config.settings_path.display(), error = %e, "could not write default settings");
        }
        let hotkeys = settings.load().hotkeys().clone();
        let link = HostLink::new(Arc::new(CommandQueue::new()), hotkeys);
        Self {
            config,
            settings,
            link,
            gui: None,
        }
    }

    /// `new` followed by `start`.
    pub fn spawn<F>(
        catalog: Arc<Catalog>,
        config: EngineConfig,
        reset_hook: Option<ResetHook>,
        frontend: F,
    ) -> Result<Self, EngineError>
    where
        F: FnOnce() -> Box<dyn Frontend> + Send + 'static,
    {
        let mut engine = Self::new(config);
        engine.start(catalog, reset_hook, frontend)?;
        Ok(engine)
    }

    /// Start the GUI thread. The frontend factory runs on that thread, so
    /// toolkit windows are created where they will live.
    pub fn start<F>(
        &mut self,
        catalog: Arc<Catalog>,
        reset_hook: Option<ResetHook>,
        frontend: F,
    ) -> Result<(), EngineError>
    where
        F: FnOnce() -> Box<dyn Frontend> + Send + 'static,
    {
        if self.gui.is_some() {
            return Err(EngineError::AlreadyStarted);
        }
        let queue = Arc::clone(self.link.queue());
        let settings = self.settings.clone();
        let mru = FileMruStore::new(&self.config.mru_path);
        let dispatch = self.config.dispatch;
        let gui = thread::Builder::new()
            .name("picker-gui".into())
            .spawn(move || {
                let mut dispatcher = Dispatcher::new(queue, catalog, frontend())
                    .with_settings_source(Box::new(settings))
                    .with_mru_store(Box::new(mru))
                    .with_config(dispatch);
                if let Some(hook) = reset_hook {
                    dispatcher = dispatcher.with_reset_hook(hook);
                }
                dispatcher.run();
            })?;
        self.gui = Some(gui);
        debug!("engine started");
        Ok(())
    }

    /// Producer handle for host adapters.
    pub fn link(&self) -> &HostLink {
        &self.link
    }

    pub fn is_running(&self) -> bool {
        self.gui.is_some()
    }

    /// Wake the GUI thread, let it finish the current command, and join it.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.link.queue().shutdown();
        if let Some(gui) = self.gui.take() {
            if gui.join().is_err() {
                warn!("gui thread panicked");
            }
            debug!("engine stopped");
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}
