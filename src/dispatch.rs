//! GUI-thread consumer of the command queue.
//!
//! The dispatcher is the only owner of the `PickerSession`. It pops at most
//! one command per tick, runs it to completion, then renders.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, debug_span, warn};

use picker_core::alias::AliasIndex;
use picker_core::catalog::Catalog;
use picker_core::font::{FontProbe, WidthHeuristic};
use picker_core::key::RawKeyEvent;
use picker_core::mru::{MemoryMruStore, MruList, MruStore};
use picker_core::settings::{Settings, SettingsSource};
use picker_session::{EmojiAction, PickerResponse, PickerSession};

use crate::command::{Command, CommitFn, CursorRect};
use crate::frontend::Frontend;
use crate::queue::CommandQueue;

/// Called after the window hides, to hand input back to the previous input
/// method.
pub type ResetHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Poll interval while the picker is shown.
    pub active_poll: Duration,
    /// Poll interval while the loop is active but the picker is hidden.
    pub idle_poll: Duration,
    /// Pause after hiding, before the loop parks.
    pub disable_grace: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            active_poll: Duration::from_millis(4),
            idle_poll: Duration::from_millis(32),
            disable_grace: Duration::from_millis(10),
        }
    }
}

impl DispatchConfig {
    /// No sleeping anywhere. For tests driving `tick` by hand.
    pub fn immediate() -> Self {
        Self {
            active_poll: Duration::ZERO,
            idle_poll: Duration::ZERO,
            disable_grace: Duration::ZERO,
        }
    }
}

pub struct Dispatcher {
    queue: Arc<CommandQueue>,
    session: PickerSession,
    frontend: Box<dyn Frontend>,
    settings: Box<dyn SettingsSource>,
    mru_store: Box<dyn MruStore>,
    font: Box<dyn FontProbe + Send>,
    reset_hook: Option<ResetHook>,
    /// Commit target of the current enable.
    commit: Option<CommitFn>,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Dispatcher with default settings, an in-memory MRU and the width
    /// heuristic font probe.
    pub fn new(
        queue: Arc<CommandQueue>,
        catalog: Arc<Catalog>,
        frontend: Box<dyn Frontend>,
    ) -> Self {
        Self {
            queue,
            session: PickerSession::new(catalog),
            frontend,
            settings: Box::new(Settings::default()),
            mru_store: Box::new(MemoryMruStore::default()),
            font: Box::new(WidthHeuristic),
            reset_hook: None,
            commit: None,
            config: DispatchConfig::default(),
        }
    }

    pub fn with_settings_source(mut self, source: Box<dyn SettingsSource>) -> Self {
        self.settings = source;
        self
    }

    pub fn with_mru_store(mut self, store: Box<dyn MruStore>) -> Self {
        self.mru_store = store;
        self
    }

    pub fn with_font_probe(mut self, probe: Box<dyn FontProbe + Send>) -> Self {
        self.font = probe;
        self
    }

    pub fn with_reset_hook(mut self, hook: ResetHook) -> Self {
        self.reset_hook = Some(hook);
        self
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session(&self) -> &PickerSession {
        &self.session
    }

    pub fn queue(&self) -> &Arc<CommandQueue> {
        &self.queue
    }

    /// Process at most one queued command. Returns whether one was processed.
    pub fn tick(&mut self) -> bool {
        let Some(command) = self.queue.try_pop() else {
            return false;
        };
        self.execute(command);
        if self.session.is_visible() {
            self.frontend.render(&self.session.snapshot());
        }
        true
    }

    /// Tick until the queue is empty. Returns the number of commands run.
    pub fn drain(&mut self) -> usize {
        let mut n = 0;
        while self.tick() {
            n += 1;
        }
        n
    }

    /// Loop until the queue shuts down. Parks while inactive with nothing
    /// queued. Commands queued before shutdown still run, and a picker left
    /// open is closed so its MRU is saved.
    pub fn run(&mut self) {
        debug!("dispatch loop started");
        while self.queue.wait_for_work() {
            if self.tick() {
                continue;
            }
            if self.queue.is_shutdown() {
                break;
            }
            let interval = if self.session.is_visible() {
                self.config.active_poll
            } else {
                self.config.idle_poll
            };
            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        if self.session.is_visible() {
            self.disable();
        }
        debug!("dispatch loop stopped");
    }

    fn execute(&mut self, command: Command) {
        let _span = debug_span!("command", name = command.name()).entered();
        match command {
            Command::Enable {
                commit,
                reset_position,
            } => self.enable(commit, reset_position),
            Command::Disable | Command::Reset => self.disable(),
            Command::SetCursorLocation(rect) => self.set_cursor_location(rect),
            Command::ProcessKeyEvent { event, action } => self.process_key(&event, action),
        }
    }

    fn enable(&mut self, commit: CommitFn, reset_position: bool) {
        self.queue.set_active(true);
        let settings = self.settings.load();
        let aliases = AliasIndex::load(settings.alias_files());
        let mru = self.mru_store.load().unwrap_or_else(|e| {
            warn!(error = %e, "mru unreadable, starting empty");
            MruList::new()
        });
        self.commit = Some(commit);
        self.session
            .enable(settings, aliases, mru, self.font.as_ref());
        self.frontend.show(reset_position);
    }

    fn disable(&mut self) {
        let Some(mru) = self.session.begin_disable() else {
            debug!("disable ignored");
            return;
        };
        self.frontend.hide();
        if let Some(hook) = &self.reset_hook {
            hook();
        }
        if let Err(e) = self.mru_store.save(&mru) {
            warn!(error = %e, "mru save failed");
        }
        if !self.config.disable_grace.is_zero() {
            thread::sleep(self.config.disable_grace);
        }
        self.commit = None;
        self.session.finish_disable();
        self.queue.set_active(false);
    }

    fn set_cursor_location(&mut self, rect: CursorRect) {
        if rect.is_unknown() {
            return;
        }
        let (x, y) = rect.anchor(self.session.settings().scale_factor());
        self.frontend.move_to(x, y);
    }

    fn process_key(&mut self, event: &RawKeyEvent, action: Option<EmojiAction>) {
        let response = self.session.handle_key(event, action);
        self.apply_response(response);
    }

    fn apply_response(&mut self, response: PickerResponse) {
        if let Some(text) = &response.commit {
            match self.commit.as_mut() {
                Some(commit) => commit(text),
                None => warn!("commit with no target"),
            }
        }
        if let Some(text) = &response.clipboard {
            self.frontend.set_clipboard(text);
        }
        if response.open_settings {
            self.frontend.open_settings();
        }
        if response.close {
            self.disable();
        }
    }
}
