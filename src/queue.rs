//! FIFO command queue shared by host threads and the GUI thread.
//!
//! One mutex guards the commands and the scheduler flags. Producers never
//! block beyond that lock; the consumer polls with `try_pop` while active and
//! parks in `wait_for_work` while inactive with nothing queued.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

use crate::command::Command;

#[derive(Default)]
struct QueueState {
    commands: VecDeque<Command>,
    active: bool,
    shutdown: bool,
}

#[derive(Default)]
pub struct CommandQueue {
    state: Mutex<QueueState>,
    wake: Condvar,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // Commands are plain data; a panic elsewhere leaves them usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, command: Command) {
        let mut state = self.lock();
        state.commands.push_back(command);
        drop(state);
        self.wake.notify_one();
    }

    /// Push and mark the loop active in one step, so the consumer cannot park
    /// between the two.
    pub fn push_activating(&self, command: Command) {
        let mut state = self.lock();
        state.commands.push_back(command);
        state.active = true;
        drop(state);
        self.wake.notify_one();
    }

    pub fn try_pop(&self) -> Option<Command> {
        self.lock().commands.pop_front()
    }

    pub fn set_active(&self, active: bool) {
        self.lock().active = active;
        self.wake.notify_one();
    }

    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    pub fn shutdown(&self) {
        self.lock().shutdown = true;
        self.wake.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.lock().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().commands.is_empty()
    }

    /// Park while inactive with an empty queue. Returns `false` once shut down
    /// and drained; commands pushed before `shutdown` are still handed out.
    pub fn wait_for_work(&self) -> bool {
        let state = self.lock();
        let state = self
            .wake
            .wait_while(state, |s| !s.shutdown && !s.active && s.commands.is_empty())
            .unwrap_or_else(|e| e.into_inner());
        !state.shutdown || !state.commands.is_empty()
    }

    /// Like `wait_for_work` but gives up after `timeout`. Returns whether
    /// there is work (or activity) to poll for.
    pub fn wait_for_work_timeout(&self, timeout: Duration) -> bool {
        let state = self.lock();
        let (state, _) = self
            .wake
            .wait_timeout_while(state, timeout, |s| {
                !s.shutdown && !s.active && s.commands.is_empty()
            })
            .unwrap_or_else(|e| e.into_inner());
        !state.commands.is_empty() || (!state.shutdown && state.active)
    }
}
