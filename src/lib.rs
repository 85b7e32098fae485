// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

//! Picker engine: the command queue between input-method hosts and the GUI
//! thread, the dispatcher that drives a `PickerSession`, host adapters for
//! IBus and Fcitx5, and the C ABI those hosts link against.

pub mod command;
pub mod dispatch;
pub mod engine;
pub mod frontend;
pub mod host;
pub mod queue;
pub mod trace_init;

mod ffi;

pub use command::{Command, CommitFn, CursorRect};
pub use dispatch::{DispatchConfig, Dispatcher, ResetHook};
pub use engine::{Engine, EngineConfig, EngineError};
pub use ffi::*;
pub use frontend::{Frontend, NullFrontend};
pub use host::{FcitxModule, HostLink, IbusEngine, KeyOutcome};
pub use queue::CommandQueue;
pub use trace_init::init_tracing;
