//! C ABI for host plugins: engine start/stop plus the IBus and Fcitx5 entry
//! points. Handles are boxed and returned as raw pointers; every entry point
//! tolerates NULL.

use std::ffi::{c_char, c_void, CStr, CString};
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use picker_core::catalog::Catalog;

use crate::command::CommitFn;

pub mod engine;
pub mod fcitx;
pub mod ibus;


pub use engine::*;
pub use fcitx::*;
pub use ibus::*;

/// Borrow a host string argument. `None` for NULL or invalid UTF-8.
pub(crate) unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Interior NULs cannot cross the boundary; such strings become empty.
pub(crate) fn to_cstring(s: &str) -> CString {
    CString::new(s).unwrap_or_default()
}

/// Bind checked entry-point arguments, returning `$on_err` from the caller on
/// a NULL handle or a NULL / non-UTF-8 string.
///
/// ```ignore
/// ffi_guard!(0;
///     ref: fcitx = fcitx,
///     str: name = name,
/// );
/// ```
macro_rules! ffi_guard {
    ($on_err:expr ; ) => {};

    ($on_err:expr ; str: $name:ident = $ptr:expr , $($rest:tt)*) => {
        let Some($name) = (unsafe { $crate::ffi::str_arg($ptr) }) else {
            return $on_err;
        };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };

    ($on_err:expr ; ref: $name:ident = $ptr:expr , $($rest:tt)*) => {
        if $ptr.is_null() {
            return $on_err;
        }
        let $name = unsafe { &*$ptr };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };
}

/// Define the `extern "C"` stop function for a handle returned by a start
/// function. Dropping the handle joins the GUI thread. NULL is ignored.
macro_rules! ffi_close {
    ($fn_name:ident, $T:ty) => {
        #[no_mangle]
        pub extern "C" fn $fn_name(handle: *mut $T) {
            if !handle.is_null() {
                drop(unsafe { Box::from_raw(handle) });
            }
        }
    };
}

pub(crate) use ffi_close;
pub(crate) use ffi_guard;

/// Host callback receiving committed text. `context` is passed back verbatim.
pub type PickerCommitCallback = Option<extern "C" fn(context: *mut c_void, text: *const c_char)>;

/// Opaque host pointer carried into a callback running on the GUI thread.
#[derive(Clone, Copy)]
pub(crate) struct HostPtr(pub(crate) *mut c_void);

// The host guarantees the pointee outlives the engine and tolerates calls
// from the GUI thread.
unsafe impl Send for HostPtr {}
unsafe impl Sync for HostPtr {}

impl HostPtr {
    pub(crate) fn get(self) -> *mut c_void {
        self.0
    }
}

/// Wrap a C commit callback. A null callback makes commits no-ops.
pub(crate) fn commit_fn(callback: PickerCommitCallback, context: *mut c_void) -> CommitFn {
    let context = HostPtr(context);
    Box::new(move |text: &str| {
        if let Some(cb) = callback {
            let text = to_cstring(text);
            cb(context.get(), text.as_ptr());
        }
    })
}

/// Read and parse a catalog file. Errors are logged and become `None`.
pub(crate) fn load_catalog(path: &str) -> Option<Arc<Catalog>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path, error = %e, "catalog unreadable");
            return None;
        }
    };
    match Catalog::from_toml_str(&content) {
        Ok(catalog) => Some(Arc::new(catalog)),
        Err(e) => {
            warn!(path, error = %e, "catalog invalid");
            None
        }
    }
}

// --- Top-level FFI functions ---

#[no_mangle]
pub extern "C" fn picker_engine_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn picker_trace_init(log_dir: *const c_char) {
    ffi_guard!(();
        str: dir_str = log_dir,
    );
    crate::trace_init::init_tracing(Path::new(dir_str));
}
