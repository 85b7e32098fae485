use std::ffi::{c_char, c_void};
use std::ptr;
use std::sync::Arc;

use super::engine::frontend_factory;
use super::{
    commit_fn, ffi_close, ffi_guard, load_catalog, PickerCommitCallback,
    PickerFrontendVtable,
};
use crate::command::CursorRect;
use crate::engine::{Engine, EngineConfig};
use crate::host::fcitx::{FcitxKey, FcitxModule};

/// Bit set in `picker_fcitx_key_event`'s result when the key was consumed.
pub const PICKER_KEY_CONSUMED: u32 = 1 << 0;
/// Bit set when the host should send a fresh cursor location.
pub const PICKER_KEY_REFRESH_CURSOR: u32 = 1 << 1;

/// Opaque handle owning the engine and the module whose reset hook it calls.
pub struct PickerFcitx {
    // Dropped first so the GUI thread stops before the module goes away.
    _engine: Engine,
    module: Arc<FcitxModule>,
}

/// Start an engine wired to a Fcitx5 module. Hiding the picker deactivates
/// the module. Returns NULL on invalid paths or an unloadable catalog.
#[no_mangle]
pub extern "C" fn picker_fcitx_start(
    catalog_path: *const c_char,
    settings_path: *const c_char,
    mru_path: *const c_char,
    frontend: PickerFrontendVtable,
) -> *mut PickerFcitx {
    ffi_guard!(ptr::null_mut();
        str: catalog_path = catalog_path,
        str: settings_path = settings_path,
        str: mru_path = mru_path,
    );
    let Some(catalog) = load_catalog(catalog_path) else {
        return ptr::null_mut();
    };
    let mut engine = Engine::new(EngineConfig::new(settings_path, mru_path));
    let module = Arc::new(FcitxModule::new(engine.link().clone()));
    if let Err(e) = engine.start(catalog, Some(module.reset_hook()), frontend_factory(frontend)) {
        tracing::warn!(error = %e, "engine start failed");
        return ptr::null_mut();
    }
    Box::into_raw(Box::new(PickerFcitx {
        _engine: engine,
        module,
    }))
}

ffi_close!(picker_fcitx_stop, PickerFcitx);

/// Returns 1 if the module became active, 0 if it already was.
#[no_mangle]
pub extern "C" fn picker_fcitx_activate(
    fcitx: *const PickerFcitx,
    commit: PickerCommitCallback,
    context: *mut c_void,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) -> u8 {
    ffi_guard!(0;
        ref: fcitx = fcitx,
    );
    let cursor = CursorRect::new(x, y, width, height);
    fcitx.module.activate(commit_fn(commit, context), cursor) as u8
}

/// Returns 1 if the module was active.
#[no_mangle]
pub extern "C" fn picker_fcitx_deactivate(fcitx: *const PickerFcitx) -> u8 {
    ffi_guard!(0;
        ref: fcitx = fcitx,
    );
    fcitx.module.deactivate() as u8
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn picker_fcitx_reset(fcitx: *const PickerFcitx) {
    ffi_guard!(();
        ref: fcitx = fcitx,
    );
    fcitx.module.reset();
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn picker_fcitx_set_cursor_location(
    fcitx: *const PickerFcitx,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) {
    ffi_guard!(();
        ref: fcitx = fcitx,
    );
    fcitx
        .module
        .set_cursor_location(CursorRect::new(x, y, width, height));
}

/// Returns a combination of `PICKER_KEY_CONSUMED` and
/// `PICKER_KEY_REFRESH_CURSOR`.
#[no_mangle]
pub extern "C" fn picker_fcitx_key_event(
    fcitx: *const PickerFcitx,
    code: u32,
    states: u32,
    name: *const c_char,
    is_modifier: u8,
    release: u8,
) -> u32 {
    ffi_guard!(0;
        ref: fcitx = fcitx,
        str: name = name,
    );
    let outcome = fcitx.module.key_event(&FcitxKey {
        code,
        states,
        name,
        is_modifier: is_modifier != 0,
        release: release != 0,
    });
    let mut bits = 0;
    if outcome.consumed {
        bits |= PICKER_KEY_CONSUMED;
    }
    if outcome.refresh_cursor {
        bits |= PICKER_KEY_REFRESH_CURSOR;
    }
    bits
}

#[cfg(test)]
impl PickerFcitx {
    pub(crate) fn module(&self) -> &FcitxModule {
        &self.module
    }
}
