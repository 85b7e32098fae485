use std::ffi::c_void;

use super::{commit_fn, ffi_guard, PickerCommitCallback, PickerEngine};

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn picker_ibus_enable(
    engine: *const PickerEngine,
    commit: PickerCommitCallback,
    context: *mut c_void,
) {
    ffi_guard!(();
        ref: engine = engine,
    );
    engine.ibus.enable(commit_fn(commit, context));
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn picker_ibus_disable(engine: *const PickerEngine) {
    ffi_guard!(();
        ref: engine = engine,
    );
    engine.ibus.disable();
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn picker_ibus_reset(engine: *const PickerEngine) {
    ffi_guard!(();
        ref: engine = engine,
    );
    engine.ibus.reset();
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn picker_ibus_set_cursor_location(
    engine: *const PickerEngine,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) {
    ffi_guard!(();
        ref: engine = engine,
    );
    engine.ibus.set_cursor_location(x, y, width, height);
}

/// Returns 1 when IBus should treat the key as handled.
#[no_mangle]
pub extern "C" fn picker_ibus_process_key_event(
    engine: *const PickerEngine,
    keyval: u32,
    keycode: u32,
    state: u32,
) -> u8 {
    ffi_guard!(0;
        ref: engine = engine,
    );
    engine.ibus.process_key_event(keyval, keycode, state) as u8
}
