use std::ffi::{c_char, c_void, CString};
use std::ptr;

use picker_session::{ViewItem, ViewSnapshot};

use super::{ffi_close, ffi_guard, load_catalog, to_cstring, HostPtr};
use crate::dispatch::ResetHook;
use crate::engine::{Engine, EngineConfig};
use crate::frontend::Frontend;
use crate::host::IbusEngine;

// --- View snapshot ---

#[repr(C)]
pub struct PickerViewItem {
    pub text: *const c_char,
    pub name: *const c_char,
    pub row: u32,
    pub column: u32,
    pub span: u32,
    pub shown: u8,
    pub selected: u8,
}

/// Borrowed by the render callback; valid only for the duration of the call.
#[repr(C)]
pub struct PickerView {
    pub visible: u8,
    /// 0 = MRU, 1 = list, 2 = kaomoji.
    pub mode: u8,
    pub search: *const c_char,
    pub search_selected: u8,
    /// NULL when there is no completion.
    pub completion: *const c_char,
    /// Character offset of the query inside `completion`.
    pub completion_offset: u32,
    pub items: *const PickerViewItem,
    pub items_len: u32,
}

fn pack_item(item: &ViewItem, strings: &mut Vec<CString>) -> PickerViewItem {
    let text = to_cstring(&item.text);
    let name = to_cstring(&item.name);
    let packed = PickerViewItem {
        text: text.as_ptr(),
        name: name.as_ptr(),
        row: item.row as u32,
        column: item.column as u32,
        span: item.span as u32,
        shown: item.shown as u8,
        selected: item.selected as u8,
    };
    strings.push(text);
    strings.push(name);
    packed
}

/// Hand a packed snapshot to `f`. The strings and the item array are freed
/// when `f` returns.
pub(crate) fn with_packed_view<R>(view: &ViewSnapshot, f: impl FnOnce(&PickerView) -> R) -> R {
    let mut strings = Vec::with_capacity(view.items.len() * 2);
    let items: Vec<PickerViewItem> = view
        .items
        .iter()
        .map(|item| pack_item(item, &mut strings))
        .collect();

    let search = to_cstring(&view.search);
    let completion = view.completion.as_ref().map(|c| to_cstring(&c.text));
    let packed = PickerView {
        visible: view.visible as u8,
        mode: view.mode.as_u8(),
        search: search.as_ptr(),
        search_selected: view.search_selected as u8,
        completion: completion.as_ref().map_or(ptr::null(), |c| c.as_ptr()),
        completion_offset: view.completion.as_ref().map_or(0, |c| c.offset as u32),
        items: if items.is_empty() {
            ptr::null()
        } else {
            items.as_ptr()
        },
        items_len: items.len() as u32,
    };
    f(&packed)
}

// --- Frontend vtable ---

/// Window callbacks implemented by the host plugin. Every entry may be NULL.
/// All callbacks run on the GUI thread.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct PickerFrontendVtable {
    pub user_data: *mut c_void,
    pub show: Option<extern "C" fn(user_data: *mut c_void, reset_position: u8)>,
    pub hide: Option<extern "C" fn(user_data: *mut c_void)>,
    pub move_to: Option<extern "C" fn(user_data: *mut c_void, x: i32, y: i32)>,
    pub set_clipboard: Option<extern "C" fn(user_data: *mut c_void, text: *const c_char)>,
    pub open_settings: Option<extern "C" fn(user_data: *mut c_void)>,
    pub render: Option<extern "C" fn(user_data: *mut c_void, view: *const PickerView)>,
}

struct CFrontend {
    vtable: PickerFrontendVtable,
    user_data: HostPtr,
}

impl CFrontend {
    fn new(vtable: PickerFrontendVtable) -> Self {
        Self {
            vtable,
            user_data: HostPtr(vtable.user_data),
        }
    }
}

// Function pointers are Send; the user data is covered by `HostPtr`.
unsafe impl Send for CFrontend {}

impl Frontend for CFrontend {
    fn show(&mut self, reset_position: bool) {
        if let Some(cb) = self.vtable.show {
            cb(self.user_data.get(), reset_position as u8);
        }
    }

    fn hide(&mut self) {
        if let Some(cb) = self.vtable.hide {
            cb(self.user_data.get());
        }
    }

    fn move_to(&mut self, x: i32, y: i32) {
        if let Some(cb) = self.vtable.move_to {
            cb(self.user_data.get(), x, y);
        }
    }

    fn set_clipboard(&mut self, text: &str) {
        if let Some(cb) = self.vtable.set_clipboard {
            let text = to_cstring(text);
            cb(self.user_data.get(), text.as_ptr());
        }
    }

    fn open_settings(&mut self) {
        if let Some(cb) = self.vtable.open_settings {
            cb(self.user_data.get());
        }
    }

    fn render(&mut self, view: &ViewSnapshot) {
        if let Some(cb) = self.vtable.render {
            let user_data = self.user_data.get();
            with_packed_view(view, |packed| cb(user_data, packed));
        }
    }
}

pub type PickerResetCallback = Option<extern "C" fn(user_data: *mut c_void)>;

pub(crate) fn reset_hook(callback: PickerResetCallback, user_data: *mut c_void) -> Option<ResetHook> {
    let callback = callback?;
    let user_data = HostPtr(user_data);
    Some(std::sync::Arc::new(move || callback(user_data.get())))
}

pub(crate) fn frontend_factory(
    vtable: PickerFrontendVtable,
) -> impl FnOnce() -> Box<dyn Frontend> + Send + 'static {
    let frontend = CFrontend::new(vtable);
    move || Box::new(frontend) as Box<dyn Frontend>
}

// --- Engine ---

/// Opaque engine handle for IBus-style hosts.
pub struct PickerEngine {
    _engine: Engine,
    pub(crate) ibus: IbusEngine,
}

/// Load the catalog, start the GUI thread, and return an engine handle.
/// Returns NULL if any path is invalid or the catalog cannot be loaded.
#[no_mangle]
pub extern "C" fn picker_engine_start(
    catalog_path: *const c_char,
    settings_path: *const c_char,
    mru_path: *const c_char,
    frontend: PickerFrontendVtable,
    reset: PickerResetCallback,
    reset_user_data: *mut c_void,
) -> *mut PickerEngine {
    ffi_guard!(ptr::null_mut();
        str: catalog_path = catalog_path,
        str: settings_path = settings_path,
        str: mru_path = mru_path,
    );
    let Some(catalog) = load_catalog(catalog_path) else {
        return ptr::null_mut();
    };
    let config = EngineConfig::new(settings_path, mru_path);
    match Engine::spawn(
        catalog,
        config,
        reset_hook(reset, reset_user_data),
        frontend_factory(frontend),
    ) {
        Ok(engine) => {
            let ibus = IbusEngine::new(engine.link().clone());
            Box::into_raw(Box::new(PickerEngine {
                _engine: engine,
                ibus,
            }))
        }
        Err(e) => {
            tracing::warn!(error = %e, "engine start failed");
            ptr::null_mut()
        }
    }
}

ffi_close!(picker_engine_stop, PickerEngine);
