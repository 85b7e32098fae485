use picker_session::ViewSnapshot;

/// Window-side collaborator driven by the dispatcher on the GUI thread.
///
/// Implementations own the actual toolkit window; the dispatcher never holds
/// references into it.
pub trait Frontend: Send {
    /// Show the window. `reset_position` asks for a centered placement.
    fn show(&mut self, reset_position: bool);
    fn hide(&mut self);
    /// Move the window origin, in logical pixels.
    fn move_to(&mut self, x: i32, y: i32);
    fn set_clipboard(&mut self, text: &str);
    /// Open the settings file in the user's editor.
    fn open_settings(&mut self);
    fn render(&mut self, view: &ViewSnapshot);
}

/// Frontend that draws nothing. Useful for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrontend;

impl Frontend for NullFrontend {
    fn show(&mut self, _reset_position: bool) {}
    fn hide(&mut self) {}
    fn move_to(&mut self, _x: i32, _y: i32) {}
    fn set_clipboard(&mut self, _text: &str) {}
    fn open_settings(&mut self) {}
    fn render(&mut self, _view: &ViewSnapshot) {}
}
