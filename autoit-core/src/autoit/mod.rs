//! Typed AutoItX3 binding surface.
//!
//! [`AutoIt`] owns a [`Library`] configured for AutoItX3 and exposes one
//! method per export, grouped by domain:
//!
//! | File | Exports |
//! |------|---------|
//! | `window.rs` | `AU3_Win*` |
//! | `control.rs` | `AU3_Control*`, `AU3_Statusbar*` |
//! | `mouse.rs` | `AU3_Mouse*` |
//! | `process.rs` | `AU3_Process*`, `AU3_Run*`, `AU3_Shutdown` |
//! | `system.rs` | clipboard, drives, options, pixels, keyboard, misc |
//!
//! Omitted optional arguments become the DLL's own defaults
//! ([`AU3_INTDEFAULT`] for coordinates, `-1` for speeds and sizes,
//! [`SW_SHOWNORMAL`] for show flags, `0` for timeouts).  Failures reported
//! through `AU3_error` are only read when asked for; see
//! [`AutoIt::last_error`].

mod control;
mod mouse;
mod process;
pub mod signatures;
mod system;
mod window;

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;
use serde::Serialize;

use crate::config::LibraryConfig;
use crate::errors::AutoItError;
use crate::layout::{NativeStruct, Rect};
use crate::library::Library;
use crate::marshal::{CallBuffer, DEFAULT_STRING_CAPACITY};
use crate::native::Loader;
use crate::types::{Arg, Signature, Value};

/// "Use the default" sentinel for integer parameters.
pub const AU3_INTDEFAULT: i32 = -2147483647;

/// `SW_SHOWNORMAL` show flag for `Run*`.
pub const SW_SHOWNORMAL: i32 = 1;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Window or control handle as returned by the DLL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Hwnd(pub usize);

impl Hwnd {
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Hwnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<Hwnd> for Arg<'_> {
    fn from(hwnd: Hwnd) -> Self {
        Arg::Pointer(hwnd.0)
    }
}

/// Client area size.  `AU3_WinGetClientSize` fills `right`/`bottom` of
/// its `RECT` with the width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClientSize {
    pub width: i32,
    pub height: i32,
}

impl From<Rect> for ClientSize {
    fn from(rect: Rect) -> Self {
        ClientSize {
            width: rect.right,
            height: rect.bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const fn as_str(self) -> &'static str {
        match self {
            MouseButton::Left => "LEFT",
            MouseButton::Middle => "MIDDLE",
            MouseButton::Right => "RIGHT",
        }
    }
}

impl From<MouseButton> for Arg<'_> {
    fn from(button: MouseButton) -> Self {
        Arg::Text(button.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            WheelDirection::Up => "UP",
            WheelDirection::Down => "DOWN",
        }
    }
}

impl From<WheelDirection> for Arg<'_> {
    fn from(direction: WheelDirection) -> Self {
        Arg::Text(direction.as_str())
    }
}

/// Option names accepted by `AU3_AutoItSetOption` / `AU3_Opt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoItOption {
    CaretCoordMode,
    ExpandEnvStrings,
    ExpandVarStrings,
    GuiCloseOnEsc,
    GuiCoordMode,
    GuiDataSeparatorChar,
    GuiOnEventMode,
    GuiResizeMode,
    GuiEventOptions,
    MouseClickDelay,
    MouseClickDownDelay,
    MouseClickDragDelay,
    MouseCoordMode,
    MustDeclareVars,
    PixelCoordMode,
    SendAttachMode,
    SendCapslockMode,
    SendKeyDelay,
    SendKeyDownDelay,
    SetExitCode,
    TcpTimeout,
    TrayAutoPause,
    TrayIconDebug,
    TrayIconHide,
    TrayMenuMode,
    TrayOnEventMode,
    WinDetectHiddenText,
    WinSearchChildren,
    WinTextMatchMode,
    WinTitleMatchMode,
    WinWaitDelay,
}

impl AutoItOption {
    pub const fn as_str(self) -> &'static str {
        match self {
            AutoItOption::CaretCoordMode => "CaretCoordMode",
            AutoItOption::ExpandEnvStrings => "ExpandEnvStrings",
            AutoItOption::ExpandVarStrings => "ExpandVarStrings",
            AutoItOption::GuiCloseOnEsc => "GUICloseOnESC",
            AutoItOption::GuiCoordMode => "GUICoordMode",
            AutoItOption::GuiDataSeparatorChar => "GUIDataSeparatorChar",
            AutoItOption::GuiOnEventMode => "GUIOnEventMode",
            AutoItOption::GuiResizeMode => "GUIResizeMode",
            AutoItOption::GuiEventOptions => "GUIEventOptions",
            AutoItOption::MouseClickDelay => "MouseClickDelay",
            AutoItOption::MouseClickDownDelay => "MouseClickDownDelay",
            AutoItOption::MouseClickDragDelay => "MouseClickDragDelay",
            AutoItOption::MouseCoordMode => "MouseCoordMode",
            AutoItOption::MustDeclareVars => "MustDeclareVars",
            AutoItOption::PixelCoordMode => "PixelCoordMode",
            AutoItOption::SendAttachMode => "SendAttachMode",
            AutoItOption::SendCapslockMode => "SendCapslockMode",
            AutoItOption::SendKeyDelay => "SendKeyDelay",
            AutoItOption::SendKeyDownDelay => "SendKeyDownDelay",
            AutoItOption::SetExitCode => "SetExitCode",
            AutoItOption::TcpTimeout => "TCPTimeout",
            AutoItOption::TrayAutoPause => "TrayAutoPause",
            AutoItOption::TrayIconDebug => "TrayIconDebug",
            AutoItOption::TrayIconHide => "TrayIconHide",
            AutoItOption::TrayMenuMode => "TrayMenuMode",
            AutoItOption::TrayOnEventMode => "TrayOnEventMode",
            AutoItOption::WinDetectHiddenText => "WinDetectHiddenText",
            AutoItOption::WinSearchChildren => "WinSearchChildren",
            AutoItOption::WinTextMatchMode => "WinTextMatchMode",
            AutoItOption::WinTitleMatchMode => "WinTitleMatchMode",
            AutoItOption::WinWaitDelay => "WinWaitDelay",
        }
    }
}

impl fmt::Display for AutoItOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AutoIt
// ---------------------------------------------------------------------------

fn init(library: &mut Library) -> Result<(), AutoItError> {
    library.call(&signatures::INIT, &mut []).map(drop)
}

/// AutoItX3 bindings.  Call [`AutoIt::load`] before anything else.
#[derive(Debug)]
pub struct AutoIt {
    library: Library,
}

impl Default for AutoIt {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoIt {
    /// AutoItX3 at the location given by [`LibraryConfig::from_env`].
    pub fn new() -> Self {
        Self::with_config(LibraryConfig::from_env())
    }

    pub fn with_config(config: LibraryConfig) -> Self {
        Self {
            library: Library::new(config).on_load(init),
        }
    }

    /// Open the library through `loader` instead of the OS loader.
    pub fn with_loader(config: LibraryConfig, loader: Box<dyn Loader>) -> Self {
        Self {
            library: Library::with_loader(config, loader).on_load(init),
        }
    }

    /// Load the DLL and call `AU3_Init`.
    pub fn load(&mut self) -> Result<(), AutoItError> {
        self.library.load()
    }

    pub fn unload(&mut self) {
        self.library.unload()
    }

    pub fn is_loaded(&self) -> bool {
        self.library.is_loaded()
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    /// Value of `AU3_error` for the most recent call.
    pub fn last_error(&mut self) -> Result<i32, AutoItError> {
        self.call_i32(&signatures::ERROR, &mut [])
    }

    /// Turn a non-zero [`AutoIt::last_error`] into [`AutoItError::NativeCall`].
    pub fn check_error(&mut self) -> Result<(), AutoItError> {
        match self.last_error()? {
            0 => Ok(()),
            code => Err(AutoItError::NativeCall(format!("AU3_error returned {code}"))),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn call(&mut self, sig: &Signature, args: &mut [Arg<'_>]) -> Result<Value, AutoItError> {
        self.library.call(sig, args)
    }

    fn call_void(&mut self, sig: &Signature, args: &mut [Arg<'_>]) -> Result<(), AutoItError> {
        self.call(sig, args).map(drop)
    }

    fn call_i32(&mut self, sig: &Signature, args: &mut [Arg<'_>]) -> Result<i32, AutoItError> {
        self.call(sig, args)?.as_i32()
    }

    fn call_bool(&mut self, sig: &Signature, args: &mut [Arg<'_>]) -> Result<bool, AutoItError> {
        Ok(self.call_i32(sig, args)? != 0)
    }

    fn call_hwnd(&mut self, sig: &Signature, args: &mut [Arg<'_>]) -> Result<Hwnd, AutoItError> {
        Ok(Hwnd(self.call(sig, args)?.as_pointer()?))
    }

    /// Call an export whose last two parameters are an output string and
    /// its capacity.
    fn call_string(&mut self, sig: &Signature, head: Vec<Arg<'_>>) -> Result<String, AutoItError> {
        self.call_string_ret(sig, head).map(|(_, text)| text)
    }

    fn call_string_ret(&mut self, sig: &Signature, head: Vec<Arg<'_>>) -> Result<(Value, String), AutoItError> {
        let mut out = CallBuffer::output_string(DEFAULT_STRING_CAPACITY);
        let capacity = out.capacity_arg();

        let mut args = head;
        args.push(Arg::Buffer(&mut out));
        args.push(Arg::from(capacity));
        let ret = self.call(sig, &mut args)?;
        drop(args);

        Ok((ret, out.read_wide_string()))
    }

    /// Call an export whose last parameter is a struct filled by the DLL.
    fn call_struct<T: NativeStruct>(&mut self, sig: &Signature, head: Vec<Arg<'_>>) -> Result<T, AutoItError> {
        let mut out = CallBuffer::for_layout(T::LAYOUT);

        let mut args = head;
        args.push(Arg::Buffer(&mut out));
        self.call(sig, &mut args)?;
        drop(args);

        out.decode()
    }
}

fn or_default(value: Option<i32>) -> i32 {
    value.unwrap_or(AU3_INTDEFAULT)
}

fn or_minus_one(value: Option<i32>) -> i32 {
    value.unwrap_or(-1)
}

// ---------------------------------------------------------------------------
// Process-wide instance
// ---------------------------------------------------------------------------

static SHARED: OnceLock<Mutex<AutoIt>> = OnceLock::new();

/// Process-wide [`AutoIt`], created from the environment on first use.
///
/// The DLL keeps global state, so concurrent callers must hold the lock for
/// the whole load/call/unload sequence they depend on.
pub fn shared() -> &'static Mutex<AutoIt> {
    SHARED.get_or_init(|| Mutex::new(AutoIt::new()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::layout::Point;
    use crate::testing::{wide_bytes, StubLoader, SENTINEL_HANDLE};

    pub(super) fn stub(loader: &StubLoader) -> AutoIt {
        let mut au3 = AutoIt::with_loader(LibraryConfig::new("AutoItX3", "stub.dll"), Box::new(loader.clone()));
        au3.load().unwrap();
        au3
    }

    #[test]
    fn test_load_runs_init() {
        let loader = StubLoader::new();
        let au3 = stub(&loader);
        assert!(au3.is_loaded());
        assert_eq!(loader.log().call_count("AU3_Init"), 1);
    }

    #[test]
    fn test_shared_is_one_instance() {
        assert!(std::ptr::eq(shared(), shared()));
        assert!(!shared().lock().is_loaded());
    }

    #[test]
    fn test_call_before_load() {
        let loader = StubLoader::new();
        let mut au3 = AutoIt::with_loader(LibraryConfig::new("AutoItX3", "stub.dll"), Box::new(loader.clone()));
        let err = au3.win_exists("Untitled - Notepad", "").unwrap_err();
        assert!(matches!(err, AutoItError::NotLoaded { .. }));
        assert!(loader.log().calls.is_empty());
    }

    #[test]
    fn test_output_string_is_trimmed() {
        let loader = StubLoader::new()
            .with_output("AU3_ClipGet", wide_bytes("hello"))
            .with_output("AU3_WinGetTitle", wide_bytes(""));
        let mut au3 = stub(&loader);
        assert_eq!(au3.clip_get().unwrap(), "hello");
        assert_eq!(au3.win_get_title("[ACTIVE]", "").unwrap(), "");
    }

    #[test]
    fn test_struct_outputs() {
        let rect = Rect {
            left: 0,
            top: 0,
            right: 800,
            bottom: 600,
        };
        let point = Point { x: 12, y: 34 };
        let loader = StubLoader::new()
            .with_output("AU3_WinGetClientSize", CallBuffer::encode(&rect).unwrap().as_bytes().to_vec())
            .with_output("AU3_MouseGetPos", CallBuffer::encode(&point).unwrap().as_bytes().to_vec());
        let mut au3 = stub(&loader);

        assert_eq!(
            au3.win_get_client_size("Notepad", "").unwrap(),
            ClientSize {
                width: 800,
                height: 600
            }
        );
        assert_eq!(au3.mouse_get_pos().unwrap(), point);
    }

    #[test]
    fn test_last_error_is_on_demand() {
        let loader = StubLoader::new().with_return("AU3_error", Value::Int(0));
        let mut au3 = stub(&loader);
        au3.win_activate("Notepad", "").unwrap();
        assert_eq!(loader.log().call_count("AU3_error"), 0);
        au3.check_error().unwrap();

        let loader = StubLoader::new().with_return("AU3_error", Value::Int(3));
        let mut au3 = stub(&loader);
        assert!(matches!(au3.check_error(), Err(AutoItError::NativeCall(_))));
    }

    #[test]
    fn test_handles() {
        let loader = StubLoader::new();
        let mut au3 = stub(&loader);
        let hwnd = au3.win_get_handle("Notepad", "").unwrap();
        assert_eq!(hwnd, Hwnd(SENTINEL_HANDLE));
        assert!(!hwnd.is_null());
        assert_eq!(hwnd.to_string(), "0x1234");
    }

    #[test]
    fn test_option_names() {
        assert_eq!(AutoItOption::GuiCloseOnEsc.as_str(), "GUICloseOnESC");
        assert_eq!(AutoItOption::TcpTimeout.to_string(), "TCPTimeout");
        assert_eq!(MouseButton::default().as_str(), "LEFT");
        assert_eq!(WheelDirection::Down.as_str(), "DOWN");
    }

    /// Drive every export through the stub and check nothing is left
    /// unwired.
    #[test]
    fn test_every_export_is_wired() {
        let loader = StubLoader::new();
        let mut au3 = stub(&loader);
        let h = Hwnd(SENTINEL_HANDLE);
        let r = Rect::default();

        au3.last_error().unwrap();
        au3.auto_it_set_option("WinTitleMatchMode", 2).unwrap();
        au3.opt("SendKeyDelay", 5).unwrap();
        au3.clip_get().unwrap();
        au3.clip_put("x").unwrap();

        au3.control_click("t", "", "Button1", MouseButton::Left, 1, None, None).unwrap();
        au3.control_click_by_handle(h, h, MouseButton::Right, 2, Some(1), Some(1)).unwrap();
        au3.control_command("t", "", "Edit1", "IsVisible", "").unwrap();
        au3.control_command_by_handle(h, h, "IsVisible", "").unwrap();
        au3.control_list_view("t", "", "List1", "GetItemCount", "", "").unwrap();
        au3.control_list_view_by_handle(h, h, "GetItemCount", "", "").unwrap();
        au3.control_disable("t", "", "Edit1").unwrap();
        au3.control_disable_by_handle(h, h).unwrap();
        au3.control_enable("t", "", "Edit1").unwrap();
        au3.control_enable_by_handle(h, h).unwrap();
        au3.control_focus("t", "", "Edit1").unwrap();
        au3.control_focus_by_handle(h, h).unwrap();
        au3.control_get_focus("t", "").unwrap();
        au3.control_get_focus_by_handle(h).unwrap();
        au3.control_get_handle(h, "Edit1").unwrap();
        au3.control_get_handle_as_text("t", "", "Edit1").unwrap();
        au3.control_get_pos("t", "", "Edit1").unwrap();
        au3.control_get_pos_by_handle(h, h).unwrap();
        au3.control_get_text("t", "", "Edit1").unwrap();
        au3.control_get_text_by_handle(h, h).unwrap();
        au3.control_hide("t", "", "Edit1").unwrap();
        au3.control_hide_by_handle(h, h).unwrap();
        au3.control_move("t", "", "Edit1", 0, 0, None, None).unwrap();
        au3.control_move_by_handle(h, h, 0, 0, Some(10), Some(10)).unwrap();
        au3.control_send("t", "", "Edit1", "abc", None).unwrap();
        au3.control_send_by_handle(h, h, "abc", Some(1)).unwrap();
        au3.control_set_text("t", "", "Edit1", "abc").unwrap();
        au3.control_set_text_by_handle(h, h, "abc").unwrap();
        au3.control_show("t", "", "Edit1").unwrap();
        au3.control_show_by_handle(h, h).unwrap();
        au3.control_tree_view("t", "", "Tree1", "Exists", "#0", "").unwrap();
        au3.control_tree_view_by_handle(h, h, "Exists", "#0", "").unwrap();
        au3.statusbar_get_text("t", "", None).unwrap();
        au3.statusbar_get_text_by_handle(h, Some(2)).unwrap();

        au3.drive_map_add("X:", r"\\server\share", 0, "", "").unwrap();
        au3.drive_map_del("X:").unwrap();
        au3.drive_map_get("X:").unwrap();
        au3.is_admin().unwrap();

        au3.mouse_click(MouseButton::Left, None, None, None, None).unwrap();
        au3.mouse_click_drag(MouseButton::Left, 0, 0, 10, 10, None).unwrap();
        au3.mouse_down(MouseButton::Left).unwrap();
        au3.mouse_get_cursor().unwrap();
        au3.mouse_get_pos().unwrap();
        au3.mouse_move(1, 1, None).unwrap();
        au3.mouse_up(MouseButton::Left).unwrap();
        au3.mouse_wheel(WheelDirection::Up, 1).unwrap();

        au3.pixel_checksum(r, None).unwrap();
        au3.pixel_get_color(0, 0).unwrap();
        au3.pixel_search(r, 0xff0000, None, None).unwrap();
        au3.process_close("notepad.exe").unwrap();
        au3.process_exists("notepad.exe").unwrap();
        au3.process_set_priority("notepad.exe", 2).unwrap();
        au3.process_wait("notepad.exe", None).unwrap();
        au3.process_wait_close("notepad.exe", Some(5)).unwrap();
        au3.run("notepad.exe", "", None).unwrap();
        au3.run_wait("cmd /c exit 0", "", None).unwrap();
        au3.run_as("user", "domain", "pwd", 1, "notepad.exe", "", None).unwrap();
        au3.run_as_wait("user", "domain", "pwd", 1, "notepad.exe", "", None).unwrap();
        au3.send("abc", None).unwrap();
        au3.shutdown(0).unwrap();
        au3.sleep(0).unwrap();
        au3.tool_tip("hi", None, None).unwrap();

        au3.win_activate("t", "").unwrap();
        au3.win_activate_by_handle(h).unwrap();
        au3.win_active("t", "").unwrap();
        au3.win_active_by_handle(h).unwrap();
        au3.win_close("t", "").unwrap();
        au3.win_close_by_handle(h).unwrap();
        au3.win_exists("t", "").unwrap();
        au3.win_exists_by_handle(h).unwrap();
        au3.win_get_caret_pos().unwrap();
        au3.win_get_class_list("t", "").unwrap();
        au3.win_get_class_list_by_handle(h).unwrap();
        au3.win_get_client_size("t", "").unwrap();
        au3.win_get_client_size_by_handle(h).unwrap();
        au3.win_get_handle("t", "").unwrap();
        au3.win_get_handle_as_text("t", "").unwrap();
        au3.win_get_pos("t", "").unwrap();
        au3.win_get_pos_by_handle(h).unwrap();
        au3.win_get_process("t", "").unwrap();
        au3.win_get_process_by_handle(h).unwrap();
        au3.win_get_state("t", "").unwrap();
        au3.win_get_state_by_handle(h).unwrap();
        au3.win_get_text("t", "").unwrap();
        au3.win_get_text_by_handle(h).unwrap();
        au3.win_get_title("t", "").unwrap();
        au3.win_get_title_by_handle(h).unwrap();
        au3.win_kill("t", "").unwrap();
        au3.win_kill_by_handle(h).unwrap();
        au3.win_menu_select_item("t", "", &["&File", "E&xit"]).unwrap();
        au3.win_menu_select_item_by_handle(h, &["&File"]).unwrap();
        au3.win_minimize_all().unwrap();
        au3.win_minimize_all_undo().unwrap();
        au3.win_move("t", "", 0, 0, None, None).unwrap();
        au3.win_move_by_handle(h, 0, 0, Some(640), Some(480)).unwrap();
        au3.win_set_on_top("t", "", true).unwrap();
        au3.win_set_on_top_by_handle(h, false).unwrap();
        au3.win_set_state("t", "", 5).unwrap();
        au3.win_set_state_by_handle(h, 5).unwrap();
        au3.win_set_title("t", "", "new").unwrap();
        au3.win_set_title_by_handle(h, "new").unwrap();
        au3.win_set_trans("t", "", 128).unwrap();
        au3.win_set_trans_by_handle(h, 128).unwrap();
        au3.win_wait("t", "", None).unwrap();
        au3.win_wait_by_handle(h, None).unwrap();
        au3.win_wait_active("t", "", None).unwrap();
        au3.win_wait_active_by_handle(h, None).unwrap();
        au3.win_wait_close("t", "", None).unwrap();
        au3.win_wait_close_by_handle(h, None).unwrap();
        au3.win_wait_not_active("t", "", None).unwrap();
        au3.win_wait_not_active_by_handle(h, None).unwrap();

        let called: BTreeSet<&str> = loader.log().calls.iter().copied().collect();
        let declared: BTreeSet<&str> = signatures::ALL.iter().map(|s| s.name).collect();
        let missing: Vec<_> = declared.difference(&called).collect();
        assert!(missing.is_empty(), "not wired: {missing:?}");
        assert_eq!(au3.library().cached_bindings().len(), signatures::ALL.len());
    }
}
