//! `AU3_Win*` exports.

use super::signatures as sig;
use super::{or_minus_one, AutoIt, ClientSize, Hwnd};
use crate::errors::AutoItError;
use crate::layout::{Point, Rect};
use crate::types::Arg;

/// Menu depth accepted by `AU3_WinMenuSelectItem`.
const MENU_DEPTH: usize = 8;

fn menu_path<'a>(head: Vec<Arg<'a>>, items: &[&'a str]) -> Result<Vec<Arg<'a>>, AutoItError> {
    if items.is_empty() || items.len() > MENU_DEPTH {
        return Err(AutoItError::Marshal(format!(
            "menu path needs 1 to {MENU_DEPTH} items, got {}",
            items.len()
        )));
    }
    let mut args = head;
    args.extend((0..MENU_DEPTH).map(|i| Arg::Text(items.get(i).copied().unwrap_or(""))));
    Ok(args)
}

impl AutoIt {
    pub fn win_activate(&mut self, title: &str, text: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_ACTIVATE, &mut [title.into(), text.into()])
    }

    pub fn win_activate_by_handle(&mut self, hwnd: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_ACTIVATE_BY_HANDLE, &mut [hwnd.into()])
    }

    pub fn win_active(&mut self, title: &str, text: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_ACTIVE, &mut [title.into(), text.into()])
    }

    pub fn win_active_by_handle(&mut self, hwnd: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_ACTIVE_BY_HANDLE, &mut [hwnd.into()])
    }

    pub fn win_close(&mut self, title: &str, text: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_CLOSE, &mut [title.into(), text.into()])
    }

    pub fn win_close_by_handle(&mut self, hwnd: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_CLOSE_BY_HANDLE, &mut [hwnd.into()])
    }

    pub fn win_exists(&mut self, title: &str, text: &str) -> Result<bool, AutoItError> {
        self.call_bool(&sig::WIN_EXISTS, &mut [title.into(), text.into()])
    }

    pub fn win_exists_by_handle(&mut self, hwnd: Hwnd) -> Result<bool, AutoItError> {
        self.call_bool(&sig::WIN_EXISTS_BY_HANDLE, &mut [hwnd.into()])
    }

    /// Caret position in the active window.
    pub fn win_get_caret_pos(&mut self) -> Result<Point, AutoItError> {
        self.call_struct(&sig::WIN_GET_CARET_POS, Vec::new())
    }

    /// Newline-separated class names of the window's controls.
    pub fn win_get_class_list(&mut self, title: &str, text: &str) -> Result<String, AutoItError> {
        self.call_string(&sig::WIN_GET_CLASS_LIST, vec![title.into(), text.into()])
    }

    pub fn win_get_class_list_by_handle(&mut self, hwnd: Hwnd) -> Result<String, AutoItError> {
        self.call_string(&sig::WIN_GET_CLASS_LIST_BY_HANDLE, vec![hwnd.into()])
    }

    pub fn win_get_client_size(&mut self, title: &str, text: &str) -> Result<ClientSize, AutoItError> {
        let rect: Rect = self.call_struct(&sig::WIN_GET_CLIENT_SIZE, vec![title.into(), text.into()])?;
        Ok(rect.into())
    }

    pub fn win_get_client_size_by_handle(&mut self, hwnd: Hwnd) -> Result<ClientSize, AutoItError> {
        let rect: Rect = self.call_struct(&sig::WIN_GET_CLIENT_SIZE_BY_HANDLE, vec![hwnd.into()])?;
        Ok(rect.into())
    }

    pub fn win_get_handle(&mut self, title: &str, text: &str) -> Result<Hwnd, AutoItError> {
        self.call_hwnd(&sig::WIN_GET_HANDLE, &mut [title.into(), text.into()])
    }

    pub fn win_get_handle_as_text(&mut self, title: &str, text: &str) -> Result<String, AutoItError> {
        self.call_string(&sig::WIN_GET_HANDLE_AS_TEXT, vec![title.into(), text.into()])
    }

    pub fn win_get_pos(&mut self, title: &str, text: &str) -> Result<Rect, AutoItError> {
        self.call_struct(&sig::WIN_GET_POS, vec![title.into(), text.into()])
    }

    pub fn win_get_pos_by_handle(&mut self, hwnd: Hwnd) -> Result<Rect, AutoItError> {
        self.call_struct(&sig::WIN_GET_POS_BY_HANDLE, vec![hwnd.into()])
    }

    /// Owning process id, 0 if no window matched.
    pub fn win_get_process(&mut self, title: &str, text: &str) -> Result<u32, AutoItError> {
        self.call(&sig::WIN_GET_PROCESS, &mut [title.into(), text.into()])?.as_u32()
    }

    pub fn win_get_process_by_handle(&mut self, hwnd: Hwnd) -> Result<u32, AutoItError> {
        self.call(&sig::WIN_GET_PROCESS_BY_HANDLE, &mut [hwnd.into()])?.as_u32()
    }

    /// State bit mask (1 exists, 2 visible, 4 enabled, 8 active,
    /// 16 minimized, 32 maximized).
    pub fn win_get_state(&mut self, title: &str, text: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_GET_STATE, &mut [title.into(), text.into()])
    }

    pub fn win_get_state_by_handle(&mut self, hwnd: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_GET_STATE_BY_HANDLE, &mut [hwnd.into()])
    }

    pub fn win_get_text(&mut self, title: &str, text: &str) -> Result<String, AutoItError> {
        self.call_string(&sig::WIN_GET_TEXT, vec![title.into(), text.into()])
    }

    pub fn win_get_text_by_handle(&mut self, hwnd: Hwnd) -> Result<String, AutoItError> {
        self.call_string(&sig::WIN_GET_TEXT_BY_HANDLE, vec![hwnd.into()])
    }

    pub fn win_get_title(&mut self, title: &str, text: &str) -> Result<String, AutoItError> {
        self.call_string(&sig::WIN_GET_TITLE, vec![title.into(), text.into()])
    }

    pub fn win_get_title_by_handle(&mut self, hwnd: Hwnd) -> Result<String, AutoItError> {
        self.call_string(&sig::WIN_GET_TITLE_BY_HANDLE, vec![hwnd.into()])
    }

    pub fn win_kill(&mut self, title: &str, text: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_KILL, &mut [title.into(), text.into()])
    }

    pub fn win_kill_by_handle(&mut self, hwnd: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_KILL_BY_HANDLE, &mut [hwnd.into()])
    }

    /// Select a menu item by its path, e.g. `["&File", "E&xit"]`.  At most
    /// eight levels.
    pub fn win_menu_select_item(&mut self, title: &str, text: &str, items: &[&str]) -> Result<i32, AutoItError> {
        let mut args = menu_path(vec![title.into(), text.into()], items)?;
        self.call_i32(&sig::WIN_MENU_SELECT_ITEM, &mut args)
    }

    pub fn win_menu_select_item_by_handle(&mut self, hwnd: Hwnd, items: &[&str]) -> Result<i32, AutoItError> {
        let mut args = menu_path(vec![hwnd.into()], items)?;
        self.call_i32(&sig::WIN_MENU_SELECT_ITEM_BY_HANDLE, &mut args)
    }

    pub fn win_minimize_all(&mut self) -> Result<(), AutoItError> {
        self.call_void(&sig::WIN_MINIMIZE_ALL, &mut [])
    }

    pub fn win_minimize_all_undo(&mut self) -> Result<(), AutoItError> {
        self.call_void(&sig::WIN_MINIMIZE_ALL_UNDO, &mut [])
    }

    /// Move, and optionally resize, a window.
    pub fn win_move(
        &mut self,
        title: &str,
        text: &str,
        x: i32,
        y: i32,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::WIN_MOVE,
            &mut [
                title.into(),
                text.into(),
                x.into(),
                y.into(),
                or_minus_one(width).into(),
                or_minus_one(height).into(),
            ],
        )
    }

    pub fn win_move_by_handle(
        &mut self,
        hwnd: Hwnd,
        x: i32,
        y: i32,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::WIN_MOVE_BY_HANDLE,
            &mut [
                hwnd.into(),
                x.into(),
                y.into(),
                or_minus_one(width).into(),
                or_minus_one(height).into(),
            ],
        )
    }

    pub fn win_set_on_top(&mut self, title: &str, text: &str, on_top: bool) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_SET_ON_TOP, &mut [title.into(), text.into(), (on_top as i32).into()])
    }

    pub fn win_set_on_top_by_handle(&mut self, hwnd: Hwnd, on_top: bool) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_SET_ON_TOP_BY_HANDLE, &mut [hwnd.into(), (on_top as i32).into()])
    }

    /// `flags` is an `SW_*` show command.
    pub fn win_set_state(&mut self, title: &str, text: &str, flags: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_SET_STATE, &mut [title.into(), text.into(), flags.into()])
    }

    pub fn win_set_state_by_handle(&mut self, hwnd: Hwnd, flags: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_SET_STATE_BY_HANDLE, &mut [hwnd.into(), flags.into()])
    }

    pub fn win_set_title(&mut self, title: &str, text: &str, new_title: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_SET_TITLE, &mut [title.into(), text.into(), new_title.into()])
    }

    pub fn win_set_title_by_handle(&mut self, hwnd: Hwnd, new_title: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_SET_TITLE_BY_HANDLE, &mut [hwnd.into(), new_title.into()])
    }

    /// Transparency from 0 (invisible) to 255 (opaque).
    pub fn win_set_trans(&mut self, title: &str, text: &str, transparency: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_SET_TRANS, &mut [title.into(), text.into(), transparency.into()])
    }

    pub fn win_set_trans_by_handle(&mut self, hwnd: Hwnd, transparency: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_SET_TRANS_BY_HANDLE, &mut [hwnd.into(), transparency.into()])
    }

    /// Block until the window exists.  `timeout` is in seconds; `None`
    /// waits forever.
    pub fn win_wait(&mut self, title: &str, text: &str, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_WAIT, &mut [title.into(), text.into(), timeout.unwrap_or(0).into()])
    }

    pub fn win_wait_by_handle(&mut self, hwnd: Hwnd, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_WAIT_BY_HANDLE, &mut [hwnd.into(), timeout.unwrap_or(0).into()])
    }

    pub fn win_wait_active(&mut self, title: &str, text: &str, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_WAIT_ACTIVE, &mut [title.into(), text.into(), timeout.unwrap_or(0).into()])
    }

    pub fn win_wait_active_by_handle(&mut self, hwnd: Hwnd, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_WAIT_ACTIVE_BY_HANDLE, &mut [hwnd.into(), timeout.unwrap_or(0).into()])
    }

    pub fn win_wait_close(&mut self, title: &str, text: &str, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_WAIT_CLOSE, &mut [title.into(), text.into(), timeout.unwrap_or(0).into()])
    }

    pub fn win_wait_close_by_handle(&mut self, hwnd: Hwnd, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_WAIT_CLOSE_BY_HANDLE, &mut [hwnd.into(), timeout.unwrap_or(0).into()])
    }

    pub fn win_wait_not_active(&mut self, title: &str, text: &str, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_WAIT_NOT_ACTIVE, &mut [title.into(), text.into(), timeout.unwrap_or(0).into()])
    }

    pub fn win_wait_not_active_by_handle(&mut self, hwnd: Hwnd, timeout: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::WIN_WAIT_NOT_ACTIVE_BY_HANDLE, &mut [hwnd.into(), timeout.unwrap_or(0).into()])
    }
}
