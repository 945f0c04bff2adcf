//! `AU3_Control*` and `AU3_Statusbar*` exports.

use super::signatures as sig;
use super::{or_default, or_minus_one, AutoIt, Hwnd, MouseButton};
use crate::errors::AutoItError;
use crate::layout::Rect;

impl AutoIt {
    /// Click a control.  `x`/`y` are relative to the control; `None`
    /// clicks its centre.
    #[allow(clippy::too_many_arguments)]
    pub fn control_click(
        &mut self,
        title: &str,
        text: &str,
        control: &str,
        button: MouseButton,
        clicks: i32,
        x: Option<i32>,
        y: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::CONTROL_CLICK,
            &mut [
                title.into(),
                text.into(),
                control.into(),
                button.into(),
                clicks.into(),
                or_default(x).into(),
                or_default(y).into(),
            ],
        )
    }

    pub fn control_click_by_handle(
        &mut self,
        hwnd: Hwnd,
        control: Hwnd,
        button: MouseButton,
        clicks: i32,
        x: Option<i32>,
        y: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::CONTROL_CLICK_BY_HANDLE,
            &mut [
                hwnd.into(),
                control.into(),
                button.into(),
                clicks.into(),
                or_default(x).into(),
                or_default(y).into(),
            ],
        )
    }

    /// Run a `ControlCommand` command such as `"IsChecked"` or
    /// `"GetCurrentSelection"` and return its textual result.
    pub fn control_command(
        &mut self,
        title: &str,
        text: &str,
        control: &str,
        command: &str,
        extra: &str,
    ) -> Result<String, AutoItError> {
        self.call_string(
            &sig::CONTROL_COMMAND,
            vec![title.into(), text.into(), control.into(), command.into(), extra.into()],
        )
    }

    pub fn control_command_by_handle(
        &mut self,
        hwnd: Hwnd,
        control: Hwnd,
        command: &str,
        extra: &str,
    ) -> Result<String, AutoItError> {
        self.call_string(
            &sig::CONTROL_COMMAND_BY_HANDLE,
            vec![hwnd.into(), control.into(), command.into(), extra.into()],
        )
    }

    pub fn control_list_view(
        &mut self,
        title: &str,
        text: &str,
        control: &str,
        command: &str,
        extra1: &str,
        extra2: &str,
    ) -> Result<String, AutoItError> {
        self.call_string(
            &sig::CONTROL_LIST_VIEW,
            vec![
                title.into(),
                text.into(),
                control.into(),
                command.into(),
                extra1.into(),
                extra2.into(),
            ],
        )
    }

    pub fn control_list_view_by_handle(
        &mut self,
        hwnd: Hwnd,
        control: Hwnd,
        command: &str,
        extra1: &str,
        extra2: &str,
    ) -> Result<String, AutoItError> {
        self.call_string(
            &sig::CONTROL_LIST_VIEW_BY_HANDLE,
            vec![hwnd.into(), control.into(), command.into(), extra1.into(), extra2.into()],
        )
    }

    pub fn control_disable(&mut self, title: &str, text: &str, control: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_DISABLE, &mut [title.into(), text.into(), control.into()])
    }

    pub fn control_disable_by_handle(&mut self, hwnd: Hwnd, control: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_DISABLE_BY_HANDLE, &mut [hwnd.into(), control.into()])
    }

    pub fn control_enable(&mut self, title: &str, text: &str, control: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_ENABLE, &mut [title.into(), text.into(), control.into()])
    }

    pub fn control_enable_by_handle(&mut self, hwnd: Hwnd, control: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_ENABLE_BY_HANDLE, &mut [hwnd.into(), control.into()])
    }

    pub fn control_focus(&mut self, title: &str, text: &str, control: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_FOCUS, &mut [title.into(), text.into(), control.into()])
    }

    pub fn control_focus_by_handle(&mut self, hwnd: Hwnd, control: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_FOCUS_BY_HANDLE, &mut [hwnd.into(), control.into()])
    }

    /// ClassNameNN of the focused control.
    pub fn control_get_focus(&mut self, title: &str, text: &str) -> Result<String, AutoItError> {
        self.call_string(&sig::CONTROL_GET_FOCUS, vec![title.into(), text.into()])
    }

    pub fn control_get_focus_by_handle(&mut self, hwnd: Hwnd) -> Result<String, AutoItError> {
        self.call_string(&sig::CONTROL_GET_FOCUS_BY_HANDLE, vec![hwnd.into()])
    }

    pub fn control_get_handle(&mut self, hwnd: Hwnd, control: &str) -> Result<Hwnd, AutoItError> {
        self.call_hwnd(&sig::CONTROL_GET_HANDLE, &mut [hwnd.into(), control.into()])
    }

    pub fn control_get_handle_as_text(&mut self, title: &str, text: &str, control: &str) -> Result<String, AutoItError> {
        self.call_string(&sig::CONTROL_GET_HANDLE_AS_TEXT, vec![title.into(), text.into(), control.into()])
    }

    pub fn control_get_pos(&mut self, title: &str, text: &str, control: &str) -> Result<Rect, AutoItError> {
        self.call_struct(&sig::CONTROL_GET_POS, vec![title.into(), text.into(), control.into()])
    }

    pub fn control_get_pos_by_handle(&mut self, hwnd: Hwnd, control: Hwnd) -> Result<Rect, AutoItError> {
        self.call_struct(&sig::CONTROL_GET_POS_BY_HANDLE, vec![hwnd.into(), control.into()])
    }

    pub fn control_get_text(&mut self, title: &str, text: &str, control: &str) -> Result<String, AutoItError> {
        self.call_string(&sig::CONTROL_GET_TEXT, vec![title.into(), text.into(), control.into()])
    }

    pub fn control_get_text_by_handle(&mut self, hwnd: Hwnd, control: Hwnd) -> Result<String, AutoItError> {
        self.call_string(&sig::CONTROL_GET_TEXT_BY_HANDLE, vec![hwnd.into(), control.into()])
    }

    pub fn control_hide(&mut self, title: &str, text: &str, control: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_HIDE, &mut [title.into(), text.into(), control.into()])
    }

    pub fn control_hide_by_handle(&mut self, hwnd: Hwnd, control: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_HIDE_BY_HANDLE, &mut [hwnd.into(), control.into()])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn control_move(
        &mut self,
        title: &str,
        text: &str,
        control: &str,
        x: i32,
        y: i32,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::CONTROL_MOVE,
            &mut [
                title.into(),
                text.into(),
                control.into(),
                x.into(),
                y.into(),
                or_minus_one(width).into(),
                or_minus_one(height).into(),
            ],
        )
    }

    pub fn control_move_by_handle(
        &mut self,
        hwnd: Hwnd,
        control: Hwnd,
        x: i32,
        y: i32,
        width: Option<i32>,
        height: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::CONTROL_MOVE_BY_HANDLE,
            &mut [
                hwnd.into(),
                control.into(),
                x.into(),
                y.into(),
                or_minus_one(width).into(),
                or_minus_one(height).into(),
            ],
        )
    }

    /// Send keystrokes to a control.  `mode` 1 sends `keys` raw.
    pub fn control_send(
        &mut self,
        title: &str,
        text: &str,
        control: &str,
        keys: &str,
        mode: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::CONTROL_SEND,
            &mut [
                title.into(),
                text.into(),
                control.into(),
                keys.into(),
                mode.unwrap_or(0).into(),
            ],
        )
    }

    pub fn control_send_by_handle(
        &mut self,
        hwnd: Hwnd,
        control: Hwnd,
        keys: &str,
        mode: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::CONTROL_SEND_BY_HANDLE,
            &mut [hwnd.into(), control.into(), keys.into(), mode.unwrap_or(0).into()],
        )
    }

    pub fn control_set_text(&mut self, title: &str, text: &str, control: &str, new_text: &str) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::CONTROL_SET_TEXT,
            &mut [title.into(), text.into(), control.into(), new_text.into()],
        )
    }

    pub fn control_set_text_by_handle(&mut self, hwnd: Hwnd, control: Hwnd, new_text: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_SET_TEXT_BY_HANDLE, &mut [hwnd.into(), control.into(), new_text.into()])
    }

    pub fn control_show(&mut self, title: &str, text: &str, control: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_SHOW, &mut [title.into(), text.into(), control.into()])
    }

    pub fn control_show_by_handle(&mut self, hwnd: Hwnd, control: Hwnd) -> Result<i32, AutoItError> {
        self.call_i32(&sig::CONTROL_SHOW_BY_HANDLE, &mut [hwnd.into(), control.into()])
    }

    pub fn control_tree_view(
        &mut self,
        title: &str,
        text: &str,
        control: &str,
        command: &str,
        extra1: &str,
        extra2: &str,
    ) -> Result<String, AutoItError> {
        self.call_string(
            &sig::CONTROL_TREE_VIEW,
            vec![
                title.into(),
                text.into(),
                control.into(),
                command.into(),
                extra1.into(),
                extra2.into(),
            ],
        )
    }

    pub fn control_tree_view_by_handle(
        &mut self,
        hwnd: Hwnd,
        control: Hwnd,
        command: &str,
        extra1: &str,
        extra2: &str,
    ) -> Result<String, AutoItError> {
        self.call_string(
            &sig::CONTROL_TREE_VIEW_BY_HANDLE,
            vec![hwnd.into(), control.into(), command.into(), extra1.into(), extra2.into()],
        )
    }

    /// Text of one status bar part; parts are numbered from 1.
    pub fn statusbar_get_text(&mut self, title: &str, text: &str, part: Option<i32>) -> Result<String, AutoItError> {
        self.call_string(
            &sig::STATUSBAR_GET_TEXT,
            vec![title.into(), text.into(), part.unwrap_or(1).into()],
        )
    }

    pub fn statusbar_get_text_by_handle(&mut self, hwnd: Hwnd, part: Option<i32>) -> Result<String, AutoItError> {
        self.call_string(&sig::STATUSBAR_GET_TEXT_BY_HANDLE, vec![hwnd.into(), part.unwrap_or(1).into()])
    }
}
