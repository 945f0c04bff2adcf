//! `AU3_Mouse*` exports.
//!
//! Speeds run from 0 (instant) to 100 (slowest); `None` keeps the DLL
//! default of 10.

use super::signatures as sig;
use super::{or_default, or_minus_one, AutoIt, MouseButton, WheelDirection};
use crate::errors::AutoItError;
use crate::layout::Point;

impl AutoIt {
    /// Click at `x`/`y`, or at the current position when they are `None`.
    pub fn mouse_click(
        &mut self,
        button: MouseButton,
        x: Option<i32>,
        y: Option<i32>,
        clicks: Option<i32>,
        speed: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::MOUSE_CLICK,
            &mut [
                button.into(),
                or_default(x).into(),
                or_default(y).into(),
                clicks.unwrap_or(1).into(),
                or_minus_one(speed).into(),
            ],
        )
    }

    pub fn mouse_click_drag(
        &mut self,
        button: MouseButton,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        speed: Option<i32>,
    ) -> Result<i32, AutoItError> {
        self.call_i32(
            &sig::MOUSE_CLICK_DRAG,
            &mut [
                button.into(),
                x1.into(),
                y1.into(),
                x2.into(),
                y2.into(),
                or_minus_one(speed).into(),
            ],
        )
    }

    pub fn mouse_down(&mut self, button: MouseButton) -> Result<(), AutoItError> {
        self.call_void(&sig::MOUSE_DOWN, &mut [button.into()])
    }

    /// Cursor id under the pointer (2 = arrow, 5 = I-beam, ...).
    pub fn mouse_get_cursor(&mut self) -> Result<i32, AutoItError> {
        self.call_i32(&sig::MOUSE_GET_CURSOR, &mut [])
    }

    pub fn mouse_get_pos(&mut self) -> Result<Point, AutoItError> {
        self.call_struct(&sig::MOUSE_GET_POS, Vec::new())
    }

    pub fn mouse_move(&mut self, x: i32, y: i32, speed: Option<i32>) -> Result<i32, AutoItError> {
        self.call_i32(&sig::MOUSE_MOVE, &mut [x.into(), y.into(), or_minus_one(speed).into()])
    }

    pub fn mouse_up(&mut self, button: MouseButton) -> Result<(), AutoItError> {
        self.call_void(&sig::MOUSE_UP, &mut [button.into()])
    }

    pub fn mouse_wheel(&mut self, direction: WheelDirection, clicks: i32) -> Result<(), AutoItError> {
        self.call_void(&sig::MOUSE_WHEEL, &mut [direction.into(), clicks.into()])
    }
}
