//! Clipboard, options, drive mapping, pixels, keyboard and the remaining
//! miscellany.

use super::signatures as sig;
use super::{or_default, AutoIt, AutoItOption};
use crate::errors::AutoItError;
use crate::layout::{NativeStruct, Point, Rect};
use crate::marshal::CallBuffer;
use crate::types::Arg;

impl AutoIt {
    /// Set an option by name and return its previous value.
    pub fn auto_it_set_option(&mut self, option: &str, value: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::AUTOIT_SET_OPTION, &mut [option.into(), value.into()])
    }

    /// Same as [`AutoIt::auto_it_set_option`]; exported separately.
    pub fn opt(&mut self, option: &str, value: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::OPT, &mut [option.into(), value.into()])
    }

    pub fn set_option(&mut self, option: AutoItOption, value: i32) -> Result<i32, AutoItError> {
        self.auto_it_set_option(option.as_str(), value)
    }

    pub fn clip_get(&mut self) -> Result<String, AutoItError> {
        self.call_string(&sig::CLIP_GET, Vec::new())
    }

    pub fn clip_put(&mut self, text: &str) -> Result<(), AutoItError> {
        self.call_void(&sig::CLIP_PUT, &mut [text.into()])
    }

    /// Map a network share; returns the assigned device.  An empty `device`
    /// with flag 8 lets Windows pick a free letter.
    pub fn drive_map_add(
        &mut self,
        device: &str,
        share: &str,
        flags: i32,
        user: &str,
        password: &str,
    ) -> Result<String, AutoItError> {
        self.call_string(
            &sig::DRIVE_MAP_ADD,
            vec![device.into(), share.into(), flags.into(), user.into(), password.into()],
        )
    }

    pub fn drive_map_del(&mut self, device: &str) -> Result<i32, AutoItError> {
        self.call_i32(&sig::DRIVE_MAP_DEL, &mut [device.into()])
    }

    pub fn drive_map_get(&mut self, device: &str) -> Result<String, AutoItError> {
        self.call_string(&sig::DRIVE_MAP_GET, vec![device.into()])
    }

    pub fn is_admin(&mut self) -> Result<bool, AutoItError> {
        self.call_bool(&sig::IS_ADMIN, &mut [])
    }

    pub fn pixel_checksum(&mut self, area: Rect, step: Option<i32>) -> Result<u32, AutoItError> {
        let mut rect = CallBuffer::encode(&area)?;
        self.call(&sig::PIXEL_CHECKSUM, &mut [Arg::Buffer(&mut rect), step.unwrap_or(1).into()])?
            .as_u32()
    }

    /// Colour at `x`/`y` as `0xRRGGBB`.
    pub fn pixel_get_color(&mut self, x: i32, y: i32) -> Result<i32, AutoItError> {
        self.call_i32(&sig::PIXEL_GET_COLOR, &mut [x.into(), y.into()])
    }

    /// First pixel in `area` matching `color` within `variation` (0-255).
    /// Check [`AutoIt::last_error`] to tell "not found" from a hit at 0,0.
    pub fn pixel_search(
        &mut self,
        area: Rect,
        color: i32,
        variation: Option<i32>,
        step: Option<i32>,
    ) -> Result<Point, AutoItError> {
        let mut rect = CallBuffer::encode(&area)?;
        let mut found = CallBuffer::for_layout(Point::LAYOUT);
        self.call_void(
            &sig::PIXEL_SEARCH,
            &mut [
                Arg::Buffer(&mut rect),
                color.into(),
                variation.unwrap_or(0).into(),
                step.unwrap_or(1).into(),
                Arg::Buffer(&mut found),
            ],
        )?;
        found.decode()
    }

    /// Send keystrokes to the active window.  `mode` 1 sends `keys` raw.
    pub fn send(&mut self, keys: &str, mode: Option<i32>) -> Result<(), AutoItError> {
        self.call_void(&sig::SEND, &mut [keys.into(), mode.unwrap_or(0).into()])
    }

    pub fn sleep(&mut self, millis: i32) -> Result<(), AutoItError> {
        self.call_void(&sig::SLEEP, &mut [millis.into()])
    }

    /// Show a tooltip at `x`/`y`, or next to the cursor.  An empty `tip`
    /// hides it.
    pub fn tool_tip(&mut self, tip: &str, x: Option<i32>, y: Option<i32>) -> Result<(), AutoItError> {
        self.call_void(&sig::TOOL_TIP, &mut [tip.into(), or_default(x).into(), or_default(y).into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoit::tests::stub;
    use crate::testing::StubLoader;

    #[test]
    fn test_set_option_uses_documented_name() {
        let loader = StubLoader::new();
        let mut au3 = stub(&loader);
        au3.set_option(AutoItOption::WinTitleMatchMode, 2).unwrap();
        assert_eq!(loader.log().call_count("AU3_AutoItSetOption"), 1);
    }

    #[test]
    fn test_pixel_search_reads_result() {
        let hit = CallBuffer::encode(&Point { x: 7, y: 9 }).unwrap().as_bytes().to_vec();
        let loader = StubLoader::new().with_output("AU3_PixelSearch", hit);
        let mut au3 = stub(&loader);

        let area = Rect {
            left: 0,
            top: 0,
            right: 100,
            bottom: 100,
        };
        assert_eq!(au3.pixel_search(area, 0xffffff, None, None).unwrap(), Point { x: 7, y: 9 });
    }
}
