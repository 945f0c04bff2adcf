//! Native signature of every AutoItX3 export.
//!
//! Every export is `WINAPI` except `AU3_error`, which takes no arguments,
//! so caller and callee cleanup agree on both x86 and x64.  Output strings
//! are an `LPWSTR` followed by its capacity in characters.

use crate::layout::{LPPOINT, LPRECT};
use crate::types::{Signature, TypeTag};

const VOID: TypeTag = TypeTag::Void;
const INT: TypeTag = TypeTag::I32;
const UINT: TypeTag = TypeTag::U32;
const DWORD: TypeTag = TypeTag::U32;
const STR: TypeTag = TypeTag::WStr;
const HWND: TypeTag = TypeTag::Pointer;
const BUF: TypeTag = TypeTag::Pointer;
const RECT: TypeTag = LPRECT.tag();
const POINT: TypeTag = LPPOINT.tag();

macro_rules! exports {
    ($($konst:ident = $name:literal: $ret:ident($($param:ident),*);)*) => {
        $(
            pub const $konst: Signature = Signature::new($name, $ret, &[$($param),*]);
        )*

        /// Every export, in header order.
        pub const ALL: &[Signature] = &[$($konst),*];
    };
}

exports! {
    INIT = "AU3_Init": VOID();
    ERROR = "AU3_error": INT();

    AUTOIT_SET_OPTION = "AU3_AutoItSetOption": INT(STR, INT);

    CLIP_GET = "AU3_ClipGet": VOID(BUF, INT);
    CLIP_PUT = "AU3_ClipPut": VOID(STR);

    CONTROL_CLICK = "AU3_ControlClick": INT(STR, STR, STR, STR, INT, INT, INT);
    CONTROL_CLICK_BY_HANDLE = "AU3_ControlClickByHandle": INT(HWND, HWND, STR, INT, INT, INT);
    CONTROL_COMMAND = "AU3_ControlCommand": VOID(STR, STR, STR, STR, STR, BUF, INT);
    CONTROL_COMMAND_BY_HANDLE = "AU3_ControlCommandByHandle": VOID(HWND, HWND, STR, STR, BUF, INT);
    CONTROL_LIST_VIEW = "AU3_ControlListView": VOID(STR, STR, STR, STR, STR, STR, BUF, INT);
    CONTROL_LIST_VIEW_BY_HANDLE = "AU3_ControlListViewByHandle": VOID(HWND, HWND, STR, STR, STR, BUF, INT);
    CONTROL_DISABLE = "AU3_ControlDisable": INT(STR, STR, STR);
    CONTROL_DISABLE_BY_HANDLE = "AU3_ControlDisableByHandle": INT(HWND, HWND);
    CONTROL_ENABLE = "AU3_ControlEnable": INT(STR, STR, STR);
    CONTROL_ENABLE_BY_HANDLE = "AU3_ControlEnableByHandle": INT(HWND, HWND);
    CONTROL_FOCUS = "AU3_ControlFocus": INT(STR, STR, STR);
    CONTROL_FOCUS_BY_HANDLE = "AU3_ControlFocusByHandle": INT(HWND, HWND);
    CONTROL_GET_FOCUS = "AU3_ControlGetFocus": VOID(STR, STR, BUF, INT);
    CONTROL_GET_FOCUS_BY_HANDLE = "AU3_ControlGetFocusByHandle": VOID(HWND, BUF, INT);
    CONTROL_GET_HANDLE = "AU3_ControlGetHandle": HWND(HWND, STR);
    CONTROL_GET_HANDLE_AS_TEXT = "AU3_ControlGetHandleAsText": VOID(STR, STR, STR, BUF, INT);
    CONTROL_GET_POS = "AU3_ControlGetPos": INT(STR, STR, STR, RECT);
    CONTROL_GET_POS_BY_HANDLE = "AU3_ControlGetPosByHandle": INT(HWND, HWND, RECT);
    CONTROL_GET_TEXT = "AU3_ControlGetText": VOID(STR, STR, STR, BUF, INT);
    CONTROL_GET_TEXT_BY_HANDLE = "AU3_ControlGetTextByHandle": VOID(HWND, HWND, BUF, INT);
    CONTROL_HIDE = "AU3_ControlHide": INT(STR, STR, STR);
    CONTROL_HIDE_BY_HANDLE = "AU3_ControlHideByHandle": INT(HWND, HWND);
    CONTROL_MOVE = "AU3_ControlMove": INT(STR, STR, STR, INT, INT, INT, INT);
    CONTROL_MOVE_BY_HANDLE = "AU3_ControlMoveByHandle": INT(HWND, HWND, INT, INT, INT, INT);
    CONTROL_SEND = "AU3_ControlSend": INT(STR, STR, STR, STR, INT);
    CONTROL_SEND_BY_HANDLE = "AU3_ControlSendByHandle": INT(HWND, HWND, STR, INT);
    CONTROL_SET_TEXT = "AU3_ControlSetText": INT(STR, STR, STR, STR);
    CONTROL_SET_TEXT_BY_HANDLE = "AU3_ControlSetTextByHandle": INT(HWND, HWND, STR);
    CONTROL_SHOW = "AU3_ControlShow": INT(STR, STR, STR);
    CONTROL_SHOW_BY_HANDLE = "AU3_ControlShowByHandle": INT(HWND, HWND);
    CONTROL_TREE_VIEW = "AU3_ControlTreeView": VOID(STR, STR, STR, STR, STR, STR, BUF, INT);
    CONTROL_TREE_VIEW_BY_HANDLE = "AU3_ControlTreeViewByHandle": VOID(HWND, HWND, STR, STR, STR, BUF, INT);

    DRIVE_MAP_ADD = "AU3_DriveMapAdd": VOID(STR, STR, INT, STR, STR, BUF, INT);
    DRIVE_MAP_DEL = "AU3_DriveMapDel": INT(STR);
    DRIVE_MAP_GET = "AU3_DriveMapGet": VOID(STR, BUF, INT);

    IS_ADMIN = "AU3_IsAdmin": INT();

    MOUSE_CLICK = "AU3_MouseClick": INT(STR, INT, INT, INT, INT);
    MOUSE_CLICK_DRAG = "AU3_MouseClickDrag": INT(STR, INT, INT, INT, INT, INT);
    MOUSE_DOWN = "AU3_MouseDown": VOID(STR);
    MOUSE_GET_CURSOR = "AU3_MouseGetCursor": INT();
    MOUSE_GET_POS = "AU3_MouseGetPos": VOID(POINT);
    MOUSE_MOVE = "AU3_MouseMove": INT(INT, INT, INT);
    MOUSE_UP = "AU3_MouseUp": VOID(STR);
    MOUSE_WHEEL = "AU3_MouseWheel": VOID(STR, INT);

    OPT = "AU3_Opt": INT(STR, INT);

    PIXEL_CHECKSUM = "AU3_PixelChecksum": UINT(RECT, INT);
    PIXEL_GET_COLOR = "AU3_PixelGetColor": INT(INT, INT);
    PIXEL_SEARCH = "AU3_PixelSearch": VOID(RECT, INT, INT, INT, POINT);
    PROCESS_CLOSE = "AU3_ProcessClose": INT(STR);
    PROCESS_EXISTS = "AU3_ProcessExists": INT(STR);
    PROCESS_SET_PRIORITY = "AU3_ProcessSetPriority": INT(STR, INT);
    PROCESS_WAIT = "AU3_ProcessWait": INT(STR, INT);
    PROCESS_WAIT_CLOSE = "AU3_ProcessWaitClose": INT(STR, INT);

    RUN = "AU3_Run": INT(STR, STR, INT);
    RUN_WAIT = "AU3_RunWait": INT(STR, STR, INT);
    RUN_AS = "AU3_RunAs": INT(STR, STR, STR, INT, STR, STR, INT);
    RUN_AS_WAIT = "AU3_RunAsWait": INT(STR, STR, STR, INT, STR, STR, INT);

    SEND = "AU3_Send": VOID(STR, INT);
    SHUTDOWN = "AU3_Shutdown": INT(INT);
    SLEEP = "AU3_Sleep": VOID(INT);
    STATUSBAR_GET_TEXT = "AU3_StatusbarGetText": INT(STR, STR, INT, BUF, INT);
    STATUSBAR_GET_TEXT_BY_HANDLE = "AU3_StatusbarGetTextByHandle": INT(HWND, INT, BUF, INT);

    TOOL_TIP = "AU3_ToolTip": VOID(STR, INT, INT);

    WIN_ACTIVATE = "AU3_WinActivate": INT(STR, STR);
    WIN_ACTIVATE_BY_HANDLE = "AU3_WinActivateByHandle": INT(HWND);
    WIN_ACTIVE = "AU3_WinActive": INT(STR, STR);
    WIN_ACTIVE_BY_HANDLE = "AU3_WinActiveByHandle": INT(HWND);
    WIN_CLOSE = "AU3_WinClose": INT(STR, STR);
    WIN_CLOSE_BY_HANDLE = "AU3_WinCloseByHandle": INT(HWND);
    WIN_EXISTS = "AU3_WinExists": INT(STR, STR);
    WIN_EXISTS_BY_HANDLE = "AU3_WinExistsByHandle": INT(HWND);
    WIN_GET_CARET_POS = "AU3_WinGetCaretPos": INT(POINT);
    WIN_GET_CLASS_LIST = "AU3_WinGetClassList": VOID(STR, STR, BUF, INT);
    WIN_GET_CLASS_LIST_BY_HANDLE = "AU3_WinGetClassListByHandle": VOID(HWND, BUF, INT);
    WIN_GET_CLIENT_SIZE = "AU3_WinGetClientSize": INT(STR, STR, RECT);
    WIN_GET_CLIENT_SIZE_BY_HANDLE = "AU3_WinGetClientSizeByHandle": INT(HWND, RECT);
    WIN_GET_HANDLE = "AU3_WinGetHandle": HWND(STR, STR);
    WIN_GET_HANDLE_AS_TEXT = "AU3_WinGetHandleAsText": VOID(STR, STR, BUF, INT);
    WIN_GET_POS = "AU3_WinGetPos": INT(STR, STR, RECT);
    WIN_GET_POS_BY_HANDLE = "AU3_WinGetPosByHandle": INT(HWND, RECT);
    WIN_GET_PROCESS = "AU3_WinGetProcess": DWORD(STR, STR);
    WIN_GET_PROCESS_BY_HANDLE = "AU3_WinGetProcessByHandle": DWORD(HWND);
    WIN_GET_STATE = "AU3_WinGetState": INT(STR, STR);
    WIN_GET_STATE_BY_HANDLE = "AU3_WinGetStateByHandle": INT(HWND);
    WIN_GET_TEXT = "AU3_WinGetText": VOID(STR, STR, BUF, INT);
    WIN_GET_TEXT_BY_HANDLE = "AU3_WinGetTextByHandle": VOID(HWND, BUF, INT);
    WIN_GET_TITLE = "AU3_WinGetTitle": VOID(STR, STR, BUF, INT);
    WIN_GET_TITLE_BY_HANDLE = "AU3_WinGetTitleByHandle": VOID(HWND, BUF, INT);
    WIN_KILL = "AU3_WinKill": INT(STR, STR);
    WIN_KILL_BY_HANDLE = "AU3_WinKillByHandle": INT(HWND);
    WIN_MENU_SELECT_ITEM = "AU3_WinMenuSelectItem": INT(STR, STR, STR, STR, STR, STR, STR, STR, STR, STR);
    WIN_MENU_SELECT_ITEM_BY_HANDLE = "AU3_WinMenuSelectItemByHandle": INT(HWND, STR, STR, STR, STR, STR, STR, STR, STR);
    WIN_MINIMIZE_ALL = "AU3_WinMinimizeAll": VOID();
    WIN_MINIMIZE_ALL_UNDO = "AU3_WinMinimizeAllUndo": VOID();
    WIN_MOVE = "AU3_WinMove": INT(STR, STR, INT, INT, INT, INT);
    WIN_MOVE_BY_HANDLE = "AU3_WinMoveByHandle": INT(HWND, INT, INT, INT, INT);
    WIN_SET_ON_TOP = "AU3_WinSetOnTop": INT(STR, STR, INT);
    WIN_SET_ON_TOP_BY_HANDLE = "AU3_WinSetOnTopByHandle": INT(HWND, INT);
    WIN_SET_STATE = "AU3_WinSetState": INT(STR, STR, INT);
    WIN_SET_STATE_BY_HANDLE = "AU3_WinSetStateByHandle": INT(HWND, INT);
    WIN_SET_TITLE = "AU3_WinSetTitle": INT(STR, STR, STR);
    WIN_SET_TITLE_BY_HANDLE = "AU3_WinSetTitleByHandle": INT(HWND, STR);
    WIN_SET_TRANS = "AU3_WinSetTrans": INT(STR, STR, INT);
    WIN_SET_TRANS_BY_HANDLE = "AU3_WinSetTransByHandle": INT(HWND, INT);
    WIN_WAIT = "AU3_WinWait": INT(STR, STR, INT);
    WIN_WAIT_BY_HANDLE = "AU3_WinWaitByHandle": INT(HWND, INT);
    WIN_WAIT_ACTIVE = "AU3_WinWaitActive": INT(STR, STR, INT);
    WIN_WAIT_ACTIVE_BY_HANDLE = "AU3_WinWaitActiveByHandle": INT(HWND, INT);
    WIN_WAIT_CLOSE = "AU3_WinWaitClose": INT(STR, STR, INT);
    WIN_WAIT_CLOSE_BY_HANDLE = "AU3_WinWaitCloseByHandle": INT(HWND, INT);
    WIN_WAIT_NOT_ACTIVE = "AU3_WinWaitNotActive": INT(STR, STR, INT);
    WIN_WAIT_NOT_ACTIVE_BY_HANDLE = "AU3_WinWaitNotActiveByHandle": INT(HWND, INT);
}

/// Look up an export by name.
pub fn find(name: &str) -> Option<&'static Signature> {
    ALL.iter().find(|sig| sig.name == name)
}
