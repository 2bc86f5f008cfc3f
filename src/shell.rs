//! The shell window: frameless, always-on-top, excluded from the taskbar,
//! hosting the remote chat page in an embedded WebView2 control.

use std::sync::Once;
use webview2_com::Microsoft::Web::WebView2::Win32::{ICoreWebView2, ICoreWebView2Controller};
use windows::core::{w, HSTRING, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Dwm::{
    DwmSetWindowAttribute, DWMWA_WINDOW_CORNER_PREFERENCE, DWMWCP_ROUND,
    DWM_WINDOW_CORNER_PREFERENCE,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetSystemMetrics, GetWindowLongPtrW,
    IsWindowVisible, LoadCursorW, RegisterClassExW, SetForegroundWindow, SetWindowLongPtrW,
    SetWindowPos, ShowWindow, SystemParametersInfoW, CS_HREDRAW, CS_VREDRAW, GWL_EXSTYLE,
    HWND_TOPMOST, IDC_ARROW, SM_CXSCREEN, SM_CYSCREEN, SPI_GETWORKAREA, SWP_FRAMECHANGED,
    SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SW_HIDE, SW_SHOW, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
    WA_INACTIVE, WM_ACTIVATE, WM_DESTROY, WM_SIZE, WNDCLASSEXW, WS_EX_APPWINDOW,
    WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};

use crate::layout::{self, WorkArea, SHELL_HEIGHT, SHELL_WIDTH};
use crate::pagemsg;
use crate::prefs::Theme;
use crate::{app, webview};

pub const SHELL_CLASS: PCWSTR = w!("ChatDockShellWindow");
pub const CHAT_URL: &str = "https://chatgpt.com/?model=auto";

static REGISTER_CLASS: Once = Once::new();

/// At most one of these exists at a time; the slot lives in the
/// application state and is cleared when the window is destroyed.
pub struct ShellWindow {
    hwnd: HWND,
    controller: ICoreWebView2Controller,
    webview: ICoreWebView2,
}

impl ShellWindow {
    /// Build the window hidden at its anchored position, attach the
    /// webview, and queue the post-load page messages.
    pub fn create(
        theme: Theme,
        user_data: Option<serde_json::Value>,
    ) -> webview2_com::Result<ShellWindow> {
        let hwnd = create_shell_hwnd().map_err(webview2_com::Error::WindowsError)?;

        let mut on_load = vec![pagemsg::set_theme(theme)];
        if let Some(data) = user_data {
            on_load.push(pagemsg::load_user_data(&data));
        }

        let (controller, webview) = match webview::attach(hwnd, CHAT_URL, on_load) {
            Ok(pair) => pair,
            Err(e) => {
                unsafe {
                    let _ = DestroyWindow(hwnd);
                }
                return Err(e);
            }
        };

        Ok(ShellWindow {
            hwnd,
            controller,
            webview,
        })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn is_visible(&self) -> bool {
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    pub fn show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOW);
        }
        self.focus();
    }

    pub fn hide(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    pub fn toggle_visibility(&self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }

    pub fn focus(&self) {
        unsafe {
            let _ = SetForegroundWindow(self.hwnd).ok();
        }
    }

    pub fn include_in_taskbar(&self) {
        set_taskbar_visibility(self.hwnd, true);
    }

    /// Push a JSON web message to the loaded page.
    pub fn post_to_page(&self, json: &str) {
        unsafe {
            if let Err(e) = self.webview.PostWebMessageAsJson(&HSTRING::from(json)) {
                log::warn!("failed to post message to page: {e}");
            }
        }
    }

    pub fn resize_to_client(&self) {
        webview::fit_to_client(self.hwnd, &self.controller);
    }

    /// Tear down the webview and the window. Used on app exit; a window
    /// closed by the user destroys itself and only the slot is cleared.
    pub fn destroy(self) {
        unsafe {
            let _ = self.controller.Close();
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

/// Flip the taskbar-skip extended style. `WS_EX_TOOLWINDOW` keeps the
/// window out of the task switcher; `WS_EX_APPWINDOW` forces it in.
pub(crate) fn set_taskbar_visibility(hwnd: HWND, show: bool) {
    unsafe {
        let ex = GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32;
        let ex = if show {
            (ex & !WS_EX_TOOLWINDOW.0) | WS_EX_APPWINDOW.0
        } else {
            (ex & !WS_EX_APPWINDOW.0) | WS_EX_TOOLWINDOW.0
        };
        SetWindowLongPtrW(hwnd, GWL_EXSTYLE, ex as isize);
        let _ = SetWindowPos(
            hwnd,
            HWND_TOPMOST,
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE | SWP_FRAMECHANGED,
        );
    }
}

fn primary_work_area() -> WorkArea {
    unsafe {
        let mut rect = RECT::default();
        if SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut rect as *mut RECT as *mut _),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
        .is_ok()
        {
            WorkArea {
                left: rect.left,
                top: rect.top,
                right: rect.right,
                bottom: rect.bottom,
            }
        } else {
            WorkArea {
                left: 0,
                top: 0,
                right: GetSystemMetrics(SM_CXSCREEN),
                bottom: GetSystemMetrics(SM_CYSCREEN),
            }
        }
    }
}

fn create_shell_hwnd() -> windows::core::Result<HWND> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        REGISTER_CLASS.call_once(|| {
            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(shell_window_proc),
                hInstance: hinstance.into(),
                hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
                lpszClassName: SHELL_CLASS,
                ..Default::default()
            };
            RegisterClassExW(&wc);
        });

        let (x, y) = layout::shell_origin(primary_work_area());

        // Hidden by default; the toggle hotkey or the dock hotkey shows it.
        let hwnd = CreateWindowExW(
            WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
            SHELL_CLASS,
            w!("ChatDock"),
            WS_POPUP,
            x,
            y,
            SHELL_WIDTH,
            SHELL_HEIGHT,
            None,
            None,
            hinstance,
            None,
        )?;

        let corners: DWM_WINDOW_CORNER_PREFERENCE = DWMWCP_ROUND;
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWA_WINDOW_CORNER_PREFERENCE,
            &corners as *const DWM_WINDOW_CORNER_PREFERENCE as *const _,
            std::mem::size_of::<DWM_WINDOW_CORNER_PREFERENCE>() as u32,
        );

        Ok(hwnd)
    }
}

unsafe extern "system" fn shell_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_ACTIVATE => {
            // Losing focus hides the window and re-excludes it from the
            // taskbar. Handled with raw hwnd ops so the handler stays
            // safe to run re-entrantly from show/hide calls. Activation
            // keeps the default focus handling.
            if (wparam.0 & 0xFFFF) as u32 == WA_INACTIVE {
                let _ = ShowWindow(hwnd, SW_HIDE);
                set_taskbar_visibility(hwnd, false);
                return LRESULT(0);
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        WM_SIZE => {
            app::on_shell_resized(hwnd);
            LRESULT(0)
        }
        WM_DESTROY => {
            app::on_shell_destroyed(hwnd);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
