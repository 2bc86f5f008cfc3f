//! Single-instance guard: a named mutex per application identity.
//!
//! The second process never creates a window; it posts a registered
//! message to the running instance so it surfaces its shell, then exits.

use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{ERROR_ALREADY_EXISTS, GetLastError, LPARAM, WPARAM};
use windows::Win32::System::Threading::CreateMutexW;
use windows::Win32::UI::WindowsAndMessaging::{FindWindowW, PostMessageW};

use crate::app;

const MUTEX_NAME: PCWSTR = w!("ChatDockSingleInstance");

/// Try to become the one running instance. The mutex handle is
/// intentionally held for the life of the process.
pub fn acquire() -> bool {
    unsafe {
        let _ = CreateMutexW(None, true, MUTEX_NAME);
        GetLastError() != ERROR_ALREADY_EXISTS
    }
}

/// Ask the running instance to surface its window.
pub fn notify_existing() {
    unsafe {
        match FindWindowW(app::HOST_CLASS, PCWSTR::null()) {
            Ok(hwnd) => {
                let _ = PostMessageW(hwnd, *app::WM_SHOW_EXISTING, WPARAM(0), LPARAM(0));
            }
            Err(_) => log::warn!("running instance found no host window to notify"),
        }
    }
}
