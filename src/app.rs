//! Application wiring: the hidden hotkey host window, the single-slot
//! shell registry, and the message loop.
//!
//! All mutable state is confined to the UI thread in a thread-local
//! `RefCell`; event handlers reach it through the helpers below instead
//! of ad-hoc globals.

use once_cell::sync::Lazy;
use std::cell::RefCell;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    PostQuitMessage, RegisterClassExW, RegisterWindowMessageW, TranslateMessage, CS_HREDRAW,
    CS_VREDRAW, MSG, WM_DESTROY, WM_HOTKEY, WNDCLASSEXW, WS_EX_TOOLWINDOW, WS_POPUP,
};

use crate::hotkeys;
use crate::pagemsg;
use crate::prefs::PreferenceStore;
use crate::shell::ShellWindow;
use crate::slot::{self, CreateAction, SlotState, ToggleAction};

pub const HOST_CLASS: PCWSTR = w!("ChatDockHost");

/// Cross-process message a second instance posts so the running one
/// surfaces its window.
pub static WM_SHOW_EXISTING: Lazy<u32> =
    Lazy::new(|| unsafe { RegisterWindowMessageW(w!("ChatDockShowExisting")) });

#[derive(Default)]
struct AppState {
    shell: Option<ShellWindow>,
    /// Set while a create request is bootstrapping its webview, which
    /// pumps the message queue before the slot is filled.
    creating: bool,
    prefs: Option<Box<dyn PreferenceStore>>,
}

impl AppState {
    fn slot_state(&self) -> SlotState {
        if self.shell.is_some() {
            SlotState::Live
        } else if self.creating {
            SlotState::Creating
        } else {
            SlotState::Empty
        }
    }
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run the app to completion: host window, hotkeys, shell window,
/// message loop, teardown.
pub fn run(prefs: Box<dyn PreferenceStore>) -> windows::core::Result<()> {
    STATE.with(|s| s.borrow_mut().prefs = Some(prefs));

    let host = create_host_window()?;
    hotkeys::register(host);

    create_shell();

    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
        hotkeys::unregister(host);
    }

    // Drop the shell before the host so its destroy callback finds the
    // slot already taken.
    if let Some(shell) = STATE.with(|s| s.borrow_mut().shell.take()) {
        shell.destroy();
    }
    if let Some(prefs) = STATE.with(|s| s.borrow_mut().prefs.take()) {
        prefs.save();
    }
    unsafe {
        let _ = DestroyWindow(host);
    }
    Ok(())
}

fn create_host_window() -> windows::core::Result<HWND> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(host_window_proc),
            hInstance: hinstance.into(),
            lpszClassName: HOST_CLASS,
            ..Default::default()
        };
        RegisterClassExW(&wc);

        // Hidden zero-size window that owns the hotkeys and receives the
        // second-instance message.
        CreateWindowExW(
            WS_EX_TOOLWINDOW,
            HOST_CLASS,
            w!("ChatDock Host"),
            WS_POPUP,
            0,
            0,
            0,
            0,
            None,
            None,
            hinstance,
            None,
        )
    }
}

unsafe extern "system" fn host_window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_HOTKEY => {
            on_hotkey(wparam.0 as i32);
            LRESULT(0)
        }
        m if m == *WM_SHOW_EXISTING => {
            surface_existing_shell();
            LRESULT(0)
        }
        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn on_hotkey(id: i32) {
    match id {
        hotkeys::HOTKEY_TOGGLE => toggle_shell(),
        hotkeys::HOTKEY_DOCK => dock_shell(),
        hotkeys::HOTKEY_THEME => toggle_theme(),
        _ => {}
    }
}

/// Toggle hotkey: create the window if none exists, else flip
/// visibility. A toggle delivered while creation is underway is dropped.
fn toggle_shell() {
    match STATE.with(|s| slot::on_toggle_request(s.borrow().slot_state())) {
        ToggleAction::Create => create_shell(),
        ToggleAction::Ignore => {}
        ToggleAction::FlipVisibility => STATE.with(|s| {
            if let Some(shell) = s.borrow().shell.as_ref() {
                shell.toggle_visibility();
            }
        }),
    }
}

/// Dock hotkey: force the shell visible, focused, and into the taskbar.
/// No-op when no window exists.
fn dock_shell() {
    STATE.with(|s| {
        if let Some(shell) = s.borrow().shell.as_ref() {
            shell.show();
            shell.focus();
            shell.include_in_taskbar();
        }
    });
}

/// Theme hotkey: flip the stored theme, then push it to the page if a
/// window is live.
fn toggle_theme() {
    let next = STATE.with(|s| {
        s.borrow_mut()
            .prefs
            .as_mut()
            .map(|prefs| prefs.toggle_theme())
    });
    let Some(next) = next else { return };
    STATE.with(|s| {
        if let Some(shell) = s.borrow().shell.as_ref() {
            shell.post_to_page(&pagemsg::set_theme(next));
        }
    });
}

/// Build the shell window, or focus the existing one instead of creating
/// a duplicate. WebView2 bootstrap pumps messages, so the slot is marked
/// as creating before the call and no borrow is held across it; a
/// request re-entering mid-pump sees the slot occupied and is dropped.
fn create_shell() {
    let action = STATE.with(|s| {
        let mut state = s.borrow_mut();
        let action = slot::on_create_request(state.slot_state());
        if action == CreateAction::Create {
            state.creating = true;
        }
        action
    });
    match action {
        CreateAction::Ignore => return,
        CreateAction::FocusExisting => {
            STATE.with(|s| {
                if let Some(shell) = s.borrow().shell.as_ref() {
                    shell.focus();
                }
            });
            return;
        }
        CreateAction::Create => {}
    }

    let snapshot = STATE.with(|s| {
        let state = s.borrow();
        state
            .prefs
            .as_ref()
            .map(|prefs| (prefs.theme(), prefs.user_data().cloned()))
    });
    let Some((theme, user_data)) = snapshot else {
        STATE.with(|s| s.borrow_mut().creating = false);
        return;
    };

    let result = ShellWindow::create(theme, user_data);
    STATE.with(|s| {
        let mut state = s.borrow_mut();
        state.creating = false;
        match result {
            Ok(shell) => state.shell = Some(shell),
            Err(e) => log::error!("failed to create shell window: {e:?}"),
        }
    });
}

/// Second-instance request: surface whatever window exists.
fn surface_existing_shell() {
    STATE.with(|s| {
        if let Some(shell) = s.borrow().shell.as_ref() {
            shell.show();
            shell.focus();
        }
    });
}

/// Called from the shell's `WM_SIZE`.
pub(crate) fn on_shell_resized(hwnd: HWND) {
    let _ = STATE.try_with(|s| {
        if let Ok(state) = s.try_borrow() {
            if let Some(shell) = state.shell.as_ref() {
                if shell.hwnd() == hwnd {
                    shell.resize_to_client();
                }
            }
        }
    });
}

/// Called from the shell's `WM_DESTROY`: clear the slot and quit, the
/// desktop equivalent of quitting when the last window closes.
pub(crate) fn on_shell_destroyed(hwnd: HWND) {
    let _ = STATE.try_with(|s| {
        if let Ok(mut state) = s.try_borrow_mut() {
            if state.shell.as_ref().map(ShellWindow::hwnd) == Some(hwnd) {
                state.shell = None;
                unsafe { PostQuitMessage(0) };
            }
        }
    });
}
