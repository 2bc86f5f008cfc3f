//! Global hotkey bindings, fixed for the life of the process.
//!
//! `WM_HOTKEY` is delivered to the hidden host window; the OS reclaims
//! the registrations when the process exits.

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_CONTROL, MOD_SHIFT, VK_F1, VK_F2,
};

/// Create the shell window or flip its visibility.
pub const HOTKEY_TOGGLE: i32 = 1;
/// Force the shell visible, focused, and shown in the taskbar.
pub const HOTKEY_DOCK: i32 = 2;
/// Flip the stored theme and push it to the page.
pub const HOTKEY_THEME: i32 = 3;

struct Binding {
    id: i32,
    modifiers: HOT_KEY_MODIFIERS,
    vk: u32,
    chord: &'static str,
}

const BINDINGS: [Binding; 3] = [
    Binding {
        id: HOTKEY_TOGGLE,
        modifiers: HOT_KEY_MODIFIERS(MOD_CONTROL.0 | MOD_SHIFT.0),
        vk: 0x4F, // 'O'
        chord: "Ctrl+Shift+O",
    },
    Binding {
        id: HOTKEY_DOCK,
        modifiers: HOT_KEY_MODIFIERS(0),
        vk: VK_F1.0 as u32,
        chord: "F1",
    },
    Binding {
        id: HOTKEY_THEME,
        modifiers: HOT_KEY_MODIFIERS(0),
        vk: VK_F2.0 as u32,
        chord: "F2",
    },
];

/// Register all bindings on the host window. A failed registration
/// (typically a conflict with another app) is logged and skipped.
pub fn register(hwnd: HWND) {
    for binding in &BINDINGS {
        unsafe {
            if let Err(e) = RegisterHotKey(hwnd, binding.id, binding.modifiers, binding.vk) {
                log::warn!("failed to register global hotkey {}: {e}", binding.chord);
            }
        }
    }
}

pub fn unregister(hwnd: HWND) {
    for binding in &BINDINGS {
        unsafe {
            let _ = UnregisterHotKey(hwnd, binding.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_ids_are_distinct() {
        assert_ne!(HOTKEY_TOGGLE, HOTKEY_DOCK);
        assert_ne!(HOTKEY_DOCK, HOTKEY_THEME);
        assert_ne!(HOTKEY_TOGGLE, HOTKEY_THEME);
    }

    #[test]
    fn toggle_chord_is_ctrl_shift_o() {
        let toggle = &BINDINGS[0];
        assert_eq!(toggle.id, HOTKEY_TOGGLE);
        assert_eq!(toggle.modifiers.0, MOD_CONTROL.0 | MOD_SHIFT.0);
        assert_eq!(toggle.vk, 'O' as u32);
    }

    #[test]
    fn function_keys_carry_no_modifiers() {
        assert_eq!(BINDINGS[1].modifiers.0, 0);
        assert_eq!(BINDINGS[2].modifiers.0, 0);
    }
}
