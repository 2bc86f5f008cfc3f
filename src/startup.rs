//! Login auto-start registration via the per-user Run key.

use std::env;
use windows::core::{w, PCWSTR};
use windows::Win32::System::Registry::{
    RegCloseKey, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW, HKEY, HKEY_CURRENT_USER,
    KEY_READ, KEY_SET_VALUE, REG_SZ,
};

const RUN_KEY: PCWSTR = w!(r"Software\Microsoft\Windows\CurrentVersion\Run");
const APP_NAME: PCWSTR = w!("ChatDock");

/// Register the current executable for login auto-start if it is not
/// registered yet. There is no unregistration path; failures are logged
/// and the app keeps running.
pub fn ensure_autostart() {
    if is_autostart_enabled() {
        return;
    }
    register_autostart();
}

fn is_autostart_enabled() -> bool {
    unsafe {
        let mut hkey: HKEY = HKEY::default();
        if RegOpenKeyExW(HKEY_CURRENT_USER, RUN_KEY, 0, KEY_READ, &mut hkey).is_ok() {
            let result = RegQueryValueExW(hkey, APP_NAME, None, None, None, None).is_ok();
            let _ = RegCloseKey(hkey);
            return result;
        }
    }
    false
}

fn register_autostart() {
    unsafe {
        let mut hkey: HKEY = HKEY::default();
        if RegOpenKeyExW(HKEY_CURRENT_USER, RUN_KEY, 0, KEY_SET_VALUE, &mut hkey).is_err() {
            log::warn!("could not open the Run key; auto-start not registered");
            return;
        }

        match env::current_exe() {
            Ok(exe_path) => {
                let exe_path_wide: Vec<u16> = exe_path
                    .to_string_lossy()
                    .encode_utf16()
                    .chain(std::iter::once(0))
                    .collect();

                let written = RegSetValueExW(
                    hkey,
                    APP_NAME,
                    0,
                    REG_SZ,
                    Some(&exe_path_wide.align_to::<u8>().1),
                );
                if let Err(e) = written.ok() {
                    log::warn!("failed to write auto-start value: {e}");
                }
            }
            Err(e) => log::warn!("could not resolve own executable path: {e}"),
        }
        let _ = RegCloseKey(hkey);
    }
}
