//! ChatDock: a borderless always-on-top quick access window for a hosted
//! chat page, toggled by global hotkeys.
//!
//! The Win32 glue (window lifecycle, hotkeys, single-instance guard,
//! auto-launch, elevation) only builds on Windows; the preference store,
//! placement math, and page messages are host-independent.

pub mod layout;
pub mod pagemsg;
pub mod prefs;
pub mod slot;

#[cfg(target_os = "windows")]
pub mod app;
#[cfg(all(target_os = "windows", feature = "elevate"))]
pub mod elevation;
#[cfg(target_os = "windows")]
pub mod hotkeys;
#[cfg(target_os = "windows")]
pub mod instance;
#[cfg(target_os = "windows")]
pub mod shell;
#[cfg(target_os = "windows")]
pub mod startup;
#[cfg(target_os = "windows")]
pub mod webview;
