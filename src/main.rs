#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(target_os = "windows")]
fn main() -> std::process::ExitCode {
    use chatdock::prefs::JsonPrefStore;
    use chatdock::{app, instance, startup};
    use std::process::ExitCode;
    use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
    use windows::Win32::UI::HiDpi::{
        SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }

    if !instance::acquire() {
        log::info!("another instance is already running; deferring to it");
        instance::notify_existing();
        return ExitCode::SUCCESS;
    }

    #[cfg(feature = "elevate")]
    {
        use chatdock::elevation;
        if !elevation::is_elevated() {
            if elevation::relaunch_elevated() {
                return ExitCode::SUCCESS;
            }
            log::warn!("elevated relaunch failed; continuing as a standard user");
        }
    }

    unsafe {
        let _ = CoInitializeEx(None, COINIT_APARTMENTTHREADED);
    }

    // Store failure is explicit: without preferences the window never
    // appears, so exit instead of limping along.
    let prefs = match JsonPrefStore::open() {
        Ok(store) => store,
        Err(e) => {
            log::error!("cannot open preference store: {e}");
            return ExitCode::FAILURE;
        }
    };

    startup::ensure_autostart();

    let code = match app::run(Box::new(prefs)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    };

    unsafe {
        CoUninitialize();
    }
    code
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("chatdock is a Windows application");
}
