//! Embedded Edge WebView2 control hosting the remote chat page.
//!
//! Bootstrap follows the webview2-com completed-handler pattern: each
//! async creation step pumps messages until its handler fires.

use std::sync::mpsc;
use webview2_com::Microsoft::Web::WebView2::Win32::{
    CreateCoreWebView2EnvironmentWithOptions, EventRegistrationToken, ICoreWebView2,
    ICoreWebView2Controller, ICoreWebView2Environment, ICoreWebView2EnvironmentOptions,
};
use webview2_com::{
    CoreWebView2EnvironmentOptions, CreateCoreWebView2ControllerCompletedHandler,
    CreateCoreWebView2EnvironmentCompletedHandler, Error, NavigationCompletedEventHandler,
};
use windows::core::{HSTRING, PCWSTR};
use windows::Win32::Foundation::{BOOL, E_POINTER, HWND, RECT};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

use crate::prefs;

/// Attach a WebView2 control to `hwnd`, navigate to `url`, and arrange
/// for `on_load` JSON messages to be posted to the page once navigation
/// succeeds.
pub fn attach(
    hwnd: HWND,
    url: &str,
    on_load: Vec<String>,
) -> webview2_com::Result<(ICoreWebView2Controller, ICoreWebView2)> {
    let environment = create_environment()?;
    let controller = create_controller(hwnd, &environment)?;

    let mut webview: Option<ICoreWebView2> = None;
    unsafe { controller.CoreWebView2(&mut webview) }.map_err(Error::WindowsError)?;
    let webview =
        webview.ok_or_else(|| Error::WindowsError(windows::core::Error::from(E_POINTER)))?;

    let handler = NavigationCompletedEventHandler::create(Box::new(move |webview, args| {
        let (Some(webview), Some(args)) = (webview, args) else {
            return Ok(());
        };
        let mut succeeded = BOOL::default();
        unsafe { args.IsSuccess(&mut succeeded)? };
        if succeeded.as_bool() {
            for message in &on_load {
                unsafe { webview.PostWebMessageAsJson(&HSTRING::from(message.as_str()))? };
            }
        }
        Ok(())
    }));
    let mut token = EventRegistrationToken::default();
    unsafe { webview.add_NavigationCompleted(&handler, &mut token) }
        .map_err(Error::WindowsError)?;

    fit_to_client(hwnd, &controller);
    unsafe { webview.Navigate(&HSTRING::from(url)) }.map_err(Error::WindowsError)?;

    Ok((controller, webview))
}

/// Size the control to the host window's client area.
pub fn fit_to_client(hwnd: HWND, controller: &ICoreWebView2Controller) {
    let mut rect = RECT::default();
    unsafe {
        if GetClientRect(hwnd, &mut rect).is_ok() {
            let _ = controller.SetBounds(rect);
        }
    }
}

fn create_environment() -> webview2_com::Result<ICoreWebView2Environment> {
    // Browser profile lives beside the preference file; hardware
    // acceleration stays off, matching the page's hosted configuration.
    let data_dir = prefs::project_dirs()
        .map(|dirs| HSTRING::from(dirs.data_dir().join("webview2").as_os_str()))
        .unwrap_or_default();

    let options: ICoreWebView2EnvironmentOptions =
        CoreWebView2EnvironmentOptions::default().into();
    unsafe { options.SetAdditionalBrowserArguments(&HSTRING::from("--disable-gpu")) }
        .map_err(Error::WindowsError)?;

    let (tx, rx) = mpsc::channel();
    CreateCoreWebView2EnvironmentCompletedHandler::wait_for_async_operation(
        Box::new(move |handler| unsafe {
            CreateCoreWebView2EnvironmentWithOptions(PCWSTR::null(), &data_dir, &options, &handler)
                .map_err(Error::WindowsError)
        }),
        Box::new(move |error_code, environment| {
            error_code?;
            tx.send(environment.ok_or_else(|| windows::core::Error::from(E_POINTER)))
                .expect("send over mpsc channel");
            Ok(())
        }),
    )?;
    rx.recv()
        .expect("receive over mpsc channel")
        .map_err(Error::WindowsError)
}

fn create_controller(
    hwnd: HWND,
    environment: &ICoreWebView2Environment,
) -> webview2_com::Result<ICoreWebView2Controller> {
    let environment = environment.clone();
    let (tx, rx) = mpsc::channel();
    CreateCoreWebView2ControllerCompletedHandler::wait_for_async_operation(
        Box::new(move |handler| unsafe {
            environment
                .CreateCoreWebView2Controller(hwnd, &handler)
                .map_err(Error::WindowsError)
        }),
        Box::new(move |error_code, controller| {
            error_code?;
            tx.send(controller.ok_or_else(|| windows::core::Error::from(E_POINTER)))
                .expect("send over mpsc channel");
            Ok(())
        }),
    )?;
    rx.recv()
        .expect("receive over mpsc channel")
        .map_err(Error::WindowsError)
}
