fn main() {
    // Only run on Windows
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "ChatDock");
        res.set("FileDescription", "Quick access window for a hosted chat page");
        res.set("LegalCopyright", "Copyright 2026");
        if let Err(e) = res.compile() {
            eprintln!("Warning: Failed to compile Windows resources: {}", e);
        }
    }
}
