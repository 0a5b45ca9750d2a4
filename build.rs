#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    let mut res = WindowsResource::new();
    if std::path::Path::new("res/rcheckin.ico").exists() {
        res.set_icon("res/rcheckin.ico");
    }
    res.set("FileDescription", "rCheckin CLI")
        .set("ProductName", "rCheckin")
        .set("OriginalFilename", "rcheckin.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed version resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
