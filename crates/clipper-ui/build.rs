// Windows executable metadata. No-op for other targets.
fn main() {
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }
    let mut res = winresource::WindowsResource::new();
    res.set("FileDescription", "Video Data Clipper");
    res.set("ProductName", "Video Data Clipper");
    res.set("OriginalFilename", "video-clipper.exe");
    if let Err(e) = res.compile() {
        println!("cargo:warning=winresource: {e}");
    }
}
