use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Trunk post-build hook: make the staged page load its bundle relatively so
/// it can be served from any sub-path.
fn main() {
    let Ok(staging_dir) = env::var("TRUNK_STAGING_DIR") else {
        eprintln!("TRUNK_STAGING_DIR is not set; run this as a Trunk hook");
        process::exit(1);
    };

    // Output name configured in Trunk.toml.
    let staged_html_path = PathBuf::from(staging_dir).join("portal.html");

    let html = match fs::read_to_string(&staged_html_path) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", staged_html_path.display());
            process::exit(1);
        }
    };

    let html = html
        .replace("/portal-scene-engine.js", "./portal-scene-engine.js")
        .replace("/portal-scene-engine_bg.wasm", "./portal-scene-engine_bg.wasm");

    if let Err(e) = fs::write(&staged_html_path, html) {
        eprintln!("Failed to write {}: {e}", staged_html_path.display());
        process::exit(1);
    }
}
