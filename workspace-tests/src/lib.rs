//! Shared helpers for cross-crate tests

use std::fs;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;

/// Workspace root, one level above this crate
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".."))
}

// Helper to find a free port
pub async fn get_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// Minimal content tree with exec help and sources for every level
pub fn write_content_tree(root: &Path) -> std::io::Result<()> {
    fs::create_dir_all(root.join("vulnerabilities/exec/help"))?;
    fs::create_dir_all(root.join("vulnerabilities/exec/source"))?;
    fs::write(root.join("vulnerabilities/exec/help/help.html"), "<p>exec help</p>")?;
    for level in lab_common::SecurityLevel::ALL {
        fs::write(
            root.join(format!("vulnerabilities/exec/source/{}.rs", level)),
            format!("// {} level\n", level),
        )?;
    }
    Ok(())
}
