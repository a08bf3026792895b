use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub struct OutputOpts {
    pub pretty: bool,
}

impl Default for OutputOpts {
    fn default() -> Self {
        Self { pretty: true }
    }
}

pub fn load_tree(path: &Path) -> Result<Value> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

pub fn render_tree(value: &Value, opts: OutputOpts) -> Result<String> {
    let s = if opts.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(s)
}

pub fn save_tree(path: &Path, value: &Value, opts: OutputOpts) -> Result<()> {
    let mut s = render_tree(value, opts)?;
    s.push('\n');
    fs::write(path, s)?;
    tracing::debug!(path = %path.display(), "wrote tree");
    Ok(())
}

// Copy `path` to `<stem>_<timestamp>.<ext>.bak` next to it (non-destructive).
pub fn backup_file(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file").into());
    }
    let parent = path.parent().unwrap_or(Path::new("."));
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("tree");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("json");
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let dest = parent.join(format!("{}_{}.{}.bak", stem, ts, ext));
    fs::copy(path, &dest)?;
    tracing::info!(from = %path.display(), to = %dest.display(), "backup written");
    Ok(dest)
}
