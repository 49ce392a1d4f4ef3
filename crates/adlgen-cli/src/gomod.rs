//! Locating the receiving Go module
//!
//! Generated packages import each other by `<module path>/<mid path>/<dir>`,
//! where the mid path is the output directory relative to the directory
//! holding `go.mod`.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// The module path declared by a go.mod file.
pub fn read_module_path(go_mod: impl AsRef<Path>) -> Result<String> {
    let go_mod = go_mod.as_ref();
    let content = std::fs::read_to_string(go_mod)
        .with_context(|| format!("Failed to read go.mod: {}", go_mod.display()))?;
    parse_module_line(&content)
        .with_context(|| format!("No module line in {}", go_mod.display()))
}

fn parse_module_line(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.split("//").next()?.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// The nearest go.mod at or above `start`.
pub fn find_go_mod(start: impl AsRef<Path>) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .map(|dir| dir.join("go.mod"))
        .find(|candidate| candidate.is_file())
}

/// `output` relative to `root`, joined with `/`. Empty when they coincide.
pub fn mid_path(root: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<String> {
    let root = normalize(&std::path::absolute(root.as_ref())?);
    let output = normalize(&std::path::absolute(output.as_ref())?);
    let rel = output.strip_prefix(&root).map_err(|_| {
        anyhow::anyhow!(
            "Output directory {} is not inside the Go module root {}",
            output.display(),
            root.display()
        )
    })?;
    let segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(segments.join("/"))
}

/// Drop `.` and resolve `..` lexically.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
