use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Recognized project source extensions, in resolution priority order.
pub const VALID_EXTENSIONS: [&str; 4] = ["tsx", "ts", "jsx", "js"];

/// Lists the project names found in `src_dir` (relative to `root`):
/// every file with a recognized extension, extension stripped. Order is
/// directory-enumeration order.
pub fn available_projects(root: &Path, src_dir: &str) -> Result<Vec<String>> {
    let abs_path = root.join(src_dir);
    if !abs_path.exists() {
        bail!("Projects directory not found: {}", abs_path.display());
    }

    let mut projects = Vec::new();
    for entry in fs::read_dir(&abs_path)? {
        let path = entry?.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !VALID_EXTENSIONS.contains(&ext) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            projects.push(stem.to_string());
        }
    }
    Ok(projects)
}

pub fn validate_project(name: &str, projects: &[String]) -> Result<()> {
    if !projects.iter().any(|p| p == name) {
        bail!(
            "Project \"{}\" not found.\nAvailable: {}",
            name,
            projects.join(", ")
        );
    }
    Ok(())
}

/// Resolves a discovered project name back to its concrete file name,
/// trying extensions in priority order. The name came from discovery, so
/// a miss here is a filesystem race and a hard error.
pub fn find_project_file(root: &Path, src_dir: &str, name: &str) -> Result<String> {
    let base = root.join(src_dir);
    for ext in VALID_EXTENSIONS {
        let file = format!("{name}.{ext}");
        if base.join(&file).exists() {
            return Ok(file);
        }
    }
    bail!(
        "Project \"{}\" not found in {} (tried {})",
        name,
        src_dir,
        VALID_EXTENSIONS.map(|ext| format!(".{ext}")).join(", ")
    );
}

/// Normalizes the projects directory to forward slashes and checks it
/// exists before any discovery runs against it.
pub fn normalized_project_dir(root: &Path, src: &str) -> Result<String> {
    let src_dir = src.replace('\\', "/");
    let abs_path = root.join(&src_dir);
    if !abs_path.exists() {
        bail!("Projects directory not found: {}", abs_path.display());
    }
    Ok(src_dir)
}

/// Clears any previous build output for `project`, returning the output
/// directory the new build should write into.
pub fn ensure_dist_clean(root: &Path, project: &str) -> Result<PathBuf> {
    let out_dir = root.join("dist").join(project);
    if out_dir.exists() {
        fs::remove_dir_all(&out_dir)?;
    }
    Ok(out_dir)
}
