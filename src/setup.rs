use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use regex::Regex;

const MAIN_FILES: [&str; 4] = ["main.tsx", "main.jsx", "main.ts", "main.js"];

/// Checks the structural rules the host page must satisfy before the
/// virtual entry can be wired in: `index.html` exists, carries no
/// hand-written `/src/main.*` script tag, and no `src/main.*` file is
/// present. Violations accumulate into a single numbered report so the
/// user fixes everything in one pass.
pub fn check_project_setup(root: &Path) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    let index_path = root.join("index.html");
    if !index_path.exists() {
        errors.push("react-mpx: index.html not found in project root.".to_string());
    } else {
        let index_html = fs::read_to_string(&index_path)?;
        let main_script =
            Regex::new(r#"(?i)<script[^>]*src\s*=\s*["']/?src/main\.(tsx|jsx|ts|js)["'][^>]*>"#)?;

        if main_script.is_match(&index_html) {
            errors.push(
                "react-mpx: Found forbidden <script src=\"/src/main.*\"> in index.html.\n\
                 Remove this line from index.html; react-mpx injects its own entry point dynamically."
                    .to_string(),
            );
        }
    }

    let existing_main_files: Vec<String> = MAIN_FILES
        .iter()
        .filter(|file| root.join("src").join(file).exists())
        .map(|file| format!("src/{file}"))
        .collect();

    if !existing_main_files.is_empty() {
        errors.push(format!(
            "react-mpx: Found forbidden main file(s): {}.\n\
             Delete these files; react-mpx uses a virtual entry point and does not need a main file.",
            existing_main_files.join(", ")
        ));
    }

    if errors.is_empty() {
        return Ok(());
    }

    let mut message = String::from("react-mpx project setup check failed:\n");
    for (i, err) in errors.iter().enumerate() {
        message.push_str(&format!("\n{}. {}", i + 1, err));
    }
    message.push_str("\n\nFix the above issues and try again.");
    bail!(message);
}
