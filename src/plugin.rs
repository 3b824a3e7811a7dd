use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::bundler::{Bundle, BundlerConfig, Command, HtmlContext, Plugin};
use crate::entry;

/// Public id of the virtual entry module. The `.tsx` extension is the
/// most reliable signal that the synthesized source carries JSX.
pub const VIRTUAL_MODULE_ID: &str = "virtual:mux-entry.tsx";

/// NUL-prefixed id handed back from `resolve_id`, so the host never
/// looks for the virtual module on the filesystem.
pub const RESOLVED_VIRTUAL_MODULE_ID: &str = "\0virtual:mux-entry.tsx";

/// Bundler plugin wiring one project's virtual entry into the pipeline.
/// The entry source is synthesized once at construction and read-only
/// afterwards; a fresh instance is built for every command run.
pub struct MuxPlugin {
    root: PathBuf,
    entry_code: String,
}

impl MuxPlugin {
    pub fn new(project_file_name: &str, src_dir: &str, root: PathBuf) -> Self {
        Self {
            entry_code: entry::entry_code(project_file_name, src_dir),
            root,
        }
    }
}

impl Plugin for MuxPlugin {
    fn name(&self) -> &str {
        "react-mpx-entry"
    }

    fn config(&self, config: &mut BundlerConfig, command: Command) {
        // Production builds take the virtual entry as their sole input.
        if command == Command::Build {
            config.input = VIRTUAL_MODULE_ID.to_string();
        }
    }

    fn resolve_id(&self, id: &str) -> Option<String> {
        let is_virtual = id == VIRTUAL_MODULE_ID
            || id
                .strip_prefix(VIRTUAL_MODULE_ID)
                .is_some_and(|rest| rest.starts_with('?'));
        is_virtual.then(|| RESOLVED_VIRTUAL_MODULE_ID.to_string())
    }

    fn load(&self, id: &str) -> Option<String> {
        (id == RESOLVED_VIRTUAL_MODULE_ID).then(|| self.entry_code.clone())
    }

    fn transform_index_html(&self, html: &str, ctx: &HtmlContext) -> Option<String> {
        if !ctx.server {
            return None;
        }
        Some(html.replace(
            "</body>",
            &format!(
                "<script type=\"module\" src=\"/@id/__x00__{VIRTUAL_MODULE_ID}\"></script></body>"
            ),
        ))
    }

    fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        let chunk = bundle
            .chunk_with_facade(RESOLVED_VIRTUAL_MODULE_ID)
            .ok_or_else(|| anyhow!("react-mpx: Virtual entry chunk not found in bundle."))?;
        let script = format!(
            "<script type=\"module\" src=\"/{}\"></script></body>",
            chunk.file_name
        );

        let index_path = self.root.join("index.html");
        let user_html = fs::read_to_string(&index_path).map_err(|_| {
            anyhow!("react-mpx: index.html is required but not found in project root.")
        })?;

        bundle.emit_asset("index.html", user_html.replace("</body>", &script));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::OutputChunk;
    use tempfile::tempdir;

    fn plugin_for(root: PathBuf) -> MuxPlugin {
        MuxPlugin::new("foo.tsx", "src/projects", root)
    }

    #[test]
    fn build_config_takes_virtual_input() {
        let plugin = plugin_for(PathBuf::new());
        let mut config = BundlerConfig {
            input: "index.html".to_string(),
            out_dir: PathBuf::from("dist"),
        };

        plugin.config(&mut config, Command::Serve);
        assert_eq!(config.input, "index.html");

        plugin.config(&mut config, Command::Build);
        assert_eq!(config.input, VIRTUAL_MODULE_ID);
    }

    #[test]
    fn resolve_accepts_public_id_and_query_variants() {
        let plugin = plugin_for(PathBuf::new());

        let expected = Some(RESOLVED_VIRTUAL_MODULE_ID.to_string());
        assert_eq!(plugin.resolve_id("virtual:mux-entry.tsx"), expected);
        assert_eq!(plugin.resolve_id("virtual:mux-entry.tsx?v=1"), expected);
        assert_eq!(plugin.resolve_id("virtual:mux-entry.tsxx"), None);
        assert_eq!(plugin.resolve_id("src/projects/foo.tsx"), None);
    }

    #[test]
    fn load_answers_only_the_resolved_id() {
        let plugin = plugin_for(PathBuf::new());

        let code = plugin.load(RESOLVED_VIRTUAL_MODULE_ID).unwrap();
        assert!(code.contains("./src/projects/foo.tsx"));
        assert_eq!(plugin.load(VIRTUAL_MODULE_ID), None);
    }

    #[test]
    fn html_transform_only_runs_under_the_dev_server() {
        let plugin = plugin_for(PathBuf::new());
        let html = "<html><body></body></html>";

        assert_eq!(
            plugin.transform_index_html(html, &HtmlContext { server: false }),
            None
        );

        let transformed = plugin
            .transform_index_html(html, &HtmlContext { server: true })
            .unwrap();
        assert!(transformed.contains(
            "<script type=\"module\" src=\"/@id/__x00__virtual:mux-entry.tsx\"></script></body>"
        ));
    }

    #[test]
    fn generate_bundle_rewrites_index_html_against_the_virtual_chunk() -> Result<()> {
        let temp = tempdir()?;
        fs::write(
            temp.path().join("index.html"),
            "<html><body><div id=\"root\"></div></body></html>",
        )?;

        let plugin = plugin_for(temp.path().to_path_buf());
        let mut bundle = Bundle::default();
        bundle.chunks.push(OutputChunk {
            file_name: "entry-abc123.js".to_string(),
            facade_module_id: Some(RESOLVED_VIRTUAL_MODULE_ID.to_string()),
            code: String::new(),
        });

        plugin.generate_bundle(&mut bundle)?;

        let emitted: Vec<_> = bundle
            .assets
            .iter()
            .filter(|asset| asset.file_name == "index.html")
            .collect();
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0]
            .source
            .contains("<script type=\"module\" src=\"/entry-abc123.js\"></script></body>"));
        Ok(())
    }

    #[test]
    fn generate_bundle_fails_without_the_virtual_chunk() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.html"), "<body></body>").unwrap();

        let plugin = plugin_for(temp.path().to_path_buf());
        let err = plugin.generate_bundle(&mut Bundle::default()).unwrap_err();
        assert!(err.to_string().contains("Virtual entry chunk not found"));
    }

    #[test]
    fn generate_bundle_fails_without_index_html() {
        let temp = tempdir().unwrap();

        let plugin = plugin_for(temp.path().to_path_buf());
        let mut bundle = Bundle::default();
        bundle.chunks.push(OutputChunk {
            file_name: "entry-abc123.js".to_string(),
            facade_module_id: Some(RESOLVED_VIRTUAL_MODULE_ID.to_string()),
            code: String::new(),
        });

        let err = plugin.generate_bundle(&mut bundle).unwrap_err();
        assert!(err.to_string().contains("index.html is required"));
    }
}
