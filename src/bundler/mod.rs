//! The host bundler's plugin-hook contract and bundle data model, plus
//! the two drivers that invoke the hooks: a production build pipeline
//! and a dev server.

pub mod build;
pub mod serve;

use std::path::PathBuf;

use anyhow::Result;

/// Which pipeline the host is running the plugin under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Build,
}

/// Entry configuration handed to plugins before a pipeline starts.
#[derive(Debug, Clone)]
pub struct BundlerConfig {
    pub input: String,
    pub out_dir: PathBuf,
}

/// Context for the HTML transform hook.
#[derive(Debug, Clone, Copy)]
pub struct HtmlContext {
    /// True only when the HTML is being served by a live dev server.
    pub server: bool,
}

#[derive(Debug, Clone)]
pub struct OutputChunk {
    pub file_name: String,
    /// Module id this chunk is the compiled output of.
    pub facade_module_id: Option<String>,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct Asset {
    pub file_name: String,
    pub source: String,
}

/// Everything a build produced, handed to `generate_bundle` before
/// anything is written to disk.
#[derive(Debug, Default)]
pub struct Bundle {
    pub chunks: Vec<OutputChunk>,
    pub assets: Vec<Asset>,
}

impl Bundle {
    pub fn chunk_with_facade(&self, id: &str) -> Option<&OutputChunk> {
        self.chunks
            .iter()
            .find(|chunk| chunk.facade_module_id.as_deref() == Some(id))
    }

    /// Registers an asset, replacing any chunk or asset already emitted
    /// under the same file name.
    pub fn emit_asset(&mut self, file_name: impl Into<String>, source: impl Into<String>) {
        let file_name = file_name.into();
        self.chunks.retain(|chunk| chunk.file_name != file_name);
        self.assets.retain(|asset| asset.file_name != file_name);
        self.assets.push(Asset {
            file_name,
            source: source.into(),
        });
    }
}

/// The plugin hook contract. Every hook is independently optional (the
/// defaults do nothing); the host invokes them one at a time, never
/// concurrently, and a plugin instance serves exactly one invocation.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Adjust the bundler configuration before the pipeline starts.
    fn config(&self, _config: &mut BundlerConfig, _command: Command) {}

    /// Map a requested module id to the id it should load under.
    fn resolve_id(&self, _id: &str) -> Option<String> {
        None
    }

    /// Supply module source for ids this plugin owns.
    fn load(&self, _id: &str) -> Option<String> {
        None
    }

    /// Rewrite HTML before it is served or written.
    fn transform_index_html(&self, _html: &str, _ctx: &HtmlContext) -> Option<String> {
        None
    }

    /// Inspect and amend the finished bundle before it is written out.
    fn generate_bundle(&self, _bundle: &mut Bundle) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_asset_replaces_same_named_outputs() {
        let mut bundle = Bundle::default();
        bundle.chunks.push(OutputChunk {
            file_name: "index.html".to_string(),
            facade_module_id: None,
            code: "from the bundler".to_string(),
        });

        bundle.emit_asset("index.html", "from the plugin");

        assert!(bundle.chunks.is_empty());
        assert_eq!(bundle.assets.len(), 1);
        assert_eq!(bundle.assets[0].source, "from the plugin");
    }

    #[test]
    fn facade_lookup_matches_exact_id() {
        let mut bundle = Bundle::default();
        bundle.chunks.push(OutputChunk {
            file_name: "entry-abc123.js".to_string(),
            facade_module_id: Some("\0virtual:mux-entry.tsx".to_string()),
            code: String::new(),
        });

        assert!(bundle.chunk_with_facade("\0virtual:mux-entry.tsx").is_some());
        assert!(bundle.chunk_with_facade("virtual:mux-entry.tsx").is_none());
    }
}
