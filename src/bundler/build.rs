use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use super::{Bundle, BundlerConfig, Command, OutputChunk, Plugin};

/// Runs the build side of the hook contract: configure, resolve and
/// load the entry, hand the finished bundle to `generate_bundle`, then
/// write everything under `out_dir`.
///
/// The driver emits the entry module as a single content-hashed
/// ES-module chunk; module-graph resolution and transpilation of the
/// project sources stay with the host tool.
pub fn build(plugin: &dyn Plugin, out_dir: &Path) -> Result<Bundle> {
    let mut config = BundlerConfig {
        input: "index.html".to_string(),
        out_dir: out_dir.to_path_buf(),
    };
    plugin.config(&mut config, Command::Build);

    let resolved = plugin
        .resolve_id(&config.input)
        .unwrap_or_else(|| config.input.clone());
    let code = plugin
        .load(&resolved)
        .ok_or_else(|| anyhow!("react-mpx: no loader supplied source for entry \"{resolved}\""))?;

    let hash = format!("{:x}", md5::compute(code.as_bytes()));
    let mut bundle = Bundle::default();
    bundle.chunks.push(OutputChunk {
        file_name: format!("assets/entry-{}.js", &hash[..8]),
        facade_module_id: Some(resolved),
        code,
    });

    plugin.generate_bundle(&mut bundle)?;
    write_bundle(&bundle, &config.out_dir)?;
    Ok(bundle)
}

fn write_bundle(bundle: &Bundle, out_dir: &Path) -> Result<()> {
    let chunks = bundle.chunks.iter().map(|c| (&c.file_name, &c.code));
    let assets = bundle.assets.iter().map(|a| (&a.file_name, &a.source));

    for (file_name, contents) in chunks.chain(assets) {
        let path = out_dir.join(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
