use std::env;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;

use react_mpx::bundler;
use react_mpx::cli::{Cli, Command};
use react_mpx::plugin::MuxPlugin;
use react_mpx::{project, prompt, setup};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{err}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let root = env::current_dir()?;
    match cli.command {
        Command::Dev { project, src } => dev(root, project, &src).await,
        Command::Build { project, src } => build(root, project, &src).await,
        Command::Check => check(&root),
    }
}

struct PickedProject {
    name: String,
    file_name: String,
    src_dir: String,
}

/// Front half shared by dev and build: setup check, discovery, then
/// selection by flag or prompt. `None` means the prompt was cancelled
/// and the command should exit quietly.
fn pick_project(
    root: &Path,
    requested: Option<String>,
    src: &str,
) -> Result<Option<PickedProject>> {
    setup::check_project_setup(root)?;
    let src_dir = project::normalized_project_dir(root, src)?;

    let projects = project::available_projects(root, &src_dir)?;
    if projects.is_empty() {
        bail!("No projects found in the directory: {src_dir}");
    }

    let name = match requested {
        Some(name) => {
            project::validate_project(&name, &projects)?;
            name
        }
        None => match prompt::select_project(&projects)? {
            Some(name) => name,
            None => return Ok(None),
        },
    };

    let file_name = project::find_project_file(root, &src_dir, &name)?;
    Ok(Some(PickedProject {
        name,
        file_name,
        src_dir,
    }))
}

async fn dev(root: PathBuf, requested: Option<String>, src: &str) -> Result<()> {
    let Some(picked) = pick_project(&root, requested, src)? else {
        return Ok(());
    };

    let plugin = MuxPlugin::new(&picked.file_name, &picked.src_dir, root.clone());
    bundler::serve::serve(Box::new(plugin), root, &picked.name).await
}

async fn build(root: PathBuf, requested: Option<String>, src: &str) -> Result<()> {
    let Some(picked) = pick_project(&root, requested, src)? else {
        return Ok(());
    };

    let out_dir = project::ensure_dist_clean(&root, &picked.name)?;
    let plugin = MuxPlugin::new(&picked.file_name, &picked.src_dir, root);
    bundler::build::build(&plugin, &out_dir)?;

    println!("\n✨ Built project \"{}\"\n", picked.name.bold());
    Ok(())
}

fn check(root: &Path) -> Result<()> {
    setup::check_project_setup(root)?;
    println!("{}", "✅ Project is ready for react-mpx!".green());
    Ok(())
}
