use std::io;

use anyhow::Result;

/// Presents a single-choice prompt over the discovered project names.
///
/// Cancellation (Esc or Ctrl-C) comes back as `Ok(None)` so the caller
/// decides how to exit; any other prompt failure propagates.
pub fn select_project(projects: &[String]) -> Result<Option<String>> {
    let mut select = cliclack::select("Select a project to run:");
    for name in projects {
        select = select.item(name.clone(), name, "");
    }

    match select.interact() {
        Ok(name) => Ok(Some(name)),
        Err(err) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(err.into()),
    }
}
