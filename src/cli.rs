use clap::{Parser, Subcommand};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "react-mpx",
    about = "Run multiple React projects from one codebase",
    version = "0.1.0"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Start dev server for a project
    Dev {
        /// project name (e.g., moshaar-sms)
        #[arg(short, long)]
        project: Option<String>,

        /// path to the projects directory
        #[arg(short, long, default_value = "src/projects")]
        src: String,
    },

    /// Build project for production
    Build {
        /// project name (e.g., moshaar-sms)
        #[arg(short, long)]
        project: Option<String>,

        /// path to the projects directory
        #[arg(short, long, default_value = "src/projects")]
        src: String,
    },

    /// Validate project setup for react-mpx compatibility
    Check,
}
