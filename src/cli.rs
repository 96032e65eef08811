//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// polyblog route planner CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: polyblog.toml)
    #[arg(short = 'C', long, default_value = "polyblog.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared pipeline arguments for Build and Routes commands
#[derive(clap::Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Include draft posts
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub drafts: Option<bool>,

    /// Record internal links that have a translation in the post's language
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub translate_links: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site with a bilingual sample post
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Load all posts and write the route table to the output directory
    Build {
        #[command(flatten)]
        args: PipelineArgs,

        /// Run the pipeline without writing the route table
        #[arg(long)]
        dry_run: bool,
    },

    /// Load all posts and print the route table
    Routes {
        #[command(flatten)]
        args: PipelineArgs,

        /// Only print routes of this language
        #[arg(short, long)]
        lang: Option<String>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_routes(&self) -> bool {
        matches!(self.command, Commands::Routes { .. })
    }

    /// Pipeline arguments of the current command, if any.
    pub fn pipeline_args(&self) -> Option<&PipelineArgs> {
        match &self.command {
            Commands::Build { args, .. } | Commands::Routes { args, .. } => Some(args),
            Commands::Init { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from(["polyblog", "build", "--translate-links", "--dry-run"]);
        assert!(cli.is_build());
        let args = cli.pipeline_args().unwrap();
        assert_eq!(args.translate_links, Some(true));
        assert_eq!(args.drafts, None);
        assert!(matches!(cli.command, Commands::Build { dry_run: true, .. }));
    }

    #[test]
    fn test_parse_routes_lang() {
        let cli = Cli::parse_from(["polyblog", "-C", "site.toml", "routes", "--lang", "en"]);
        assert!(cli.is_routes());
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        assert!(matches!(&cli.command, Commands::Routes { lang: Some(l), .. } if l == "en"));
    }

    #[test]
    fn test_init_has_no_pipeline_args() {
        let cli = Cli::parse_from(["polyblog", "init", "blog"]);
        assert!(cli.is_init());
        assert!(cli.pipeline_args().is_none());
    }
}
