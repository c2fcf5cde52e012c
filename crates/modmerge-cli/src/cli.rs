//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// modmerge - Install mod mission files into a server mission without losing local edits
#[derive(Parser, Debug)]
#[command(name = "modmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install a mod's mission folder into a server mission folder
    ///
    /// JSON and XML files are merged into their existing counterparts,
    /// other files replace them. Replaced files are backed up as
    /// `<file>.<timestamp>.bak`.
    ///
    /// Examples:
    ///   modmerge install --target /srv/dayz/mpmissions/dayzOffline.chernarusplus
    ///   modmerge install --source ./dayzOffline.enoch --target ./server --dry-run
    Install(InstallArgs),

    /// Show which rule applies to a file
    Resolve {
        /// Path relative to the mission folder (e.g. db/types.xml)
        path: String,

        /// Rule configuration file (defaults to install_config.json/.toml in the current directory)
        #[arg(short, long, env = "MODMERGE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Merge a single source document into a target document
    Merge {
        /// Existing document to merge into
        target: PathBuf,

        /// Document whose content is merged in
        source: PathBuf,

        /// Rule configuration file
        #[arg(short, long, env = "MODMERGE_CONFIG")]
        config: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Mission-relative path used to pick the rule (defaults to the source file name)
        #[arg(long, value_name = "RELATIVE")]
        path: Option<String>,
    },
}

/// Arguments of the install command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InstallArgs {
    /// Mission folder shipped with the mod (discovered in the current directory if omitted)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Server mission folder (prompted for if omitted)
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Rule configuration file (defaults to install_config.json/.toml in the current directory)
    #[arg(short, long, env = "MODMERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Do not back up files before replacing them
    #[arg(long)]
    pub no_backup: bool,

    /// Output the install report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_flags() {
        let cli = Cli::parse_from([
            "modmerge",
            "install",
            "--source",
            "dayzOffline.enoch",
            "--target",
            "/srv/mission",
            "--dry-run",
            "--no-backup",
        ]);
        match cli.command {
            Commands::Install(args) => {
                assert_eq!(args.source, Some(PathBuf::from("dayzOffline.enoch")));
                assert_eq!(args.target, Some(PathBuf::from("/srv/mission")));
                assert!(args.dry_run);
                assert!(args.no_backup);
                assert!(!args.json);
            }
            other => panic!("expected install, got {other:?}"),
        }
    }

    #[test]
    fn parse_merge_positionals() {
        let cli = Cli::parse_from(["modmerge", "-v", "merge", "old.xml", "new.xml", "-o", "out.xml"]);
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Commands::Merge {
                target: PathBuf::from("old.xml"),
                source: PathBuf::from("new.xml"),
                config: None,
                output: Some(PathBuf::from("out.xml")),
                path: None,
            }
        );
    }
}
