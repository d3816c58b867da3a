mod commands;
mod diagnostics;
mod exclusions;
mod info;
mod watch;

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use wikiref::types::FileType;

use crate::commands::OutputFormat;

#[derive(Parser)]
#[command(name = "wikiref", version, about = "Resolve markdown and wiki links across a repository and its GitHub wiki")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Project directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    root: PathBuf,
    /// Log resolution decisions to stderr (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify that every link in every markdown file resolves to exactly one tracked file
    Check {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Manage files marked as not under version control
    Exclude {
        #[command(subcommand)]
        action: ExcludeAction,
    },
    /// List the files known to the project
    Files {
        /// Only list files of these types
        #[arg(long = "type", value_enum)]
        file_types: Vec<FileTypeArg>,
    },
    /// Output the reference document (syntax, config, exit codes, current state)
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what a link resolves to
    Resolve {
        /// Link text as written, e.g. `../Readme`, `Page.md#intro`, `Space In Name`
        link: String,
        /// Markdown file the link is written in
        #[arg(long)]
        from: PathBuf,
        /// Treat the link as a `[[wiki page]]` reference
        #[arg(long)]
        wiki: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List repository roots, most nested first
    Roots,
    /// Watch the project and re-run check on every change
    Watch {
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum ExcludeAction {
    /// Mark a file (path relative to the project) as not under version control
    Add {
        /// File path
        path: String,
    },
    /// List excluded files
    List,
    /// Put a file back under version control
    Remove {
        /// File path
        path: String,
    },
}

/// `--type` values.
#[derive(Clone, Copy, ValueEnum)]
enum FileTypeArg {
    /// Images (png, jpg, gif, svg, ...)
    Image,
    /// Markdown documents (md, markdown, mkd)
    Markdown,
    /// Everything else
    Other,
}

impl From<FileTypeArg> for FileType {
    fn from(arg: FileTypeArg) -> Self {
        return match arg {
            FileTypeArg::Image => Self::Image,
            FileTypeArg::Markdown => Self::Markdown,
            FileTypeArg::Other => Self::Other,
        };
    }
}

/// Initialize `env_logger`: `RUST_LOG` wins, otherwise `-v` picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let root = cli.root;

    let result = match cli.command {
        Commands::Check { format } => commands::check(&root, format),
        Commands::Exclude { action } => match action {
            ExcludeAction::Add { path } => exclusions::cmd_add(&root, &path).map(|()| return ExitCode::SUCCESS),
            ExcludeAction::List => exclusions::cmd_list(&root).map(|()| return ExitCode::SUCCESS),
            ExcludeAction::Remove { path } => exclusions::cmd_remove(&root, &path).map(|()| return ExitCode::SUCCESS),
        },
        Commands::Files { file_types } => {
            let types: HashSet<FileType> = file_types.into_iter().map(FileType::from).collect();
            commands::files(&root, &types).map(|()| return ExitCode::SUCCESS)
        },
        Commands::Info { json } => {
            info::run(&root, json);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Resolve {
            link,
            from,
            wiki,
            format,
        } => commands::resolve(&root, &link, &from, wiki, format),
        Commands::Roots => commands::roots(&root).map(|()| return ExitCode::SUCCESS),
        Commands::Watch { format } => watch::run(&root, format),
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(3_u8)
        },
    };
}
