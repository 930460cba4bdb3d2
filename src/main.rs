use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use studio::runtime::RealRuntime;

/// studio - develop Composer packages in place
///
/// Replaces installed dependencies with symlinks to the local working copies
/// listed in studio.json, and restores the original contents on demand.
///
/// Examples:
///   studio link       # Symlink managed packages over their vendored copies
///   studio unlink     # Put the vendored copies back
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root directory (also via STUDIO_ROOT)
    #[arg(
        long = "project-root",
        short = 'p',
        env = "STUDIO_ROOT",
        value_name = "PATH",
        default_value = ".",
        global = true
    )]
    project_root: PathBuf,

    /// Configuration file (defaults to <project-root>/studio.json)
    #[arg(long = "config", short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Symlink managed packages to their local working copies
    Link(LinkArgs),

    /// Remove managed symlinks and restore the original contents
    Unlink,
}

#[derive(clap::Args, Debug)]
struct LinkArgs {
    /// Delete vendored contents instead of preserving them in .studio
    #[arg(long = "no-backup")]
    no_backup: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    match cli.command {
        Commands::Link(args) => studio::commands::link::run(
            &runtime,
            &cli.project_root,
            cli.config,
            !args.no_backup,
        ),
        Commands::Unlink => studio::commands::unlink::run(&runtime, &cli.project_root, cli.config),
    }
}
