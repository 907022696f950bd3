use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::debug;
use pathfence::core::Config;
use pathfence::io::{FileReader, InputReader, StdinReader};
use pathfence::processing::{MatcherStrategy, PathExclusionFilter, SeparatorMode};
use pathfence::services::{FilterService, OutputMode};

#[derive(Parser)]
#[command(
    name = "pathfence",
    about = "Decide which paths a module resolver should skip, given a set of excluded directories",
    version
)]
struct Args {
    /// Project root that relative directories are resolved against (defaults to PATHFENCE_ROOT or the current directory)
    #[arg(long = "root")]
    root: Option<String>,

    /// Directory to exclude; may be repeated
    #[arg(short = 'd', long = "dir")]
    dirs: Vec<String>,

    /// File listing directories to exclude, one per line
    #[arg(long = "dirs-file")]
    dirs_file: Option<String>,

    /// Also exclude the native android/ios project folders
    #[arg(long = "native-defaults")]
    native_defaults: bool,

    /// Input file containing candidate paths (reads from stdin if not provided)
    #[arg(short = 'f', long = "file")]
    input_file: Option<String>,

    /// Walk the project root instead of reading candidate paths
    #[arg(long = "scan")]
    scan: bool,

    /// Compare roots without regard to letter case
    #[arg(long = "ignore-case")]
    ignore_case: bool,

    /// Treat backslashes as separators and accept drive-letter roots
    #[arg(long = "mixed-separators")]
    mixed_separators: bool,

    /// Matcher backing the filter
    #[arg(long = "strategy", value_enum, default_value_t = MatcherStrategy::Pattern)]
    strategy: MatcherStrategy,

    /// Which paths to print
    #[arg(long = "show", value_enum, default_value_t = OutputMode::Excluded)]
    show: OutputMode,

    /// Print the compiled exclusion pattern and exit
    #[arg(long = "print-pattern")]
    print_pattern: bool,

    /// Disable the summary line
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let mut dirs = args.dirs.clone();
    if let Some(ref dirs_file) = args.dirs_file {
        dirs.extend(FileReader::new(dirs_file).read_paths().await?);
    }

    let separators = if args.mixed_separators {
        SeparatorMode::Mixed
    } else {
        SeparatorMode::Posix
    };

    let mut builder = Config::builder()
        .project_root(args.root.as_deref(), true)
        .excluded_directories(&dirs, true)
        .ignore_case(args.ignore_case, true)
        .separator_mode(separators)
        .strategy(args.strategy)
        .show_progress(!args.quiet);
    if args.native_defaults {
        builder = builder.with_native_defaults();
    }
    let config = builder.build()?;
    debug!("Configuration: {:?}", config);

    let filter = PathExclusionFilter::from_config(&config)?;
    debug!("Using {}", filter.matcher_info());

    if args.print_pattern {
        match filter.pattern() {
            Some(pattern) => println!("{}", pattern),
            None if filter.directories().is_empty() => {
                eprintln!("No excluded directories configured; nothing is excluded.")
            }
            None => {
                for root in filter.directories().roots() {
                    println!("{}", root);
                }
            }
        }
        return Ok(());
    }

    let reader: Box<dyn InputReader> = match &args.input_file {
        Some(file_path) => Box::new(FileReader::new(file_path)),
        None => Box::new(StdinReader::new()),
    };

    let service = FilterService::new(filter, reader, config, args.show);
    if args.scan {
        service.scan().await?;
    } else {
        service.run().await?;
    }

    Ok(())
}
