use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use filetally_counter::CounterConfig;
use filetally_files::FileManager;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "filetally")]
#[command(about = "File management with concurrent word counting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Managed directory
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List text files in the managed directory
    List,

    /// Create (or overwrite) a text file
    Create(CreateArgs),

    /// Delete a file
    Delete(DeleteArgs),

    /// Delete files whose content duplicates another's
    Dedupe,

    /// List files whose content contains a keyword
    Search(SearchArgs),

    /// Count the most frequent words in a file
    Count(CountArgs),
}

#[derive(Args)]
struct CreateArgs {
    /// File name inside the managed directory
    name: String,

    /// File content (read from stdin when omitted)
    content: Option<String>,
}

#[derive(Args)]
struct DeleteArgs {
    /// File name inside the managed directory
    name: String,
}

#[derive(Args)]
struct SearchArgs {
    /// Substring to look for
    keyword: String,
}

#[derive(Args)]
struct CountArgs {
    /// File name inside the managed directory
    name: String,

    /// Number of pool workers
    #[arg(short = 't', long, default_value_t = 4)]
    threads: usize,

    /// Maximum number of entries in the result
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Drain timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Include run statistics in the output
    #[arg(long)]
    stats: bool,
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn print_names(names: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(names)?);
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let manager = FileManager::new(&cli.dir)
        .with_context(|| format!("opening managed directory {}", cli.dir.display()))?;

    match cli.command {
        Commands::List => {
            let names = manager.list_files()?;
            print_names(&names, cli.json)?;
        }
        Commands::Create(args) => {
            let content = match args.content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading content from stdin")?;
                    buf
                }
            };
            manager.create_file(&args.name, &content).await?;
        }
        Commands::Delete(args) => {
            manager.delete_file(&args.name).await?;
        }
        Commands::Dedupe => {
            let deleted = manager.delete_duplicates().await?;
            if deleted.is_empty() && !cli.json {
                log::info!("No duplicates found");
            }
            print_names(&deleted, cli.json)?;
        }
        Commands::Search(args) => {
            let names = manager.keyword_search(&args.keyword).await?;
            print_names(&names, cli.json)?;
        }
        Commands::Count(args) => {
            let config = CounterConfig {
                num_threads: args.threads,
                drain_timeout: Duration::from_secs(args.timeout_secs),
                top_k: args.top,
                ..CounterConfig::default()
            };
            let report = manager.count_words_with(&args.name, config).await?;
            if cli.json {
                if args.stats {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    println!("{}", serde_json::to_string_pretty(&report.top)?);
                }
            } else {
                for entry in &report.top {
                    println!("{entry}");
                }
                if args.stats {
                    let stats = &report.stats;
                    println!(
                        "{} lines, {} distinct words, {}ms{}",
                        stats.lines,
                        stats.distinct_words,
                        stats.time_ms,
                        if stats.complete { "" } else { " (partial)" }
                    );
                }
            }
        }
    }

    Ok(())
}
