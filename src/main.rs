use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use idsplit::cli::output::{self, OutputFormat, SplitRecord};
use idsplit::{Config, FrequencyTable, KnowledgeBase, OracleSet, SplitterKind};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "idsplit")]
#[command(version, about = "Split program identifiers into words", long_about = None)]
struct Cli {
    /// Identifiers to split
    #[arg(value_name = "IDENTIFIERS")]
    identifiers: Vec<String>,

    /// Read identifiers from a file, one per line ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Splitter to use (see --list); defaults to the configured flavor
    #[arg(short, long, global = true)]
    splitter: Option<SplitterKind>,

    /// List available splitters
    #[arg(short, long)]
    list: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Directory holding frequencies.tsv.gz and dictionary.fst
    #[arg(long, env = "IDSPLIT_DATA_DIR", value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Frequency table mined from the code base being analyzed
    #[arg(long, value_name = "FILE", global = true)]
    local_freq: Option<PathBuf>,

    /// Log splitting decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Measure accuracy against oracle files (append ":lower" to compare lowercased)
    Eval {
        /// Files of identifier<TAB>tok,tok,... rows
        #[arg(required = true, value_name = "ORACLE")]
        oracles: Vec<String>,

        /// Exit with code 0 even if some identifiers are split differently
        #[arg(long)]
        no_fail: bool,
    },
    /// Show knowledge-base statistics
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "idsplit", &mut io::stdout());
        return Ok(());
    }

    if cli.list {
        output::print_splitter_list(!cli.no_color);
        return Ok(());
    }

    let config = Config::load(cli.data_dir.clone())?;
    let kind = cli
        .splitter
        .unwrap_or_else(|| SplitterKind::from(config.splitter.flavor));
    let local = cli
        .local_freq
        .as_deref()
        .map(FrequencyTable::load_from_path)
        .transpose()?;
    debug!(splitter = %kind, local = local.is_some(), "configured");

    match &cli.command {
        Some(Commands::Eval { oracles, no_fail }) => {
            let split = kind.build(&config, local.as_ref())?;
            let mut evaluations = Vec::with_capacity(oracles.len());
            for source in oracles {
                let set = OracleSet::load(source)?;
                evaluations.push(set.evaluate(&split));
            }
            output::print_evaluations(&evaluations, !cli.no_color, &cli.format)?;

            let failed = evaluations.iter().any(|e| !e.failures.is_empty());
            if failed && !no_fail {
                std::process::exit(1);
            }
            return Ok(());
        }
        Some(Commands::Info) => {
            let paths = config.data_paths()?;
            let kb = KnowledgeBase::shared(&paths)?;
            return output::print_info(kb, &paths, !cli.no_color, &cli.format);
        }
        None => {}
    }

    let identifiers = collect_identifiers(&cli.identifiers, cli.file.as_deref())?;
    if identifiers.is_empty() {
        anyhow::bail!("No identifiers specified. Use --help for usage information.");
    }

    let split = kind.build(&config, local.as_ref())?;
    let records: Vec<SplitRecord> = identifiers
        .into_iter()
        .map(|identifier| {
            let tokens = split(&identifier);
            SplitRecord { identifier, tokens }
        })
        .collect();

    output::print_splits(&records, !cli.no_color, &cli.format)
}

fn collect_identifiers(positional: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut identifiers = positional.to_vec();

    if let Some(path) = file {
        let contents = if path == Path::new("-") {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read identifiers from stdin")?;
            buffer
        } else {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?
        };
        identifiers.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    Ok(identifiers)
}
