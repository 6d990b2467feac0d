//! untable CLI - OCR table extraction to CSV

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untable::analysis::load_pages;
use untable::{
    tables_from_pages, BatchExtractor, BatchOptions, BlockGraph, LocalStore, PollOptions,
    ReplayService,
};

#[derive(Parser)]
#[command(name = "untable")]
#[command(version)]
#[command(about = "Reconstruct OCR-detected tables as values and scores CSV", long_about = None)]
struct Cli {
    /// Recorded analysis response (JSON)
    #[arg(value_name = "RESPONSE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage documents, run analysis jobs and write one CSV pair per table
    Extract {
        /// Documents to process, in order
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Directory of recorded responses, one `<stem>.json` per document
        #[arg(long, value_name = "DIR", env = "UNTABLE_RESPONSES")]
        responses: PathBuf,

        /// Root directory of the local object store
        #[arg(long, value_name = "DIR", env = "UNTABLE_STORE")]
        store: PathBuf,

        /// Staging container name
        #[arg(long, default_value = "construction-cost-survey")]
        bucket: String,

        /// Container location constraint
        #[arg(long, default_value = untable::batch::DEFAULT_REGION)]
        region: String,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "data/interim")]
        output: PathBuf,

        /// Seconds between status polls
        #[arg(long, default_value = "5")]
        poll_interval: u64,

        /// Give up on a job after this many seconds of polling
        #[arg(long)]
        max_wait: Option<u64>,

        /// Keep the staging container after the run
        #[arg(long)]
        keep_bucket: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert recorded responses straight to CSV files
    Render {
        /// Recorded analysis responses (JSON)
        #[arg(value_name = "RESPONSES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show job and block statistics of a recorded response
    Info {
        /// Recorded analysis response (JSON)
        #[arg(value_name = "RESPONSE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            inputs,
            responses,
            store,
            bucket,
            region,
            output,
            poll_interval,
            max_wait,
            keep_bucket,
            json,
        }) => {
            let mut poll = PollOptions::new().with_interval(Duration::from_secs(poll_interval));
            if let Some(secs) = max_wait {
                poll = poll.with_max_wait(Duration::from_secs(secs));
            }
            let mut options = BatchOptions::new(bucket)
                .with_region(region)
                .with_output_dir(output)
                .with_poll(poll);
            if keep_bucket {
                options = options.keep_container();
            }
            cmd_extract(&inputs, &responses, &store, options, json)
        }
        Some(Commands::Render { inputs, output }) => cmd_render(&inputs, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if a response is provided
            if let Some(input) = cli.input {
                cmd_render(&[input], cli.output.as_deref())
            } else {
                println!("{}", "Usage: untable <RESPONSE> [OUTPUT]".yellow());
                println!("       untable --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    inputs: &[PathBuf],
    responses: &Path,
    store: &Path,
    options: BatchOptions,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(store)?;
    let output_dir = options.output_dir.clone();

    let extractor = BatchExtractor::new(
        Arc::new(ReplayService::new(responses)),
        Arc::new(LocalStore::new(store)),
        options,
    );
    let summary = extractor.run(inputs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", summary);
    println!();
    let status = format!(
        "{} succeeded, {} failed, {} table(s) written to {}",
        summary.succeeded(),
        summary.failed(),
        summary.table_count(),
        output_dir.display()
    );
    if summary.failed() == 0 {
        println!("{}", status.green().bold());
    } else {
        println!("{}", status.yellow().bold());
    }

    Ok(())
}

fn cmd_render(inputs: &[PathBuf], output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut written = Vec::new();
    for input in inputs {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        pb.set_message(format!("Rendering {}...", stem));

        let pages = load_pages(&fs::read_to_string(input)?)?;
        let tables = tables_from_pages(pages)?;
        if tables.is_empty() {
            pb.println(format!("{} no tables in {}", "Skipped".yellow(), input.display()));
        }
        for table in &tables {
            let values = table.values_file_name(&stem);
            let scores = table.scores_file_name(&stem);
            fs::write(output_dir.join(&values), &table.values)?;
            fs::write(output_dir.join(&scores), &table.scores)?;
            written.push(values);
            written.push(scores);
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pages = load_pages(&fs::read_to_string(input)?)?;

    println!("{}", "Job Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Response pages".bold(), pages.len());
    if let Some(first) = pages.first() {
        println!("{}: {}", "Status".bold(), first.job_status);
        if let Some(ref message) = first.status_message {
            println!("{}: {}", "Message".bold(), message);
        }
        if let Some(count) = first.page_count() {
            println!("{}: {}", "Document pages".bold(), count);
        }
        for warning in &first.warnings {
            println!("{}: {}", "Warning".yellow().bold(), warning);
        }
    }

    let blocks: Vec<_> = pages.into_iter().flat_map(|page| page.blocks).collect();
    let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
    for block in &blocks {
        *by_kind.entry(block.block_type.to_string()).or_default() += 1;
    }
    let graph = BlockGraph::from_blocks(blocks)?;

    println!();
    println!("{}", "Block Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), graph.len());
    for (kind, count) in &by_kind {
        println!("  {}: {}", kind, count);
    }
    println!("{}: {}", "Tables".bold(), graph.table_count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untable".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("OCR table extraction to CSV");
    println!();
    println!("License: MIT");
}
