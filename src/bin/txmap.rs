use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;

use txmap::alignment::DEFAULT_DELIMITER;
use txmap::batch;
use txmap::cli::{self, RunSummary};
use txmap::config::{self, DEFAULT_OUTPUT, RunConfig};
use txmap::input::{read_mapping_file, read_query_file};
use txmap::output::write_results_file;

#[derive(Parser)]
#[command(
    name = "txmap",
    about = "Translate transcript positions to genomic coordinates using CIGAR alignments"
)]
struct Cli {
    /// Path to a JSON run configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Mapping file: transcript ID, contig, start, CIGAR[, direction]
    #[arg(short = 'm', long = "map")]
    map: Option<PathBuf>,

    /// Query file: transcript ID, 0-based position
    #[arg(short = 'q', long = "queries")]
    queries: Option<PathBuf>,

    /// Output results file (.gz to compress)
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Field delimiter for all files ("tab" or "\t" for a tab)
    #[arg(short = 'd', long = "delimiter")]
    delimiter: Option<String>,
}

impl Cli {
    /// Merges command-line flags over the optional config file.
    fn into_run_config(self) -> Result<RunConfig> {
        let mut run = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => {
                let (Some(map), Some(queries)) = (&self.map, &self.queries) else {
                    bail!("either --config or both --map and --queries must be given");
                };
                RunConfig {
                    mapping_file: map.clone(),
                    query_file: queries.clone(),
                    output_file: PathBuf::from(DEFAULT_OUTPUT),
                    delimiter: DEFAULT_DELIMITER.to_string(),
                }
            }
        };

        if let Some(map) = self.map {
            run.mapping_file = map;
        }
        if let Some(queries) = self.queries {
            run.query_file = queries;
        }
        if let Some(out) = self.out {
            run.output_file = out;
        }
        if let Some(delimiter) = self.delimiter {
            run.delimiter = config::parse_delimiter(&delimiter);
        }
        run.validate()?;
        Ok(run)
    }
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();

    cli::banner("Translate");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let run = cli_args.into_run_config()?;

    cli::path_kv("Mapping file", &run.mapping_file);
    cli::path_kv("Query file", &run.query_file);
    cli::path_kv("Output file", &run.output_file);
    cli::kv("Delimiter", &format!("{:?}", run.delimiter));

    eprintln!();

    // ── Input ────────────────────────────────────────────
    cli::section("Input");

    let alignments = read_mapping_file(&run.mapping_file, &run.delimiter)
        .context("failed to load mapping file")?;
    cli::kv("Alignments", &alignments.len().to_string());

    let queries = read_query_file(&run.query_file, &run.delimiter)
        .context("failed to load query file")?;
    cli::kv("Queries", &queries.len().to_string());

    if queries.is_empty() {
        cli::warning("query file contains no queries");
    }

    eprintln!();

    // ── Translation ──────────────────────────────────────
    cli::section("Translation");

    let results = batch::resolve_all(&alignments, &queries).context("translation failed")?;
    cli::kv("Translated", &results.len().to_string());

    eprintln!();

    // ── Output ───────────────────────────────────────────
    cli::section("Output");

    write_results_file(&run.output_file, &results, &run.delimiter).with_context(|| {
        format!(
            "failed to write results: {}",
            run.output_file.display()
        )
    })?;
    cli::success(&format!(
        "wrote {} results to {}",
        results.len(),
        run.output_file.display()
    ));

    // ── Summary ──────────────────────────────────────────
    let summary = RunSummary {
        alignments: alignments.len(),
        queries: queries.len(),
        results: results.len(),
    };
    cli::print_summary(start, &summary);
    Ok(())
}
