//! Command-line resolution prover

use clap::Parser;
use refute::config::timeout_from_secs;
use refute::json::ProofReportJson;
use refute::{
    load_knowledge_base, verify_proof, Clause, Error, ProofReport, Prover, ProverConfig, Result,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "refute")]
#[command(about = "Prove a goal by resolution refutation over a clause knowledge base")]
#[command(version)]
struct Cli {
    /// Knowledge-base file, one clause per line (asked for on stdin when omitted)
    file: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Also write the result to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of clause pairs to resolve
    #[arg(long)]
    max_pairs: Option<usize>,

    /// Maximum number of stored clauses
    #[arg(long)]
    max_clauses: Option<usize>,

    /// Time limit in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Reject unifiers that bind a variable to a term containing it
    #[arg(long)]
    occurs_check: bool,

    /// Worker threads for pair evaluation
    #[arg(long)]
    workers: Option<usize>,

    /// JSON prover configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_internal() => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("refute={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<ProverConfig> {
    let mut config = match &cli.config {
        Some(path) => ProverConfig::from_json_file(path)?,
        None => ProverConfig::default(),
    };

    if let Some(n) = cli.max_pairs {
        config.max_pair_evaluations = n;
    }
    if let Some(n) = cli.max_clauses {
        config.max_clauses = n;
    }
    if let Some(secs) = cli.timeout {
        config.timeout = timeout_from_secs(secs).map_err(Error::Config)?;
    }
    if cli.occurs_check {
        config.occurs_check = true;
    }
    if let Some(n) = cli.workers {
        config.workers = n;
    }

    config.validate()?;
    Ok(config)
}

/// Ask for the knowledge-base path on stdin
fn prompt_for_path() -> Result<PathBuf> {
    print!("Knowledge base file (.txt or .cnf): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let path = line.trim();
    if path.is_empty() {
        return Err(Error::Config("no knowledge base file given".into()));
    }
    Ok(PathBuf::from(path))
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    debug!(?config, "prover configuration");

    let path = match &cli.file {
        Some(path) => path.clone(),
        None => prompt_for_path()?,
    };
    let clauses = load_knowledge_base(&path)?;
    info!(path = %path.display(), clauses = clauses.len(), "knowledge base loaded");

    let start = Instant::now();
    let mut prover = Prover::new(clauses, config)?;
    let result = prover.prove()?;
    let elapsed = start.elapsed();

    if let Some(proof) = result.proof() {
        if let Err(e) = verify_proof(proof, prover.repository()) {
            // Cyclic bindings accepted without the occurs-check do not re-check
            if prover.config().occurs_check {
                return Err(Error::Internal(format!("proof failed verification: {}", e)));
            }
            warn!("proof does not re-check without the occurs-check: {}", e);
        }
    }

    let report = ProofReport::from_result(&result);
    let repository = prover.repository();
    let inputs: Vec<Clause> = repository
        .iter()
        .take(repository.initial_clause_count())
        .map(|r| (*r.clause).clone())
        .collect();

    let rendered = if cli.json {
        let json = ProofReportJson::new(&report, &inputs, elapsed);
        serde_json::to_string_pretty(&json)?
    } else {
        render_text(&report, &inputs, &prover, elapsed)
    };

    println!("{}", rendered);

    if let Some(output) = &cli.output {
        std::fs::write(output, format!("{}\n", rendered))?;
        info!(path = %output.display(), "result written");
    }
    Ok(())
}

fn render_text(report: &ProofReport, inputs: &[Clause], prover: &Prover, elapsed: Duration) -> String {
    let stats = prover.stats();
    let mut text = format!("Knowledge base ({} clauses):\n", inputs.len());
    for (id, clause) in inputs.iter().enumerate() {
        text.push_str(&format!("  [{}] {}\n", id, clause));
    }
    if stats.inputs_skipped > 0 {
        text.push_str(&format!(
            "  ({} tautologous or repeated clauses skipped)\n",
            stats.inputs_skipped
        ));
    }
    text.push_str(&format!("\n{}\n", report));
    text.push_str(&format!(
        "Clauses: {}, pairs evaluated: {}, time: {:.3}s",
        prover.repository().len(),
        stats.pair_evaluations,
        elapsed.as_secs_f64()
    ));
    text
}
