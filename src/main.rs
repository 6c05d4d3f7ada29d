//! Binary entry point: train a set of finite-context models against a
//! reference sequence and report the mixed-model average entropy of a
//! target sequence.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rfcm::log::set_display_level;
use rfcm::Engine;

/// Estimate the entropy of a target DNA sequence under one or more
/// finite-context models trained against a reference sequence.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Reference sequence to train models against.
    #[arg(long)]
    reference: PathBuf,

    /// Target sequence to estimate the entropy of.
    #[arg(long)]
    target: PathBuf,

    /// Model spec: "M1:M2:...", each `ir,k,alpha,gamma` or
    /// `ir,w_log2,d,k,alpha,gamma`, optionally suffixed `/k_tol,thresh,alpha_tol,gamma_tol`
    /// for a tolerant sub-model.
    #[arg(long, default_value = "0,2,1.0,0.99")]
    models: String,

    /// Training worker threads. Defaults to the number of available cores.
    #[arg(long)]
    nthr: Option<usize>,

    /// Seed for every probabilistic counter store's PRNG.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Verbosity: 0 = silent, 1 = errors only, 2 = normal, 3 = verbose.
    #[arg(long, default_value_t = 2)]
    verbosity: u32,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_display_level(cli.verbosity);

    let nthr = cli
        .nthr
        .unwrap_or_else(rfcm::util::count_cores);

    rfcm::displaylevel!(3, "training models \"{}\" against {}", cli.models, cli.reference.display());

    let mut engine = match Engine::build(&cli.models, &cli.reference, nthr, cli.seed) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("rfcm: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let entropy = match engine.average_entropy(&cli.target) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("rfcm: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    println!("{entropy:.6}");
    ExitCode::SUCCESS
}
