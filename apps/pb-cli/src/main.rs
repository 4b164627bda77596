use clap::{Parser, Subcommand};
use pb_chain::{ChainResult, Evaluation, evaluate, evaluation_to_json, load_yaml};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(about = "predbound CLI - evaluate chains of error-tracked arithmetic", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate chain file syntax and references
    Check {
        /// Path to the chain YAML file
        chain_path: PathBuf,
    },
    /// Evaluate a chain and report whether its sign is certain
    Eval {
        /// Path to the chain YAML file
        chain_path: PathBuf,
        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
        /// Print value and bound after every step
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> ChainResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { chain_path } => cmd_check(&chain_path),
        Commands::Eval {
            chain_path,
            json,
            trace,
        } => cmd_eval(&chain_path, json, trace),
    }
}

fn cmd_check(chain_path: &Path) -> ChainResult<()> {
    println!("Checking chain: {}", chain_path.display());
    let chain = load_yaml(chain_path)?;
    println!(
        "✓ Chain is valid ({} inputs, {} steps)",
        chain.inputs.len(),
        chain.steps.len()
    );
    Ok(())
}

fn cmd_eval(chain_path: &Path, json: bool, trace: bool) -> ChainResult<()> {
    let chain = load_yaml(chain_path)?;
    let eval = evaluate(&chain)?;

    if json {
        println!("{}", evaluation_to_json(&eval)?);
        return Ok(());
    }

    if trace {
        print_steps(&eval);
    }

    let (value, bound) = eval.result.parts();
    println!("Chain: {}", display_name(&eval, chain_path));
    println!("  value:       {:e}", value);
    println!("  error bound: {:e}", bound);
    println!("  verdict:     {}", eval.verdict());
    Ok(())
}

fn print_steps(eval: &Evaluation) {
    println!("Steps:");
    for (i, step) in eval.steps.iter().enumerate() {
        println!(
            "  {:>3}  {:<12} {:<4} {:>24e}  ± {:e}",
            i + 1,
            step.name,
            step.op.to_string(),
            step.value,
            step.error_bound
        );
    }
}

fn display_name(eval: &Evaluation, chain_path: &Path) -> String {
    if eval.name.is_empty() {
        chain_path.display().to_string()
    } else {
        eval.name.clone()
    }
}
