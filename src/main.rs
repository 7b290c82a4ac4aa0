use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use malgen::emitter::{EmitOptions, EnvPassing};

/// Generate Rust tests from a mal test transcript (e.g. `step2_eval.mal`).
///
/// The generated code goes to stdout unless `--output` is given; notices go to stderr.
#[derive(Debug, Parser)]
#[command(name = "malgen", version)]
struct Args {
    /// Path to the transcript file
    transcript: PathBuf,

    /// Write the generated tests to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Function called by every assertion as `<evaluator>(input, env)`
    #[arg(long, default_value = "mal_rust::rep")]
    evaluator: String,

    /// Expression that builds a fresh environment at the start of each test
    #[arg(long, default_value = "Env::new_default()")]
    env_init: String,

    /// How the environment is passed to the evaluator
    #[arg(long, value_enum, default_value_t = EnvPassing::Mutable)]
    env: EnvPassing,

    /// Path imported at the top of the generated file (repeatable)
    #[arg(long = "use", value_name = "PATH", default_value = "mal_rust::env::Env")]
    imports: Vec<String>,

    /// Don't emit any `use` lines
    #[arg(long)]
    no_imports: bool,

    /// Also report markers without input and inputs without expected output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            evaluator: self.evaluator.clone(),
            env_init: self.env_init.clone(),
            env_passing: self.env,
            imports: if self.no_imports {
                Vec::new()
            } else {
                self.imports.clone()
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    eprintln!("Using test file: '{}'", args.transcript.display());
    let generated = malgen::generate_file(&args.transcript, &args.emit_options())?;
    let transcript = &generated.transcript;

    for diagnostic in &transcript.diagnostics {
        if diagnostic.is_notice() || args.verbose {
            eprintln!("{}", diagnostic);
        }
    }
    if args.verbose {
        for block in &transcript.blocks {
            eprintln!(
                "  {}: {} cases, {} expecting errors",
                block.title(),
                block.cases.len(),
                block.error_case_count()
            );
        }
        eprintln!(
            "{} blocks, {} cases",
            transcript.blocks.len(),
            transcript.case_count()
        );
    }

    match &args.output {
        Some(path) => std::fs::write(path, &generated.code)
            .with_context(|| format!("writing '{}'", path.display()))?,
        None => print!("{}", generated.code),
    }
    Ok(())
}
