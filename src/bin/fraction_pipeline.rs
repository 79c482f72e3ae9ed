//! Runs the fraction pipelines and prints their reports.

use clap::Parser;
use deferred_fractions::config::{Diagnostics, Options};
use deferred_fractions::interfaces::{ConsoleSink, DiagnosticSink, TracingSink};
use deferred_fractions::pipeline::{self, constants::DEFAULT_RANDOM_BITS};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Asynchronous fraction pipelines", after_help = Options::usage())]
struct Args {
    /// Size in bits of the random numerators used by the combine pipeline
    #[arg(long, default_value_t = DEFAULT_RANDOM_BITS)]
    bits: u64,

    /// Run options as flag/value pairs: -d [true|false] -l [true|false] -T tag,...
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    options: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let options = match Options::parse_args(&args.options) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("{}", error);
            eprintln!("{}", Options::usage());
            return ExitCode::from(2);
        }
    };

    let sink: Arc<dyn DiagnosticSink> = if options.logging_enabled() {
        init_tracing();
        Arc::new(TracingSink)
    } else {
        Arc::new(ConsoleSink)
    };

    let diagnostics = Diagnostics::with_sink(options, sink);
    let mut failed = false;
    for (driver, outcome) in pipeline::run_all(&diagnostics, args.bits) {
        if let Err(error) = outcome {
            eprintln!("{} failed: {}", driver, error);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_thread_names(true).init();
}
