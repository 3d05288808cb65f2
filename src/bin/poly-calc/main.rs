use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use mimalloc::MiMalloc;
use poly_calc::{calculator::Calculator, stack::STARTING_CAPACITY};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Reverse Polish notation calculator of sparse multivariate polynomials.
///
/// Reads one polynomial or command per line, prints results to the standard
/// output and `ERROR <line> <message>` diagnostics to the standard error.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read the input from this file instead of the standard input
    input: Option<PathBuf>,

    /// Log more details to the standard error, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Initial capacity of the polynomial stack
    #[arg(long, value_name = "N", default_value_t = STARTING_CAPACITY)]
    stack_capacity: usize,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut calc = Calculator::with_capacity(args.stack_capacity);
    let mut out = BufWriter::new(io::stdout().lock());
    let mut err = io::stderr().lock();

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|why| format!("Could not open file \"{}\": {}", path.display(), why))?;
            calc.run(BufReader::new(file), &mut out, &mut err)
        }
        None => calc.run(io::stdin().lock(), &mut out, &mut err),
    }
    .map_err(|why| format!("I/O failure: {}", why))?;

    out.flush()
        .map_err(|why| format!("Could not flush output: {}", why))?;

    info!(
        lines = summary.lines,
        errors = summary.errors,
        remaining = calc.stack().len(),
        "input exhausted"
    );

    Ok(())
}
