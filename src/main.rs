use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use regex::Regex;
use simple_logger::SimpleLogger;

use text_row_sort::algorithm::Algorithm;
use text_row_sort::cancellation::Cancellation;
use text_row_sort::emitter::{Destination, Emitter, OutputFormat};
use text_row_sort::error::SortError;
use text_row_sort::order::Order;
use text_row_sort::sort::Sort;
use text_row_sort::source::Source;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Sort the rows of comma separated files by one field
#[derive(Parser, Debug)]
#[command(name = "text-row-sort", version, disable_help_flag = true)]
struct Args {
    /// Read every file in this directory
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// Read this file. Standard input is read when neither -d nor -i is given
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Write the result to this file instead of standard output
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Hold the first row out of the sort
    #[arg(short = 'h', long = "header")]
    header: bool,

    /// Sort in reverse order
    #[arg(short = 'r', long = "reverse")]
    reverse: bool,

    /// Zero based index of the field to sort by
    #[arg(short = 'f', long = "field", default_value_t = 0)]
    field: usize,

    /// Sorting algorithm: 1 - comparison sort, 2 - tree sort
    #[arg(short = 'a', long = "algorithm", default_value_t = 1, allow_negative_numbers = true)]
    algorithm: i64,

    /// Number of concurrent reader workers in directory mode, 0 uses all cores
    #[arg(short = 't', long = "tasks", default_value_t = 3)]
    tasks: usize,

    /// Field separator
    #[arg(short = 's', long = "separator", default_value_t = ',')]
    separator: char,

    /// Skip lines matching this regular expression
    #[arg(long = "ignore-lines")]
    ignore_lines: Option<Regex>,

    /// Write one row per line instead of a single dump of all rows
    #[arg(long = "lines")]
    lines: bool,

    /// Only check whether the input is already sorted
    #[arg(short = 'c', long = "check")]
    check: bool,

    /// Print help
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

fn create_sort(args: &Args) -> Result<Sort, anyhow::Error> {
    let source = Source::select(args.dir.clone(), args.input.clone())?;
    let algorithm = Algorithm::try_from(args.algorithm)?;

    let mut text_row_sort = Sort::new(source);
    text_row_sort.with_tasks(args.tasks);
    text_row_sort.with_field_separator(args.separator);
    if let Some(r) = &args.ignore_lines {
        text_row_sort.with_ignore_lines(r.clone());
    }
    text_row_sort.with_header(args.header);
    text_row_sort.with_field(args.field);
    text_row_sort.with_order(Order::from_reverse(args.reverse));
    text_row_sort.with_algorithm(algorithm);
    Ok(text_row_sort)
}

fn run(args: &Args, cancellation: &Cancellation) -> Result<(), anyhow::Error> {
    let text_row_sort = create_sort(args)?;

    if args.check {
        if text_row_sort.check_with_cancellation(cancellation)? {
            println!("Input is sorted");
        } else {
            println!("Input is not sorted");
        }
        return Ok(());
    }

    let rows = text_row_sort.sort_with_cancellation(cancellation)?;

    let format = if args.lines { OutputFormat::Lines } else { OutputFormat::Dump };
    let emitter = Emitter::new(args.output.clone())
        .with_format(format)
        .with_field_separator(args.separator);
    if let Destination::File(path) = emitter.emit(&rows)? {
        println!("Output is written to file {}", path.display());
    }
    Ok(())
}

/// The signal that cancelled the run
#[derive(Clone, Copy, Debug)]
enum Interrupt {
    CtrlC,
    Kill,
}

impl Interrupt {
    fn print_notice(&self) {
        match self {
            Interrupt::CtrlC => {
                println!("Got CTRL+C signal.");
                println!("Closing.");
            }
            Interrupt::Kill => {
                println!("Got kill signal.");
                println!("Program will terminate now.");
            }
        }
    }
}

/// Cancel `cancellation` on SIGINT or SIGTERM, remembering the first signal received
#[cfg(unix)]
fn watch_signals(cancellation: &Cancellation) -> Result<Arc<OnceLock<Interrupt>>, anyhow::Error> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])
        .with_context(|| "Failed to install the signal handler")?;
    let received = Arc::new(OnceLock::new());
    let handler_received = received.clone();
    let handler_cancellation = cancellation.clone();
    std::thread::Builder::new()
        .name("signal-handler".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                let interrupt = if signal == SIGTERM { Interrupt::Kill } else { Interrupt::CtrlC };
                let _ = handler_received.set(interrupt);
                handler_cancellation.cancel();
            }
        })
        .with_context(|| "Failed to start the signal handler")?;
    Ok(received)
}

// default signal behaviour elsewhere
#[cfg(not(unix))]
fn watch_signals(_cancellation: &Cancellation) -> Result<Arc<OnceLock<Interrupt>>, anyhow::Error> {
    Ok(Arc::new(OnceLock::new()))
}

fn main() -> Result<(), anyhow::Error> {
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .with_context(|| "Failed to initialize logging")?;

    let args = Args::parse();

    let cancellation = Cancellation::new();
    let interrupt = watch_signals(&cancellation)?;

    match run(&args, &cancellation) {
        Err(e) if matches!(e.downcast_ref::<SortError>(), Some(SortError::Cancelled)) => {
            interrupt.get().copied().unwrap_or(Interrupt::CtrlC).print_notice();
            Ok(())
        }
        result => result,
    }
}
