mod debug_report;

use answerkey::{
    JsonLinesSink, Marks, MemorySink, QuestionType, RecordSink, ScoringPolicy, SeedConfig, SeedReport, Seeder,
    decode_options, resolve_verbose,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ANSWERKEY_LOG";

#[derive(Parser)]
#[command(name = "answerkey", version)]
#[command(about = "Resolve hand-written CSV answer keys into machine-checkable question records")]
#[command(after_help = "Exit codes:\n  0  Success.\n  1  A file could not be processed.\n  2  Invalid arguments.\n  3  Unresolved answers with --fail-on-unresolved.\n\nSet ANSWERKEY_LOG=debug to trace per-token matching.")]
struct Cli {
    /// Force ANSI color output.
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seed one or more CSV files and emit JSON-lines question records.
    Seed(SeedArgs),
    /// Resolve a single answer and show how each token matched.
    Explain(ExplainArgs),
}

#[derive(Args)]
struct SeedArgs {
    /// CSV files to seed. Each file is processed on its own worker thread.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write records here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = 1.0)]
    mcq_marks: f64,

    #[arg(long, default_value_t = 0.33)]
    mcq_negative: f64,

    #[arg(long, default_value_t = 1.0)]
    msq_marks: f64,

    #[arg(long, default_value_t = 0.0)]
    msq_negative: f64,

    /// Exit with code 3 when any answer could not be resolved.
    #[arg(long)]
    fail_on_unresolved: bool,

    /// Do not print per-file reports.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args)]
struct ExplainArgs {
    /// Options as a JSON array or a '|'-delimited list.
    #[arg(long)]
    options: String,

    /// Raw answer cell.
    #[arg(long)]
    answer: String,

    #[arg(long = "type", value_enum, default_value_t = TypeArg::Mcq)]
    qtype: TypeArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum TypeArg {
    Mcq,
    Msq,
}

impl From<TypeArg> for QuestionType {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::Mcq => QuestionType::Mcq,
            TypeArg::Msq => QuestionType::Msq,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stderr().is_terminal()
    };

    match cli.command {
        Command::Seed(args) => run_seed(args, color),
        Command::Explain(args) => run_explain(args, color),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

fn run_seed(args: SeedArgs, color: bool) -> ExitCode {
    let config = SeedConfig {
        scoring: ScoringPolicy {
            mcq: Marks { marks: args.mcq_marks, negative: args.mcq_negative },
            msq: Marks { marks: args.msq_marks, negative: args.msq_negative },
        },
        ..SeedConfig::default()
    };
    let seeder = Seeder::new(config);

    // Rows never depend on each other, so files are resolved in parallel and
    // written out afterwards in argument order.
    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = args
            .files
            .iter()
            .map(|path| {
                let seeder = &seeder;
                scope.spawn(move || {
                    let mut sink = MemorySink::default();
                    seeder.seed_file(path, &mut sink).map(|report| (report, sink))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e))).collect()
    });

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(err) => {
                eprintln!("error: cannot create {}: {err}", path.display());
                return ExitCode::from(1);
            }
        },
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut out = JsonLinesSink::new(writer);

    let mut failed = false;
    let mut reports: Vec<SeedReport> = Vec::new();
    for result in results {
        match result {
            Ok((report, sink)) => {
                for record in &sink.records {
                    if let Err(err) = out.upsert(record) {
                        eprintln!("error: {err}");
                        return ExitCode::from(1);
                    }
                }
                reports.push(report);
            }
            Err(err) => {
                eprintln!("error: {err}");
                failed = true;
            }
        }
    }

    if let Err(err) = out.into_inner().flush() {
        eprintln!("error: failed to flush output: {err}");
        return ExitCode::from(1);
    }

    if !args.quiet {
        debug_report::print_seed_reports(&reports, color);
    }

    let unresolved: usize = reports.iter().map(|r| r.unresolved.len()).sum();
    if failed {
        ExitCode::from(1)
    } else if args.fail_on_unresolved && unresolved > 0 {
        ExitCode::from(3)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_explain(args: ExplainArgs, color: bool) -> ExitCode {
    let options = decode_options(&args.options);
    let details = resolve_verbose(&options, &args.answer, args.qtype.into());
    debug_report::print_explain(&args.answer, &details, color);
    ExitCode::SUCCESS
}
