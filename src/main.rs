use clap::Parser;
use colored::Colorize;
use luminax::diagnostics::{ConsoleSink, Diagnostic, Sink};
use luminax::parser::postfix::render;
use luminax::{report_translation_error, translate, Outcome};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path of the program source
    file: String,

    /// Show every token accepted by the parser
    #[arg(long)]
    trace: bool,

    /// Print the postfix code after translation
    #[arg(long)]
    postfix: bool,

    /// Translate only, do not run the program
    #[arg(long)]
    check: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Success => 0,
        Outcome::TranslationFailed => 1,
        Outcome::RuntimeFailed => 2,
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let path = Path::new(&cli.file);
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}", format!("{}: {}", path.display(), err).red());
            std::process::exit(3);
        }
    };

    let mut sink = ConsoleSink::new(cli.trace);

    let translation = match translate(text.lines(), &mut sink) {
        Ok(translation) => translation,
        Err(err) => {
            report_translation_error(&err, &mut sink);
            std::process::exit(exit_code(Outcome::TranslationFailed));
        }
    };

    if cli.postfix {
        sink.emit(Diagnostic::Output(format!(
            "Postfix: {}",
            render(&translation.postfix)
        )));
    }

    if cli.check || !cfg!(feature = "interpret") {
        return;
    }

    #[cfg(feature = "interpret")]
    {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let outcome = luminax::interpret(translation, &mut input, &mut sink);
        std::process::exit(exit_code(outcome));
    }
}
