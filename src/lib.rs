use std::io::BufRead;

use diagnostics::{Diagnostic, Sink};
use lexer::{Lexer, LexerError};
use parser::{ParseError, Parser, Translation};

pub mod context;
pub mod diagnostics;
pub mod lexer;
pub mod parser;

#[cfg(feature = "interpret")]
pub mod interpreter;
#[cfg(feature = "interpret")]
use interpreter::Interpreter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    TranslationFailed,
    RuntimeFailed,
}

/// Lexes and parses a program, producing the tables and postfix code.
pub fn translate<I, S>(lines: I, sink: &mut dyn Sink) -> anyhow::Result<Translation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let context = Lexer::analyze(lines)?;
    sink.emit(Diagnostic::Info(
        "Lexer: Lexical analyzer was successfully completed".to_string(),
    ));

    let translation = Parser::new(context, sink).parse()?;
    sink.emit(Diagnostic::Info(
        "Parser: syntactic analyzer was successfully completed".to_string(),
    ));
    sink.emit(Diagnostic::Info(
        "RPN translation was successfully completed".to_string(),
    ));

    Ok(translation)
}

/// Reports a failed translation once, in the form matching its stage.
pub fn report_translation_error(err: &anyhow::Error, sink: &mut dyn Sink) {
    if let Some(lexer_error) = err.downcast_ref::<LexerError>() {
        sink.emit(Diagnostic::Error(lexer_error.to_string()));
        sink.emit(Diagnostic::Error(format!(
            "Lexer: Analysis failed with status {}",
            lexer_error.code()
        )));
    } else if let Some(parse_error) = err.downcast_ref::<ParseError>() {
        sink.emit(Diagnostic::Error(parse_error.to_string()));
    } else {
        sink.emit(Diagnostic::Error(err.to_string()));
    }
}

#[cfg(feature = "interpret")]
pub fn interpret(translation: Translation, input: &mut dyn BufRead, sink: &mut dyn Sink) -> Outcome {
    let mut interpreter = Interpreter::new(translation);
    match interpreter.run(input, sink) {
        Ok(()) => {
            sink.emit(Diagnostic::Info(
                "Interpreter: program has finished successfully".to_string(),
            ));
            Outcome::Success
        }
        Err(err) => {
            sink.emit(Diagnostic::Error(format!("Runtime Error:\n\t{}", err)));
            Outcome::RuntimeFailed
        }
    }
}

/// Translates then executes a program. Nothing runs unless translation succeeds.
pub fn run<I, S>(lines: I, input: &mut dyn BufRead, sink: &mut dyn Sink) -> Outcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let translation = match translate(lines, sink) {
        Ok(translation) => translation,
        Err(err) => {
            report_translation_error(&err, sink);
            return Outcome::TranslationFailed;
        }
    };

    execute(translation, input, sink)
}

#[cfg(feature = "interpret")]
fn execute(translation: Translation, input: &mut dyn BufRead, sink: &mut dyn Sink) -> Outcome {
    interpret(translation, input, sink)
}

/// Without the interpreter stage the postfix code is the program's output.
#[cfg(not(feature = "interpret"))]
fn execute(translation: Translation, _input: &mut dyn BufRead, sink: &mut dyn Sink) -> Outcome {
    sink.emit(Diagnostic::Output(parser::postfix::render(
        &translation.postfix,
    )));
    Outcome::Success
}

#[cfg(all(test, feature = "interpret"))]
mod test {
    use super::*;
    use diagnostics::CaptureSink;

    fn run_source(source: &str) -> (Outcome, CaptureSink) {
        let mut sink = CaptureSink::new();
        let mut input = "".as_bytes();
        let outcome = run(source.lines(), &mut input, &mut sink);
        (outcome, sink)
    }

    #[test]
    fn test_successful_run() {
        let (outcome, sink) = run_source("program p { int x; { x = 2; print(x); } }");
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(sink.outputs(), vec!["x has value 2 (Int)"]);
        assert!(sink.contains("Lexer: Lexical analyzer was successfully completed"));
        assert!(sink.contains("Interpreter: program has finished successfully"));
        assert!(sink.errors().is_empty());
    }

    #[test]
    fn test_lexer_failure_reports_status() {
        let (outcome, sink) = run_source("program p { int x; { x = 1.; } }");
        assert_eq!(outcome, Outcome::TranslationFailed);
        assert_eq!(
            sink.errors().last(),
            Some(&"Lexer: Analysis failed with status 103")
        );
        assert!(!sink.contains("Parser: syntactic analyzer"));
    }

    #[test]
    fn test_parse_failure_prevents_execution() {
        let (outcome, sink) = run_source("program p { int x, x; { print(x); } }");
        assert_eq!(outcome, Outcome::TranslationFailed);
        assert!(sink.outputs().is_empty());
        assert_eq!(sink.errors().len(), 1);
        assert!(sink.errors()[0].contains("duplicate declaration of 'x'"));
    }

    #[test]
    fn test_runtime_failure() {
        let (outcome, sink) = run_source("program p { int x; { x = 5 / 0; } }");
        assert_eq!(outcome, Outcome::RuntimeFailed);
        assert_eq!(sink.errors(), vec!["Runtime Error:\n\tdivision by zero"]);
        assert!(!sink.contains("finished successfully"));
    }
}
