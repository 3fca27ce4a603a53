use colored::Colorize;

/// A human-readable message produced by one of the stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Stage start and completion notices.
    Info(String),
    /// Parser token acceptance lines.
    Trace(String),
    Error(String),
    /// Program output from `print`.
    Output(String),
}

impl Diagnostic {
    pub fn text(&self) -> &str {
        match self {
            Diagnostic::Info(s)
            | Diagnostic::Trace(s)
            | Diagnostic::Error(s)
            | Diagnostic::Output(s) => s,
        }
    }
}

pub trait Sink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Writes diagnostics to the terminal.
pub struct ConsoleSink {
    pub show_trace: bool,
}

impl ConsoleSink {
    pub fn new(show_trace: bool) -> Self {
        Self { show_trace }
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::Info(msg) => println!("{}", msg.green()),
            Diagnostic::Trace(msg) => {
                if self.show_trace {
                    println!("{}", msg.dimmed())
                }
            }
            Diagnostic::Error(msg) => eprintln!("{}", msg.red()),
            Diagnostic::Output(msg) => println!("{}", msg),
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct CaptureSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::Output(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::Error(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.diagnostics.iter().any(|d| d.text().contains(needle))
    }
}

impl Sink for CaptureSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
