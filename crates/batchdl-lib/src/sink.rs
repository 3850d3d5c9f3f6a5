use crate::download::format_bytes;
use std::fmt;
use std::io::Write;
use std::sync::Mutex;

/// One human-readable outcome line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    Downloaded { url: String, bytes: u64 },
    Failed { url: String, message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Downloaded { url, bytes } => {
                write!(f, "Downloaded {} from \"{}\"", format_bytes(*bytes), url)
            }
            Diagnostic::Failed { url, message } => {
                write!(f, "Error downloading from \"{}\": \"{}\"", url, message)
            }
        }
    }
}

/// Append-only destination for per-job outcome lines.
pub trait DiagnosticsSink: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Writes each diagnostic as a line to the wrapped writer.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WriterSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> DiagnosticsSink for WriterSink<W> {
    fn report(&self, diagnostic: &Diagnostic) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(err) = writeln!(writer, "{diagnostic}") {
            tracing::warn!("Failed to write diagnostic: {}", err);
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.diagnostics().iter().map(ToString::to_string).collect()
    }
}

impl DiagnosticsSink for MemorySink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic.clone());
    }
}
