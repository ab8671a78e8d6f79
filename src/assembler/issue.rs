//! Line-attributed diagnostics produced by the compiler.
use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CodeIssue {
    line: usize,
    severity: Severity,
    message: String,
}

impl CodeIssue {
    pub fn new(line: usize, severity: Severity, message: impl Into<String>) -> Self {
        CodeIssue { line, severity, message: message.into() }
    }

    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, Severity::Error, message)
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, Severity::Warning, message)
    }

    /// Zero-based index of the source line the issue belongs to.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for CodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] line {}: {}", self.severity, self.line + 1, self.message)
    }
}
