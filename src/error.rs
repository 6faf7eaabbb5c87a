//! The single error type shared by the tokenizer, the parsers and the manifest decoder.

/// 1-based location inside the text being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

/// Manifest or type-expression error. `line`/`column` are 0 when no position is known.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ManifestError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ManifestError {
    /// Error without position (structural decoder errors).
    pub fn new(message: impl Into<String>) -> Self {
        ManifestError {
            message: message.into(),
            line: 0,
            column: 0,
        }
    }

    pub fn at(message: impl Into<String>, position: Position) -> Self {
        ManifestError {
            message: message.into(),
            line: position.line,
            column: position.column,
        }
    }

    pub fn position(&self) -> Option<Position> {
        if self.line == 0 {
            None
        } else {
            Some(Position::new(self.line, self.column))
        }
    }

    /// Re-anchor a position reported relative to an embedded string that starts at `origin`
    /// in the enclosing text.
    pub(crate) fn shifted(mut self, origin: Position) -> Self {
        if self.line == 0 {
            return self;
        }
        if self.line == 1 {
            self.column += origin.column - 1;
        }
        self.line += origin.line - 1;
        self
    }
}

impl From<serde_yaml::Error> for ManifestError {
    fn from(e: serde_yaml::Error) -> Self {
        let position = e
            .location()
            .map(|loc| Position::new(loc.line(), loc.column()))
            .unwrap_or_default();
        ManifestError::at(format!("Invalid YAML document: {}", e), position)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for ManifestError {
    fn from(e: serde_json::Error) -> Self {
        ManifestError::at(
            format!("Invalid JSON document: {}", e),
            Position::new(e.line(), e.column()),
        )
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;
