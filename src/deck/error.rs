use std::error::Error;
use std::fmt;
use std::io;

/// Errors raised while turning a deck file into sections
#[derive(Debug)]
pub enum DeckError {
    /// The deck file could not be read
    Io(io::Error),

    /// The deck text is malformed at the given 1-based line
    Parse { line: usize, message: String },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Io(err) => write!(f, "Deck read error: {}", err),
            DeckError::Parse { line, message } => {
                write!(f, "Deck parse error at line {}: {}", line, message)
            }
        }
    }
}

impl Error for DeckError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeckError::Io(err) => Some(err),
            DeckError::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for DeckError {
    fn from(err: io::Error) -> Self {
        DeckError::Io(err)
    }
}
