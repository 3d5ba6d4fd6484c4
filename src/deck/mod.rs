//! `deck` - The content source: an ordered list of slide sections.
pub mod error;
pub mod parser;

pub use error::DeckError;

use ratatui::text::Span;
use std::path::{Path, PathBuf};

/// A run of text inside a block. Links are the only interactive content a
/// slide can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Link { label: String, url: String },
}

impl Inline {
    /// Text as it appears on screen.
    pub fn display_text(&self) -> &str {
        match self {
            Inline::Text(text) => text,
            Inline::Link { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Text,
    Bullet,
    Code,
    Blank,
}

/// One line of slide content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Inline>,
    /// Hidden until the section's enter animation reveals it
    pub animated: bool,
}

impl Block {
    pub fn blank() -> Self {
        Self {
            kind: BlockKind::Blank,
            spans: Vec::new(),
            animated: false,
        }
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Inline::display_text).collect()
    }

    /// Terminal column ranges (start, end exclusive, url) of every link,
    /// relative to the first cell of the block's rendered prefix. Widths are
    /// display widths, so wide characters take two columns.
    pub fn link_columns(&self) -> Vec<(usize, usize, &str)> {
        let mut column = Span::raw(self.prefix()).width();
        let mut links = Vec::new();
        for span in &self.spans {
            let width = Span::raw(span.display_text()).width();
            if let Inline::Link { url, .. } = span {
                links.push((column, column + width, url.as_str()));
            }
            column += width;
        }
        links
    }

    /// Marker drawn before the block text.
    pub fn prefix(&self) -> &'static str {
        match self.kind {
            BlockKind::Bullet => "• ",
            BlockKind::Code => "  ",
            _ => "",
        }
    }
}

/// One slide page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub index: usize,
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn animated_count(&self) -> usize {
        self.blocks.iter().filter(|block| block.animated).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Deck {
    pub title: Option<String>,
    pub sections: Vec<Section>,
    pub source: Option<PathBuf>,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let content = std::fs::read_to_string(path)?;
        let mut deck = parser::parse_deck(&content)?;
        deck.source = Some(path.to_path_buf());
        Ok(deck)
    }

    pub fn parse(content: &str) -> Result<Self, DeckError> {
        parser::parse_deck(content)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Number of animated children for every section, in order.
    pub fn animated_counts(&self) -> Vec<usize> {
        self.sections.iter().map(Section::animated_count).collect()
    }

    pub fn display_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        self.source
            .as_ref()
            .and_then(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled deck".to_string())
    }
}
