use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use super::{CapturedSlide, Chapter, DeckWriter};

/// Writes each chapter as `NN-<name>.json` in one output directory.
pub struct JsonDeckWriter {
    output_dir: PathBuf,
    width: u16,
    height: u16,
}

#[derive(Serialize)]
struct ChapterDeck<'a> {
    chapter: &'a str,
    width: u16,
    height: u16,
    slides: &'a [CapturedSlide],
}

impl JsonDeckWriter {
    pub fn new(output_dir: PathBuf, width: u16, height: u16) -> Self {
        Self {
            output_dir,
            width,
            height,
        }
    }

    pub fn file_name(position: usize, chapter: &Chapter) -> String {
        format!("{:02}-{}.json", position + 1, slug(&chapter.name))
    }
}

impl DeckWriter for JsonDeckWriter {
    fn write_chapter(&mut self, position: usize, chapter: &Chapter, slides: &[CapturedSlide]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(Self::file_name(position, chapter));
        let document = ChapterDeck {
            chapter: &chapter.name,
            width: self.width,
            height: self.height,
            slides,
        };
        let content = serde_json::to_string_pretty(&document)?;
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Lowercase ASCII words joined by single dashes.
fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "chapter".to_string()
    } else {
        slug.to_string()
    }
}
