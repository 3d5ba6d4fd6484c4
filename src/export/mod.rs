//! `export` - Renders every slide of a set of decks to fixed-size frames and
//! bundles them into one output deck per chapter.
pub mod capture;
pub mod writer;

pub use capture::TerminalCapture;
pub use writer::JsonDeckWriter;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::deck::Deck;
use crate::logging;
use crate::navigation::{counter_text, progress_fraction, DisplayPort};
use crate::ui::slide_view::{SlideView, ViewOptions};

fn default_output_dir() -> PathBuf {
    PathBuf::from("export")
}

fn default_width() -> u16 {
    120
}

fn default_height() -> u16 {
    34
}

/// What to export, as read from a plan file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ExportPlan {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_width")]
    pub width: u16,
    #[serde(default = "default_height")]
    pub height: u16,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    /// Directory relative paths in the plan are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Chapter {
    pub name: String,
    pub files: Vec<PathBuf>,
}

impl ExportPlan {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read export plan {}", path.display()))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_toml_str(&content, base_dir)
    }

    pub fn from_toml_str(content: &str, base_dir: PathBuf) -> Result<Self> {
        let mut plan: ExportPlan = toml::from_str(content).context("Failed to parse export plan")?;
        plan.base_dir = base_dir;
        plan.validate()?;
        Ok(plan)
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(anyhow!("Frame size must be non-zero, got {}x{}", self.width, self.height));
        }
        if self.chapters.is_empty() {
            return Err(anyhow!("Export plan has no chapters"));
        }
        for chapter in &self.chapters {
            if chapter.name.trim().is_empty() {
                return Err(anyhow!("Every chapter needs a name"));
            }
            if chapter.files.is_empty() {
                return Err(anyhow!("Chapter {:?} lists no files", chapter.name));
            }
        }
        Ok(())
    }

    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.base_dir.join(file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.base_dir.join(&self.output_dir)
    }
}

/// One rendered slide.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CapturedSlide {
    pub source: PathBuf,
    pub section: usize,
    pub title: Option<String>,
    pub lines: Vec<String>,
}

/// Turns the currently active section of a view into a frame.
pub trait SlideCapture {
    fn capture(&mut self, deck: &Deck, view: &SlideView) -> Result<Vec<String>>;
}

/// Assembles the frames of one chapter into an output deck.
pub trait DeckWriter {
    /// `position` is the 0-based chapter position in the plan.
    fn write_chapter(&mut self, position: usize, chapter: &Chapter, slides: &[CapturedSlide]) -> Result<PathBuf>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExportSummary {
    pub decks: Vec<PathBuf>,
    pub slides: usize,
}

/// Walks a plan in order: chapter, file, section. The first failure stops
/// the export.
pub struct Exporter<S, W> {
    plan: ExportPlan,
    options: ViewOptions,
    capture: S,
    writer: W,
}

impl<S: SlideCapture, W: DeckWriter> Exporter<S, W> {
    pub fn new(plan: ExportPlan, options: ViewOptions, capture: S, writer: W) -> Self {
        Self {
            plan,
            options,
            capture,
            writer,
        }
    }

    pub fn run(&mut self) -> Result<ExportSummary> {
        let mut summary = ExportSummary::default();

        for (position, chapter) in self.plan.chapters.iter().enumerate() {
            let mut slides = Vec::new();

            for file in &chapter.files {
                let path = self.plan.resolve(file);
                let deck = Deck::load(&path)
                    .with_context(|| format!("Failed to load deck {}", path.display()))?;
                if deck.is_empty() {
                    logging::warn(&format!("{} has no slides, skipping", path.display()));
                    continue;
                }
                let captured = capture_deck(&deck, &path, self.options, &mut self.capture)
                    .with_context(|| format!("Failed to capture {}", path.display()))?;
                slides.extend(captured);
            }

            let written = self
                .writer
                .write_chapter(position, chapter, &slides)
                .with_context(|| format!("Failed to write chapter {:?}", chapter.name))?;
            logging::info(&format!(
                "Chapter {:?}: {} slides -> {}",
                chapter.name,
                slides.len(),
                written.display()
            ));

            summary.slides += slides.len();
            summary.decks.push(written);
        }

        Ok(summary)
    }
}

/// Shows each section in turn with its animations completed and captures it.
fn capture_deck<S: SlideCapture>(
    deck: &Deck,
    source: &Path,
    options: ViewOptions,
    capture: &mut S,
) -> Result<Vec<CapturedSlide>> {
    let mut view = SlideView::new(deck, options);
    let count = deck.len();

    deck.sections
        .iter()
        .map(|section| {
            view.force_active(section.index);
            view.finish_animations(section.index);
            view.set_progress(progress_fraction(section.index, count));
            view.set_counter_text(&counter_text(section.index, count));

            Ok(CapturedSlide {
                source: source.to_path_buf(),
                section: section.index,
                title: section.title.clone(),
                lines: capture.capture(deck, &view)?,
            })
        })
        .collect()
}
