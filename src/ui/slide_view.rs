use anyhow::{anyhow, Result};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::deck::{Deck, Section};
use crate::navigation::{DisplayPort, FullscreenPort};

/// Reveal state of a section's animated children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Hidden,
    Playing { started: Instant },
    Finished,
}

/// Which optional pieces of chrome the view carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub show_progress: bool,
    pub show_counter: bool,
    pub allow_fullscreen: bool,
    pub reveal_stagger: Duration,
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            show_progress: config.presentation.show_progress,
            show_counter: config.presentation.show_counter,
            allow_fullscreen: config.presentation.allow_fullscreen,
            reveal_stagger: config.reveal_stagger(),
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_progress: true,
            show_counter: true,
            allow_fullscreen: true,
            reveal_stagger: Duration::from_millis(150),
        }
    }
}

/// Terminal-side state of a presentation: what is shown, not what it says.
///
/// The navigation controller writes to it through [`DisplayPort`]; the
/// renderer reads it every frame.
#[derive(Debug, Clone)]
pub struct SlideView {
    active: Vec<bool>,
    animations: Vec<AnimationState>,
    animated_counts: Vec<usize>,
    reveal_stagger: Duration,
    /// `None` when the progress bar is switched off
    progress: Option<f64>,
    /// `None` when the counter is switched off
    counter: Option<String>,
    fullscreen: bool,
    allow_fullscreen: bool,
}

impl SlideView {
    pub fn new(deck: &Deck, options: ViewOptions) -> Self {
        let animated_counts = deck.animated_counts();
        Self {
            active: vec![false; animated_counts.len()],
            animations: vec![AnimationState::Hidden; animated_counts.len()],
            animated_counts,
            reveal_stagger: options.reveal_stagger,
            progress: options.show_progress.then_some(0.0),
            counter: options.show_counter.then(String::new),
            fullscreen: false,
            allow_fullscreen: options.allow_fullscreen,
        }
    }

    pub fn active_section(&self) -> Option<usize> {
        self.active.iter().position(|active| *active)
    }

    pub fn progress(&self) -> Option<f64> {
        self.progress
    }

    pub fn counter(&self) -> Option<&str> {
        self.counter.as_deref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn animation(&self, section: usize) -> Option<AnimationState> {
        self.animations.get(section).copied()
    }

    /// How many animated children of `section` are visible at `now`.
    pub fn revealed_count(&self, section: usize, now: Instant) -> usize {
        let total = self.animated_counts.get(section).copied().unwrap_or(0);
        match self.animation(section) {
            None | Some(AnimationState::Hidden) => 0,
            Some(AnimationState::Finished) => total,
            Some(AnimationState::Playing { started }) => {
                if self.reveal_stagger.is_zero() {
                    return total;
                }
                let elapsed = now.saturating_duration_since(started);
                let steps = (elapsed.as_nanos() / self.reveal_stagger.as_nanos()) as usize + 1;
                steps.min(total)
            }
        }
    }

    /// Whether block `block_index` of `section` is drawn at `now`. Static
    /// blocks always are; animated ones in document order as they reveal.
    pub fn is_block_revealed(&self, section: &Section, block_index: usize, now: Instant) -> bool {
        let Some(block) = section.blocks.get(block_index) else {
            return false;
        };
        if !block.animated {
            return true;
        }
        let order = section.blocks[..block_index]
            .iter()
            .filter(|b| b.animated)
            .count();
        order < self.revealed_count(section.index, now)
    }

    /// True while the active section is still revealing children.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.active_section().map_or(false, |section| {
            matches!(self.animation(section), Some(AnimationState::Playing { .. }))
                && self.revealed_count(section, now) < self.animated_counts[section]
        })
    }

    /// Marks reveals that have shown every child as finished.
    pub fn settle_animations(&mut self, now: Instant) {
        for section in 0..self.animations.len() {
            if let AnimationState::Playing { .. } = self.animations[section] {
                if self.revealed_count(section, now) >= self.animated_counts[section] {
                    self.animations[section] = AnimationState::Finished;
                }
            }
        }
    }

    /// Makes `section` the only active one, bypassing navigation. Used when
    /// rendering slides offline.
    pub fn force_active(&mut self, section: usize) {
        for (index, active) in self.active.iter_mut().enumerate() {
            *active = index == section;
        }
    }

    pub fn finish_animations(&mut self, section: usize) {
        if let Some(state) = self.animations.get_mut(section) {
            *state = AnimationState::Finished;
        }
    }
}

impl DisplayPort for SlideView {
    fn set_active(&mut self, section: usize, active: bool) {
        if let Some(flag) = self.active.get_mut(section) {
            *flag = active;
        }
    }

    fn set_progress(&mut self, fraction: f64) {
        if let Some(progress) = self.progress.as_mut() {
            *progress = fraction.clamp(0.0, 1.0);
        }
    }

    fn set_counter_text(&mut self, text: &str) {
        if let Some(counter) = self.counter.as_mut() {
            counter.clear();
            counter.push_str(text);
        }
    }

    fn reset_animation(&mut self, section: usize) {
        if let Some(state) = self.animations.get_mut(section) {
            *state = AnimationState::Hidden;
        }
    }

    fn play_animation(&mut self, section: usize) {
        if let Some(state) = self.animations.get_mut(section) {
            *state = AnimationState::Playing {
                started: Instant::now(),
            };
        }
    }
}

impl FullscreenPort for SlideView {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<()> {
        if !self.allow_fullscreen {
            return Err(anyhow!("fullscreen is disabled in the configuration"));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        self.fullscreen = false;
        Ok(())
    }
}
