use anyhow::Result;

/// The rendering surface the controller drives.
///
/// The controller never touches widgets directly; every visible effect of a
/// transition goes through these calls.
pub trait DisplayPort {
    /// Shows or hides a section.
    fn set_active(&mut self, section: usize, active: bool);

    /// Sets the progress fill, `0.0..=1.0`. Surfaces without a progress
    /// widget ignore this.
    fn set_progress(&mut self, fraction: f64);

    /// Sets the position counter text. Surfaces without a counter ignore this.
    fn set_counter_text(&mut self, text: &str);

    /// Puts every animated child of `section` back to its initial state.
    fn reset_animation(&mut self, section: usize);

    /// Starts the enter animation of `section` from the beginning.
    fn play_animation(&mut self, section: usize);
}

/// A surface that can take over the whole screen.
pub trait FullscreenPort {
    fn is_fullscreen(&self) -> bool;

    fn request_fullscreen(&mut self) -> Result<()>;

    fn exit_fullscreen(&mut self) -> Result<()>;
}
