use crate::config::model::PROGRESS_MAX;

/// Current progress and the vertical position of the wave center it implies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressState {
    progress: u8,
    height: u32,
    wave_top_height: f64,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ProgressState {
    pub fn new(progress: i32, height: u32) -> Self {
        let mut state = Self {
            progress: 0,
            height,
            wave_top_height: 0.0,
        };
        state.set_progress(progress);
        state
    }

    /// Clamp `value` to `[0, 100]` and refresh the water line.
    pub fn set_progress(&mut self, value: i32) {
        self.progress = clamp_progress(value);
        self.recompute();
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
        self.recompute();
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance from the top edge to the wave center line, in pixels.
    pub fn wave_top_height(&self) -> f64 {
        self.wave_top_height
    }

    fn recompute(&mut self) {
        self.wave_top_height = wave_top_for(self.height, self.progress);
    }
}

pub fn clamp_progress(value: i32) -> u8 {
    value.clamp(0, i32::from(PROGRESS_MAX)) as u8
}

/// `height * (1 - progress / 100)`.
pub fn wave_top_for(height: u32, progress: u8) -> f64 {
    f64::from(height) * (1.0 - f64::from(progress) / f64::from(PROGRESS_MAX))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/progress.rs"]
mod tests;
