//! Block-level progress reporting with a rotating bar color

use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_COLOR_PERIOD};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Colors the progress bar cycles through
const BAR_COLORS: [&str; 6] = ["red", "green", "yellow", "blue", "magenta", "cyan"];

/// Receives progress notifications from the composer
///
/// Implementations are purely observational; they never affect the mosaic.
pub trait BlockProgress {
    /// A pass over `total` blocks is starting
    fn begin(&mut self, total: usize);
    /// One more block has been pasted
    fn advance(&mut self);
    /// The pass is over
    fn finish(&mut self);
}

/// Progress sink that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl BlockProgress for NoProgress {
    fn begin(&mut self, _total: usize) {}
    fn advance(&mut self) {}
    fn finish(&mut self) {}
}

/// Terminal progress bar whose color changes every few blocks
pub struct ProgressManager {
    bar: ProgressBar,
    rng: StdRng,
    color: &'static str,
    since_change: usize,
    rotations: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Create a progress manager that tracks state without drawing
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        let mut rng = StdRng::from_os_rng();
        let color = BAR_COLORS.choose(&mut rng).copied().unwrap_or("cyan");
        bar.set_style(Self::style(color));
        bar.set_message("Generating mosaic");

        Self {
            bar,
            rng,
            color,
            since_change: 0,
            rotations: 0,
        }
    }

    /// Blocks reported so far in the current pass
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Number of color changes since creation
    pub const fn rotations(&self) -> usize {
        self.rotations
    }

    /// Color the bar is currently drawn with
    pub const fn color(&self) -> &'static str {
        self.color
    }

    fn rotate_color(&mut self) {
        self.color = BAR_COLORS.choose(&mut self.rng).copied().unwrap_or("cyan");
        self.bar.set_style(Self::style(self.color));
        self.rotations += 1;
    }

    fn style(color: &str) -> ProgressStyle {
        ProgressStyle::with_template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.{color}}}] {{pos}}/{{len}} blocks"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
    }
}

impl BlockProgress for ProgressManager {
    fn begin(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.since_change = 0;
    }

    fn advance(&mut self) {
        self.bar.inc(1);
        self.since_change += 1;
        if self.since_change == PROGRESS_COLOR_PERIOD {
            self.since_change = 0;
            self.rotate_color();
        }
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}
