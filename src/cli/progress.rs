//! CLI-specific progress handling for img-grab
//!
//! Provides an image-count progress bar for the command-line interface.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Creates a progress bar counting processed images
pub fn create_progress_bar(total_images: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_images);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} images {msg}")
            .expect("Failed to create progress style")
            .progress_chars("#>-")
    );
    pb
}

/// Progress manager for a scrape run
#[derive(Clone)]
pub struct ProgressManager {
    pub pb: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager; `visible = false` draws nothing
    pub fn new(total_images: u64, visible: bool) -> Self {
        let pb = create_progress_bar(total_images);
        if !visible {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self { pb }
    }

    /// Set the number of images once the page has been parsed
    pub fn set_total(&self, total_images: usize) {
        self.pb.set_length(total_images as u64);
    }

    /// Print a console line without tearing the bar
    pub fn println(&self, line: &str) {
        self.pb.suspend(|| println!("{line}"));
    }

    /// Advance by one processed image
    pub fn advance(&self) {
        self.pb.inc(1);
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
