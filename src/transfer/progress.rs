// Progress display
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}";

pub struct ProgressTracker {
    progress_bar: ProgressBar,
    transferred_bytes: u64,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_size: u64, description: &str, visible: bool) -> Self {
        let progress_bar = if visible {
            ProgressBar::new(total_size)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        progress_bar.set_style(style);
        progress_bar.set_message(description.to_string());

        Self {
            progress_bar,
            transferred_bytes: 0,
            start_time: Instant::now(),
        }
    }

    pub fn add_bytes(&mut self, bytes: u64) {
        self.transferred_bytes += bytes;
        self.progress_bar.set_position(self.transferred_bytes);
    }

    pub fn transferred(&self) -> u64 {
        self.transferred_bytes
    }

    pub fn finish(&self) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let avg_speed = if elapsed > 0.0 {
            (self.transferred_bytes as f64 / elapsed) as u64
        } else {
            self.transferred_bytes
        };

        self.progress_bar
            .finish_with_message(format!("done (avg speed: {})", format_speed(avg_speed)));
    }

    pub fn finish_with_error(&self, error: &str) {
        self.progress_bar.abandon_with_message(format!("failed: {}", error));
    }
}

pub fn format_speed(bytes_per_sec: u64) -> String {
    if bytes_per_sec < 1024 {
        format!("{} B/s", bytes_per_sec)
    } else if bytes_per_sec < 1024 * 1024 {
        format!("{:.2} KB/s", bytes_per_sec as f64 / 1024.0)
    } else if bytes_per_sec < 1024 * 1024 * 1024 {
        format!("{:.2} MB/s", bytes_per_sec as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB/s", bytes_per_sec as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
