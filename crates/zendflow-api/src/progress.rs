use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while waiting on an asynchronous server operation.
///
/// indicatif keeps it invisible when stderr is not a terminal.
pub struct PollProgress {
    progress_bar: ProgressBar,
    operation: String,
}

impl PollProgress {
    pub fn new(operation: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message(format!("Waiting for {}...", operation));

        Self {
            progress_bar: pb,
            operation: operation.to_string(),
        }
    }

    pub fn hidden(operation: &str) -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
            operation: operation.to_string(),
        }
    }

    /// One status check done
    pub fn tick(&self, attempt: u32) {
        self.progress_bar
            .set_message(format!("Waiting for {} (check #{})", self.operation, attempt));
        self.progress_bar.tick();
    }

    pub fn finish(&self) {
        self.progress_bar
            .finish_with_message(format!("{} complete", self.operation));
    }

    pub fn abandon(&self, reason: &str) {
        self.progress_bar
            .abandon_with_message(format!("{}: {}", self.operation, reason));
    }
}
