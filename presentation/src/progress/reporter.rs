//! Progress reporting for question generation

use colored::Colorize;
use examforge_application::{GenerationProgress, GenerationStage};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

fn stage_display_name(stage: GenerationStage) -> &'static str {
    match stage {
        GenerationStage::Prompt => "Building prompt",
        GenerationStage::Request => "Waiting for the model",
        GenerationStage::Parse => "Validating questions",
        GenerationStage::Persist => "Saving provisional questions",
    }
}

/// Reports generation progress with a spinner
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgress for ProgressReporter {
    fn on_stage_start(&self, stage: GenerationStage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("{}...", stage_display_name(stage)));
        pb.enable_steady_tick(Duration::from_millis(100));

        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn on_stage_complete(&self, stage: GenerationStage, success: bool) {
        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = slot.take() {
            let mark = if success { "v".green() } else { "x".red() };
            pb.finish_with_message(format!("{} {}", mark, stage_display_name(stage)));
        }
    }

    fn on_generated(&self, count: usize) {
        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pb) = slot.take() {
            pb.finish_and_clear();
        }
        eprintln!("{} {} question(s) awaiting confirmation", "->".cyan(), count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stage_has_a_display_name() {
        for stage in [
            GenerationStage::Prompt,
            GenerationStage::Request,
            GenerationStage::Parse,
            GenerationStage::Persist,
        ] {
            assert!(!stage_display_name(stage).is_empty());
        }
    }

    #[test]
    fn test_reporter_tolerates_complete_without_start() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_complete(GenerationStage::Parse, false);
        reporter.on_stage_start(GenerationStage::Persist);
        reporter.on_stage_complete(GenerationStage::Persist, true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
