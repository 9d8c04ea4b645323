//! Progress notification port
//!
//! Defines the interface for reporting progress during question generation.

/// Stages of one generation call, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStage {
    Prompt,
    Request,
    Parse,
    Persist,
}

impl GenerationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStage::Prompt => "prompt",
            GenerationStage::Request => "request",
            GenerationStage::Parse => "parse",
            GenerationStage::Persist => "persist",
        }
    }
}

/// Callback for progress updates during generation
///
/// Implementations live in the presentation layer.
pub trait GenerationProgress: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: GenerationStage);

    /// Called when a stage ends
    fn on_stage_complete(&self, stage: GenerationStage, success: bool);

    /// Called once the batch is saved
    fn on_generated(&self, _count: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl GenerationProgress for NoProgress {
    fn on_stage_start(&self, _stage: GenerationStage) {}
    fn on_stage_complete(&self, _stage: GenerationStage, _success: bool) {}
}
