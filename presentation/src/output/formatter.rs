//! Output formatter trait

use examforge_application::ConfirmQuestionsOutput;
use examforge_domain::{Question, QuestionId};

/// Renders command results
pub trait OutputFormatter {
    /// Questions just generated (still provisional)
    fn generated(&self, questions: &[Question]) -> String;

    /// A listing of confirmed questions
    fn question_list(&self, questions: &[Question]) -> String;

    /// One question in full
    fn question(&self, question: &Question) -> String;

    fn confirmation(&self, output: &ConfirmQuestionsOutput) -> String;

    fn deleted(&self, id: QuestionId) -> String;
}
