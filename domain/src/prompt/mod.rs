//! Prompt domain
//!
//! Builds the instruction sent to the completion provider.

mod template;

pub use template::QuestionPromptTemplate;
