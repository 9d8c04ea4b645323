//! Generation domain
//!
//! Pure logic around AI-generated questions: turning completion text into
//! validated drafts ([`parsing`]) and splitting provisional questions by
//! the owner's selection ([`selection`]).

pub mod parsing;
pub mod selection;

pub use parsing::{ParseError, SkipReason, parse_generated_questions, strip_code_fence};
pub use selection::SelectionPartition;
