//! Confirm Questions use case
//!
//! Reconciles a user's provisional set against their selection: selected
//! questions are promoted to confirmed, every other provisional question of
//! that user is erased for good. Confirmed questions are never touched.

use crate::ports::question_store::{QuestionStore, StoreError};
use crate::use_cases::shared::{UserLocks, lock_user};
use examforge_domain::{ErrorKind, QuestionId, SelectionPartition, UserId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during confirmation
#[derive(Error, Debug)]
pub enum ConfirmQuestionsError {
    #[error("Failed to load provisional questions: {0}")]
    Load(StoreError),

    #[error("Failed to promote selected questions: {0}")]
    Promote(StoreError),

    #[error("Failed to discard unselected questions: {0}")]
    Discard(StoreError),

    #[error("Failed to promote ({promote}) and to discard ({discard})")]
    Both {
        promote: StoreError,
        discard: StoreError,
    },
}

impl ConfirmQuestionsError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::StoreError
    }
}

/// Input for the ConfirmQuestions use case
#[derive(Debug, Clone)]
pub struct ConfirmQuestionsInput {
    pub user_id: UserId,
    pub selected: Vec<QuestionId>,
}

impl ConfirmQuestionsInput {
    pub fn new(user_id: UserId, selected: impl IntoIterator<Item = QuestionId>) -> Self {
        Self {
            user_id,
            selected: selected.into_iter().collect(),
        }
    }
}

/// Row counts affected by one confirmation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmQuestionsOutput {
    pub confirmed: u64,
    pub discarded: u64,
}

/// Use case for confirming a selection of provisional questions
pub struct ConfirmQuestionsUseCase<S: QuestionStore + 'static> {
    store: Arc<S>,
    locks: Option<Arc<UserLocks>>,
}

impl<S: QuestionStore + 'static> ConfirmQuestionsUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store, locks: None }
    }

    pub fn with_user_locks(mut self, locks: Arc<UserLocks>) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Promote the selection and erase the rest of the provisional set.
    ///
    /// Selected ids outside the caller's provisional set are ignored, so a
    /// user can neither promote nor erase another user's questions.
    /// A failed promotion does not stop the erase.
    pub async fn execute(
        &self,
        input: ConfirmQuestionsInput,
    ) -> Result<ConfirmQuestionsOutput, ConfirmQuestionsError> {
        let _guard = lock_user(&self.locks, input.user_id).await;

        let provisional = self
            .store
            .find_provisional_by_user(input.user_id)
            .await
            .map_err(ConfirmQuestionsError::Load)?;

        let partition = SelectionPartition::from_selection(&provisional, &input.selected);
        if partition.is_empty() {
            info!("User {} has no provisional questions", input.user_id);
            return Ok(ConfirmQuestionsOutput::default());
        }

        let ignored = input
            .selected
            .iter()
            .filter(|id| !partition.keep.contains(*id))
            .count();
        if ignored > 0 {
            warn!(
                "Ignoring {} selected id(s) outside user {}'s provisional set",
                ignored, input.user_id
            );
        }

        let promoted = if partition.keep.is_empty() {
            Ok(0)
        } else {
            self.store.promote(&partition.keep).await
        };
        let erased = if partition.discard.is_empty() {
            Ok(0)
        } else {
            self.store.erase_hard(&partition.discard).await
        };

        match (promoted, erased) {
            (Ok(confirmed), Ok(discarded)) => {
                info!(
                    "User {}: confirmed {}, discarded {}",
                    input.user_id, confirmed, discarded
                );
                Ok(ConfirmQuestionsOutput {
                    confirmed,
                    discarded,
                })
            }
            (Err(promote), Ok(_)) => Err(ConfirmQuestionsError::Promote(promote)),
            (Ok(_), Err(discard)) => Err(ConfirmQuestionsError::Discard(discard)),
            (Err(promote), Err(discard)) => Err(ConfirmQuestionsError::Both { promote, discard }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::question_store::QuestionStore;
    use crate::use_cases::test_support::MemoryStore;
    use chrono::Utc;
    use examforge_domain::{DraftQuestion, NewQuestion, QuestionKind};

    fn draft(title: &str) -> DraftQuestion {
        DraftQuestion {
            title: title.to_string(),
            kind: QuestionKind::Single,
            options: r#"["a","b","c","d"]"#.to_string(),
            answer: "A".to_string(),
            explanation: String::new(),
        }
    }

    fn batch(user: i64, titles: &[&str]) -> Vec<NewQuestion> {
        titles
            .iter()
            .map(|t| {
                draft(t).stamp(
                    UserId(user),
                    &examforge_domain::AiModel::DeepSeek,
                    "Go",
                    "",
                    Utc::now(),
                )
            })
            .collect()
    }

    async fn seeded(store: MemoryStore) -> Arc<MemoryStore> {
        let store = Arc::new(store);
        store
            .create_batch(batch(7, &["q1", "q2", "q3", "q4"]))
            .await
            .unwrap();
        store
    }

    fn ids(raw: &[i64]) -> Vec<QuestionId> {
        raw.iter().copied().map(QuestionId).collect()
    }

    #[tokio::test]
    async fn test_keeps_selected_and_erases_rest() {
        let store = seeded(MemoryStore::new()).await;
        let use_case = ConfirmQuestionsUseCase::new(Arc::clone(&store));

        let output = use_case
            .execute(ConfirmQuestionsInput::new(UserId(7), ids(&[2, 4])))
            .await
            .unwrap();

        assert_eq!(
            output,
            ConfirmQuestionsOutput {
                confirmed: 2,
                discarded: 2
            }
        );
        let remaining: Vec<i64> = store.rows().iter().map(|q| q.id.0).collect();
        assert_eq!(remaining, vec![2, 4]);
        assert!(store.rows().iter().all(|q| !q.is_provisional()));
    }

    #[tokio::test]
    async fn test_second_confirmation_is_a_no_op() {
        let store = seeded(MemoryStore::new()).await;
        let use_case = ConfirmQuestionsUseCase::new(Arc::clone(&store));
        let input = ConfirmQuestionsInput::new(UserId(7), ids(&[2, 4]));

        use_case.execute(input.clone()).await.unwrap();
        let second = use_case.execute(input).await.unwrap();

        assert_eq!(second, ConfirmQuestionsOutput::default());
        assert_eq!(store.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_selection_erases_everything_provisional() {
        let store = seeded(MemoryStore::new()).await;
        let use_case = ConfirmQuestionsUseCase::new(Arc::clone(&store));

        let output = use_case
            .execute(ConfirmQuestionsInput::new(UserId(7), Vec::new()))
            .await
            .unwrap();

        assert_eq!(output.confirmed, 0);
        assert_eq!(output.discarded, 4);
        assert!(store.rows().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_questions_survive_later_confirmation() {
        let store = seeded(MemoryStore::new()).await;
        let use_case = ConfirmQuestionsUseCase::new(Arc::clone(&store));
        use_case
            .execute(ConfirmQuestionsInput::new(UserId(7), ids(&[1])))
            .await
            .unwrap();

        store.create_batch(batch(7, &["q5", "q6"])).await.unwrap();
        let output = use_case
            .execute(ConfirmQuestionsInput::new(UserId(7), ids(&[6])))
            .await
            .unwrap();

        assert_eq!(output.discarded, 1);
        let remaining: Vec<i64> = store.rows().iter().map(|q| q.id.0).collect();
        assert_eq!(remaining, vec![1, 6]);
    }

    #[tokio::test]
    async fn test_other_users_questions_untouched() {
        let store = seeded(MemoryStore::new()).await;
        store.create_batch(batch(8, &["theirs"])).await.unwrap();
        let use_case = ConfirmQuestionsUseCase::new(Arc::clone(&store));

        // id 5 belongs to user 8
        let output = use_case
            .execute(ConfirmQuestionsInput::new(UserId(7), ids(&[5])))
            .await
            .unwrap();

        assert_eq!(output.confirmed, 0);
        let theirs = store.row(QuestionId(5)).unwrap();
        assert!(theirs.is_provisional());
        assert_eq!(theirs.user_id, UserId(8));
    }

    #[tokio::test]
    async fn test_promote_failure_still_discards() {
        let store = seeded(MemoryStore {
            fail_promote: true,
            ..MemoryStore::new()
        })
        .await;
        let use_case = ConfirmQuestionsUseCase::new(Arc::clone(&store));

        let err = use_case
            .execute(ConfirmQuestionsInput::new(UserId(7), ids(&[2, 4])))
            .await
            .unwrap_err();

        assert!(matches!(err, ConfirmQuestionsError::Promote(_)));
        assert_eq!(err.kind(), ErrorKind::StoreError);
        let remaining: Vec<i64> = store.rows().iter().map(|q| q.id.0).collect();
        assert_eq!(remaining, vec![2, 4]);
        assert!(store.rows().iter().all(|q| q.is_provisional()));
    }

    #[tokio::test]
    async fn test_both_failures_reported() {
        let store = seeded(MemoryStore {
            fail_promote: true,
            fail_erase: true,
            ..MemoryStore::new()
        })
        .await;
        let use_case = ConfirmQuestionsUseCase::new(Arc::clone(&store));

        let err = use_case
            .execute(ConfirmQuestionsInput::new(UserId(7), ids(&[1])))
            .await
            .unwrap_err();

        assert!(matches!(err, ConfirmQuestionsError::Both { .. }));
        assert_eq!(store.rows().len(), 4);
    }

    #[tokio::test]
    async fn test_with_user_locks() {
        let store = seeded(MemoryStore::new()).await;
        let locks = Arc::new(UserLocks::new());
        let use_case =
            ConfirmQuestionsUseCase::new(Arc::clone(&store)).with_user_locks(Arc::clone(&locks));

        let output = use_case
            .execute(ConfirmQuestionsInput::new(UserId(7), ids(&[3])))
            .await
            .unwrap();

        assert_eq!(output.confirmed, 1);
        // guard released after execute
        let _guard = locks.acquire(UserId(7)).await;
    }
}
