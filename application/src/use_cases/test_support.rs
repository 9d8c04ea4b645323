//! Test doubles for the application ports.

use crate::config::{ModelProfile, ModelProfiles};
use crate::ports::completion_gateway::{CompletionGateway, GatewayError};
use crate::ports::question_store::{QuestionStore, StoreError};
use async_trait::async_trait;
use chrono::Utc;
use examforge_domain::{NewQuestion, Question, QuestionFilter, QuestionId, UserId};
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) fn profiles() -> ModelProfiles {
    ModelProfiles {
        deepseek: Some(ModelProfile::new(
            "https://deepseek.test/chat/completions",
            "sk-deepseek",
            "deepseek-chat",
        )),
        tongyi: None,
    }
}

pub(crate) fn completion(questions: &[(&str, &str)]) -> String {
    let items: Vec<String> = questions
        .iter()
        .map(|(title, answer)| {
            format!(
                r#"{{"title": "{}", "options": ["a", "b", "c", "d"], "answer": "{}", "explanation": "because"}}"#,
                title, answer
            )
        })
        .collect();
    format!(r#"{{"questions": [{}]}}"#, items.join(","))
}

/// Gateway returning queued results in order
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub(crate) prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, result: Result<String, GatewayError>) -> Self {
        self.responses.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    async fn complete(&self, profile: &ModelProfile, prompt: &str) -> Result<String, GatewayError> {
        self.prompts
            .lock()
            .unwrap()
            .push((profile.model_name.clone(), prompt.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::EmptyResult))
    }
}

/// Vec-backed store with failure switches
#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) rows: Mutex<Vec<Question>>,
    pub(crate) next_id: Mutex<i64>,
    pub(crate) fail_create: bool,
    pub(crate) fail_promote: bool,
    pub(crate) fail_erase: bool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn rows(&self) -> Vec<Question> {
        self.rows.lock().unwrap().clone()
    }

    pub(crate) fn row(&self, id: QuestionId) -> Option<Question> {
        self.rows().into_iter().find(|q| q.id == id)
    }

    fn backend_failure(op: &str) -> StoreError {
        StoreError::Backend(format!("{} failed", op))
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn create_batch(&self, questions: Vec<NewQuestion>) -> Result<Vec<Question>, StoreError> {
        if self.fail_create {
            return Err(Self::backend_failure("insert"));
        }
        let mut rows = self.rows.lock().unwrap();
        let mut next_id = self.next_id.lock().unwrap();
        let now = Utc::now();
        let created: Vec<Question> = questions
            .into_iter()
            .map(|q| {
                *next_id += 1;
                Question {
                    id: QuestionId(*next_id),
                    title: q.title,
                    kind: q.kind,
                    options: q.options,
                    answer: q.answer,
                    explanation: q.explanation,
                    keywords: q.keywords,
                    language: q.language,
                    ai_model: q.ai_model,
                    user_id: q.user_id,
                    created_at: now,
                    updated_at: now,
                    provisional_since: q.provisional_since,
                    deleted_at: None,
                }
            })
            .collect();
        rows.extend(created.iter().cloned());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        id: QuestionId,
        include_provisional: bool,
    ) -> Result<Question, StoreError> {
        self.rows()
            .into_iter()
            .find(|q| {
                q.id == id && !q.is_deleted() && (include_provisional || !q.is_provisional())
            })
            .ok_or(StoreError::NotFound(id))
    }

    async fn find_provisional_by_user(&self, user_id: UserId) -> Result<Vec<Question>, StoreError> {
        Ok(self
            .rows()
            .into_iter()
            .filter(|q| q.user_id == user_id && q.is_provisional() && !q.is_deleted())
            .collect())
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, StoreError> {
        let mut rows: Vec<Question> = self
            .rows()
            .into_iter()
            .filter(|q| {
                q.user_id == user_id && !q.is_provisional() && !q.is_deleted() && filter.matches(q)
            })
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn promote(&self, ids: &[QuestionId]) -> Result<u64, StoreError> {
        if self.fail_promote {
            return Err(Self::backend_failure("promote"));
        }
        let mut count = 0;
        for q in self.rows.lock().unwrap().iter_mut() {
            if ids.contains(&q.id) && q.is_provisional() {
                q.provisional_since = None;
                count += 1;
            }
        }
        Ok(count)
    }

    async fn erase_hard(&self, ids: &[QuestionId]) -> Result<u64, StoreError> {
        if self.fail_erase {
            return Err(Self::backend_failure("erase"));
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|q| !(ids.contains(&q.id) && q.is_provisional()));
        Ok((before - rows.len()) as u64)
    }

    async fn update(&self, question: &Question) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|q| q.id == question.id && !q.is_deleted())
            .ok_or(StoreError::NotFound(question.id))?;
        *row = question.clone();
        Ok(())
    }

    async fn soft_delete(&self, id: QuestionId) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|q| q.id == id && !q.is_deleted())
            .ok_or(StoreError::NotFound(id))?;
        row.deleted_at = Some(Utc::now());
        Ok(())
    }
}
