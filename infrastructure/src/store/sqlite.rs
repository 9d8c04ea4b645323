//! SQLite question store
//!
//! Provisional and soft-deleted states live in separate nullable columns
//! (`provisional_since`, `deleted_at`). Batch operations each run in one
//! transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use examforge_application::{QuestionStore, StoreError};
use examforge_domain::{NewQuestion, Question, QuestionFilter, QuestionId, QuestionKind, UserId};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    question_type TEXT NOT NULL CHECK (question_type IN ('single', 'multiple')),
    options TEXT NOT NULL,
    answer TEXT NOT NULL,
    explanation TEXT NOT NULL DEFAULT '',
    keywords TEXT NOT NULL DEFAULT '',
    language TEXT NOT NULL,
    ai_model TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL,
    provisional_since TIMESTAMP NULL,
    deleted_at TIMESTAMP NULL
)
"#;

const USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_questions_user_id ON questions (user_id)";

const COLUMNS: &str = "id, title, question_type, options, answer, explanation, keywords, \
                       language, ai_model, user_id, created_at, updated_at, provisional_since, \
                       deleted_at";

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// [`QuestionStore`] over a `sqlx` SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    /// Open (creating if missing) the database at `url` and ensure the schema
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(backend)?
            .create_if_missing(true);

        // Each in-memory connection is its own database
        let mut pool_options = SqlitePoolOptions::new();
        if url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(5);
        }
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(backend)?;

        let store = Self::from_pool(pool).await?;
        info!("Opened question store: {}", url);
        Ok(store)
    }

    /// Wrap an existing pool and ensure the schema
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(SCHEMA).execute(&pool).await.map_err(backend)?;
        sqlx::query(USER_INDEX).execute(&pool).await.map_err(backend)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn row_to_question(row: &SqliteRow) -> Result<Question, StoreError> {
        let kind: String = row.try_get("question_type").map_err(backend)?;
        let kind = QuestionKind::from_str(&kind).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        Ok(Question {
            id: QuestionId(row.try_get("id").map_err(backend)?),
            title: row.try_get("title").map_err(backend)?,
            kind,
            options: row.try_get("options").map_err(backend)?,
            answer: row.try_get("answer").map_err(backend)?,
            explanation: row.try_get("explanation").map_err(backend)?,
            keywords: row.try_get("keywords").map_err(backend)?,
            language: row.try_get("language").map_err(backend)?,
            ai_model: row.try_get("ai_model").map_err(backend)?,
            user_id: UserId(row.try_get("user_id").map_err(backend)?),
            created_at: row.try_get("created_at").map_err(backend)?,
            updated_at: row.try_get("updated_at").map_err(backend)?,
            provisional_since: row
                .try_get::<Option<DateTime<Utc>>, _>("provisional_since")
                .map_err(backend)?,
            deleted_at: row
                .try_get::<Option<DateTime<Utc>>, _>("deleted_at")
                .map_err(backend)?,
        })
    }

    fn rows_to_questions(rows: &[SqliteRow]) -> Result<Vec<Question>, StoreError> {
        rows.iter().map(Self::row_to_question).collect()
    }
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn create_batch(&self, questions: Vec<NewQuestion>) -> Result<Vec<Question>, StoreError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(backend)?;
        let mut created = Vec::with_capacity(questions.len());

        for q in questions {
            let result = sqlx::query(
                "INSERT INTO questions (title, question_type, options, answer, explanation, \
                 keywords, language, ai_model, user_id, created_at, updated_at, provisional_since) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&q.title)
            .bind(q.kind.as_str())
            .bind(&q.options)
            .bind(&q.answer)
            .bind(&q.explanation)
            .bind(&q.keywords)
            .bind(&q.language)
            .bind(&q.ai_model)
            .bind(q.user_id.0)
            .bind(now)
            .bind(now)
            .bind(q.provisional_since)
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

            created.push(Question {
                id: QuestionId(result.last_insert_rowid()),
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
            });
        }

        tx.commit().await.map_err(backend)?;
        debug!("Inserted {} question(s)", created.len());
        Ok(created)
    }

    async fn find_by_id(
        &self,
        id: QuestionId,
        include_provisional: bool,
    ) -> Result<Question, StoreError> {
        let sql = if include_provisional {
            format!("SELECT {COLUMNS} FROM questions WHERE id = ? AND deleted_at IS NULL")
        } else {
            format!(
                "SELECT {COLUMNS} FROM questions \
                 WHERE id = ? AND deleted_at IS NULL AND provisional_since IS NULL"
            )
        };

        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .ok_or(StoreError::NotFound(id))?;

        Self::row_to_question(&row)
    }

    async fn find_provisional_by_user(&self, user_id: UserId) -> Result<Vec<Question>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM questions \
             WHERE user_id = ? AND provisional_since IS NOT NULL AND deleted_at IS NULL \
             ORDER BY id"
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Self::rows_to_questions(&rows)
    }

    async fn list_by_user(
        &self,
        user_id: UserId,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, StoreError> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM questions WHERE user_id = "));
        query.push_bind(user_id.0);
        query.push(" AND provisional_since IS NULL AND deleted_at IS NULL");

        if let Some(language) = &filter.language {
            query.push(" AND language = ").push_bind(language.clone());
        }
        if let Some(kind) = filter.kind {
            query.push(" AND question_type = ").push_bind(kind.as_str());
        }
        if let Some(keyword) = &filter.title_keyword {
            // instr() keeps '%' and '_' in the keyword literal
            query.push(" AND instr(title, ").push_bind(keyword.clone()).push(") > 0");
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        Self::rows_to_questions(&rows)
    }

    async fn promote(&self, ids: &[QuestionId]) -> Result<u64, StoreError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(backend)?;
        let mut promoted = 0;

        for id in ids {
            promoted += sqlx::query(
                "UPDATE questions SET provisional_since = NULL, updated_at = ? \
                 WHERE id = ? AND provisional_since IS NOT NULL AND deleted_at IS NULL",
            )
            .bind(now)
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(backend)?
            .rows_affected();
        }

        tx.commit().await.map_err(backend)?;
        debug!("Promoted {} of {} question(s)", promoted, ids.len());
        Ok(promoted)
    }

    async fn erase_hard(&self, ids: &[QuestionId]) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        let mut erased = 0;

        for id in ids {
            erased += sqlx::query(
                "DELETE FROM questions WHERE id = ? AND provisional_since IS NOT NULL",
            )
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(backend)?
            .rows_affected();
        }

        tx.commit().await.map_err(backend)?;
        debug!("Erased {} of {} question(s)", erased, ids.len());
        Ok(erased)
    }

    async fn update(&self, question: &Question) -> Result<(), StoreError> {
        let affected = sqlx::query(
            "UPDATE questions SET title = ?, question_type = ?, options = ?, answer = ?, \
             explanation = ?, keywords = ?, language = ?, ai_model = ?, updated_at = ? \
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(&question.title)
        .bind(question.kind.as_str())
        .bind(&question.options)
        .bind(&question.answer)
        .bind(&question.explanation)
        .bind(&question.keywords)
        .bind(&question.language)
        .bind(&question.ai_model)
        .bind(question.updated_at)
        .bind(question.id.0)
        .execute(&self.pool)
        .await
        .map_err(backend)?
        .rows_affected();

        if affected == 0 {
            return Err(StoreError::NotFound(question.id));
        }
        Ok(())
    }

    async fn soft_delete(&self, id: QuestionId) -> Result<(), StoreError> {
        let now = Utc::now();
        let affected = sqlx::query(
            "UPDATE questions SET deleted_at = ?, updated_at = ? \
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(backend)?
        .rows_affected();

        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
