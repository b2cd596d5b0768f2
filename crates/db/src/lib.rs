pub mod error;

mod memory;

use async_trait::async_trait;
use core::num::NonZeroI64;
use futures_util::TryStreamExt;
use model::{Difficulty, Entry, Kind, Question, QuestionId};
use tokio_postgres::Row;

pub use memory::Memory;
pub use tokio_postgres::{tls::NoTls, Client, Config};

/// Persistence collaborator for the question bank. Implementations only store and fetch; they
/// never validate what they are given.
#[async_trait]
pub trait Store: Send + Sync {
    /// Looks up a single question. `None` means the key does not exist.
    async fn get_question(&self, id: QuestionId) -> error::Result<Option<Entry>>;
    /// Persists a question and returns its newly assigned key.
    async fn insert_question(&self, question: &Question) -> error::Result<QuestionId>;
    /// Returns up to `count` questions in no particular order.
    async fn sample_questions(&self, count: u32) -> error::Result<Vec<Entry>>;
    /// Returns every question whose category matches exactly.
    async fn get_questions_by_category(&self, category: &str) -> error::Result<Vec<Entry>>;
    /// Returns the distinct categories in sorted order.
    async fn get_categories(&self) -> error::Result<Vec<Box<str>>>;
    async fn count_questions(&self) -> error::Result<u64>;
}

pub struct Database(Client);

impl From<Client> for Database {
    fn from(client: Client) -> Self {
        Self(client)
    }
}

fn deserialize_entry_from_row(row: Row) -> error::Result<Entry> {
    let id: i64 = row.try_get("id")?;
    let id = NonZeroI64::new(id).map(QuestionId).ok_or(error::Error::Corrupted)?;
    let difficulty = Difficulty::parse(row.try_get("difficulty")?).ok_or(error::Error::Corrupted)?;
    let kind = Kind::parse(row.try_get("kind")?).ok_or(error::Error::Corrupted)?;
    let question = Question {
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        category: row.try_get("category")?,
        difficulty,
        kind,
        options: row.try_get("options")?,
    };
    Ok(Entry { id, question })
}

#[async_trait]
impl Store for Database {
    async fn get_question(&self, id: QuestionId) -> error::Result<Option<Entry>> {
        let qid = id.get();
        self.0
            .query_opt(
                "SELECT id, question, answer, category, difficulty, kind, options FROM question WHERE id = $1",
                &[&qid],
            )
            .await?
            .map(deserialize_entry_from_row)
            .transpose()
    }

    async fn insert_question(&self, question: &Question) -> error::Result<QuestionId> {
        let Question { question, answer, category, difficulty, kind, options } = question;
        let row = self
            .0
            .query_one(
                "INSERT INTO question (question, answer, category, difficulty, kind, options) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
                &[question, answer, category, &difficulty.as_str(), &kind.as_str(), options],
            )
            .await?;
        let id: i64 = row.try_get("id")?;
        NonZeroI64::new(id).map(QuestionId).ok_or(error::Error::Fatal)
    }

    async fn sample_questions(&self, count: u32) -> error::Result<Vec<Entry>> {
        let limit = i64::from(count);
        self.0
            .query_raw(
                "SELECT id, question, answer, category, difficulty, kind, options FROM question \
                 ORDER BY random() LIMIT $1",
                &[&limit],
            )
            .await?
            .map_err(error::Error::from)
            .and_then(|row| core::future::ready(deserialize_entry_from_row(row)))
            .try_collect()
            .await
    }

    async fn get_questions_by_category(&self, category: &str) -> error::Result<Vec<Entry>> {
        self.0
            .query_raw(
                "SELECT id, question, answer, category, difficulty, kind, options FROM question \
                 WHERE category = $1 ORDER BY id",
                &[&category],
            )
            .await?
            .map_err(error::Error::from)
            .and_then(|row| core::future::ready(deserialize_entry_from_row(row)))
            .try_collect()
            .await
    }

    async fn get_categories(&self) -> error::Result<Vec<Box<str>>> {
        let rows = self.0.query("SELECT DISTINCT category FROM question ORDER BY category", &[]).await?;
        rows.into_iter()
            .map(|row| -> error::Result<Box<str>> {
                let category: String = row.try_get("category")?;
                Ok(category.into_boxed_str())
            })
            .collect()
    }

    async fn count_questions(&self) -> error::Result<u64> {
        let row = self.0.query_one("SELECT COUNT(*) AS count FROM question", &[]).await?;
        let count: i64 = row.try_get("count")?;
        u64::try_from(count).map_err(|_| error::Error::Fatal)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Database, NoTls, Store};
    use model::{Difficulty, Kind, Question};

    #[tokio::test(flavor = "current_thread")]
    async fn database_test() {
        use std::env::var;
        let Ok(host) = var("PG_HOSTNAME") else {
            return;
        };
        let user = var("PG_USERNAME").unwrap();
        let pass = var("PG_PASSWORD").unwrap();
        let data = var("PG_DATABASE").unwrap();

        let (client, conn) = Config::new()
            .user(&user)
            .password(&pass)
            .host(&host)
            .dbname(&data)
            .port(5432)
            .connect(NoTls)
            .await
            .expect("cannot connect to database");
        let handle = tokio::spawn(conn);
        let db = Database::from(client);

        // Unique category so that reruns do not interfere with each other
        let nonce = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_nanos();
        let category = format!("Scheduling {nonce}");

        let question = Question {
            question: "Which component assigns Pods to Nodes?".into(),
            answer: "kube-scheduler".into(),
            category: category.clone(),
            difficulty: Difficulty::Medium,
            kind: Kind::MultipleChoice,
            options: vec!["kubelet".into(), "kube-scheduler".into(), "etcd".into()],
        };
        let before = db.count_questions().await.unwrap();
        let id = db.insert_question(&question).await.unwrap();
        assert_eq!(db.count_questions().await.unwrap(), before + 1);

        let entry = db.get_question(id).await.unwrap().unwrap();
        assert_eq!(entry.id, id);
        assert_eq!(entry.question, question);

        let entries = db.get_questions_by_category(&category).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);

        let categories = db.get_categories().await.unwrap();
        assert!(categories.iter().any(|name| name.as_ref() == category));
        assert!(db.sample_questions(1).await.unwrap().len() <= 1);

        drop(db);
        handle.await.unwrap().unwrap();
    }
}
