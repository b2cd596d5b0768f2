use crate::{error, Store};
use async_trait::async_trait;
use core::{
    num::NonZeroI64,
    sync::atomic::{AtomicI64, Ordering},
};
use dashmap::DashMap;
use model::{Entry, Question, QuestionId};

/// In-process question bank. Used when no PostgreSQL instance is configured.
#[derive(Default)]
pub struct Memory {
    questions: DashMap<QuestionId, Question>,
    /// Last key handed out. Keys start at one.
    last: AtomicI64,
}

impl Memory {
    fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.questions.iter().map(|pair| Entry { id: *pair.key(), question: pair.value().clone() })
    }

    fn sorted(&self, filter: impl Fn(&Question) -> bool) -> Vec<Entry> {
        let mut entries: Vec<_> = self.entries().filter(|entry| filter(&entry.question)).collect();
        entries.sort_unstable_by_key(|entry| entry.id);
        entries
    }

    fn sample(&self, count: u32) -> Vec<Entry> {
        use rand::seq::SliceRandom;
        let amount = usize::try_from(count).unwrap_or(usize::MAX);
        let mut entries: Vec<_> = self.entries().collect();
        entries.shuffle(&mut rand::thread_rng());
        entries.truncate(amount);
        entries
    }
}

#[async_trait]
impl Store for Memory {
    async fn get_question(&self, id: QuestionId) -> error::Result<Option<Entry>> {
        Ok(self.questions.get(&id).map(|question| Entry { id, question: question.clone() }))
    }

    async fn insert_question(&self, question: &Question) -> error::Result<QuestionId> {
        let next = self.last.fetch_add(1, Ordering::Relaxed).checked_add(1).ok_or(error::Error::Fatal)?;
        let id = NonZeroI64::new(next).map(QuestionId).ok_or(error::Error::Fatal)?;
        use dashmap::mapref::entry::Entry::{Occupied, Vacant};
        match self.questions.entry(id) {
            Vacant(slot) => {
                slot.insert(question.clone());
                Ok(id)
            }
            Occupied(_) => {
                log::error!("Question key {id} was handed out twice.");
                Err(error::Error::Fatal)
            }
        }
    }

    async fn sample_questions(&self, count: u32) -> error::Result<Vec<Entry>> {
        Ok(self.sample(count))
    }

    async fn get_questions_by_category(&self, category: &str) -> error::Result<Vec<Entry>> {
        Ok(self.sorted(|question| question.category == category))
    }

    async fn get_categories(&self) -> error::Result<Vec<Box<str>>> {
        let mut categories: Vec<Box<str>> =
            self.questions.iter().map(|pair| pair.value().category.as_str().into()).collect();
        categories.sort_unstable();
        categories.dedup();
        Ok(categories)
    }

    async fn count_questions(&self) -> error::Result<u64> {
        u64::try_from(self.questions.len()).map_err(|_| error::Error::Fatal)
    }
}
