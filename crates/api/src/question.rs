use crate::{error, json, read_json, Reply};
use db::Store;
use hyper::{body::Body, StatusCode};
use model::{Draft, Entry, QuestionId};
use serde::Serialize;

/// Number of questions served when the requested count is unusable.
const DEFAULT_SAMPLE: u32 = 5;

#[derive(Serialize)]
struct Created<'e> {
    message: &'static str,
    question: &'e Entry,
    id: QuestionId,
}

pub async fn try_sample(store: &dyn Store, count: &str) -> error::Result<Reply> {
    let count = count.parse().unwrap_or(DEFAULT_SAMPLE);
    let entries = store.sample_questions(count).await?;
    json(StatusCode::OK, &entries)
}

pub async fn try_filter(store: &dyn Store, category: &str) -> error::Result<Reply> {
    let category = urlencoding::decode(category).map_err(|_| error::Error::MalformedPath)?;
    let entries = store.get_questions_by_category(&category).await?;
    json(StatusCode::OK, &entries)
}

pub async fn try_categories(store: &dyn Store) -> error::Result<Reply> {
    let categories = store.get_categories().await?;
    json(StatusCode::OK, &categories)
}

/// Validates the submitted question before handing it to the store.
pub async fn try_add<B: Body>(store: &dyn Store, body: B) -> error::Result<Reply> {
    let draft: Draft = read_json(body).await?;
    let question = model::validate(draft)?;
    let id = store.insert_question(&question).await?;
    log::info!("Added question {id} to category {:?}.", question.category);

    let entry = Entry { id, question };
    json(StatusCode::CREATED, &Created { message: "Question added.", question: &entry, id })
}
