use crate::{error, json, read_json, Reply};
use db::Store;
use hyper::{body::Body, StatusCode};
use model::{Entry, QuestionId, Submission};

/// Grades a submission against its stored question. The identifier must resolve before any
/// grading takes place.
pub async fn try_submit<B: Body>(store: &dyn Store, body: B) -> error::Result<Reply> {
    let submission: Submission = read_json(body).await?;
    let id: QuestionId = submission.question_id.parse().map_err(|_| error::Error::InvalidIdentifier)?;
    let Entry { question, .. } = store.get_question(id).await?.ok_or(error::Error::QuestionNotFound)?;

    let verdict = model::grade(&question, &submission);
    log::debug!("Graded submission for question {id}: score {}.", verdict.score);
    json(StatusCode::OK, &verdict)
}
