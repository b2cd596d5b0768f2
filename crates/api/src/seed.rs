use crate::error;
use db::Store;
use model::Question;
use serde_json::Value;
use std::path::Path;

/// Fills an empty store with the questions listed in the JSON file at `path`. Seed data is
/// trusted as-is and does not go through validation, but rows that cannot be decoded are logged
/// and skipped. Returns how many questions were inserted.
pub async fn seed(store: &dyn Store, path: &Path) -> error::Result<usize> {
    let count = store.count_questions().await?;
    if count > 0 {
        log::info!("Store already has {count} questions. Skipping seed.");
        return Ok(0);
    }

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("Cannot read seed file {}: {err}", path.display());
            return Ok(0);
        }
    };

    let rows: Vec<Value> = match serde_json::from_slice(&bytes) {
        Ok(rows) => rows,
        Err(err) => {
            log::warn!("Cannot parse seed file {}: {err}", path.display());
            return Ok(0);
        }
    };

    let mut seeded = 0;
    for (index, row) in rows.into_iter().enumerate() {
        let question = match decode_row(row) {
            Ok(question) => question,
            Err(err) => {
                log::warn!("Skipping seed row {index}: {err}");
                continue;
            }
        };
        store.insert_question(&question).await?;
        seeded += 1;
    }

    log::info!("Seeded {seeded} questions.");
    Ok(seeded)
}

/// Decodes one seed row. An empty difficulty counts as a missing one.
fn decode_row(mut row: Value) -> serde_json::Result<Question> {
    if let Some(fields) = row.as_object_mut() {
        if fields.get("difficulty").and_then(Value::as_str) == Some("") {
            fields.remove("difficulty");
        }
    }
    serde_json::from_value(row)
}
