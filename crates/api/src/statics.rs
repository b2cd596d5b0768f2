use crate::{error, with_type, Reply};
use hyper::StatusCode;
use std::path::Path;

/// Serves a JSON document from the data directory verbatim.
pub async fn try_serve(dir: &Path, name: &str) -> error::Result<Reply> {
    let path = dir.join(name);
    let bytes = tokio::fs::read(&path).await.map_err(|err| {
        log::warn!("Cannot read {}: {err}", path.display());
        error::Error::MissingFile
    })?;
    Ok(with_type(StatusCode::OK, bytes.into(), "application/json"))
}

#[cfg(test)]
mod tests {
    use super::try_serve;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    #[tokio::test(flavor = "current_thread")]
    async fn serves_existing_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ui-config.json"), r#"{"theme":"dark"}"#).unwrap();

        let res = try_serve(dir.path(), "ui-config.json").await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["content-type"], "application/json");
        assert_eq!(res.into_body().collect().await.unwrap().to_bytes(), r#"{"theme":"dark"}"#);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_documents_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let Err(err) = try_serve(dir.path(), "homepage-data.json").await else {
            panic!("served a file that does not exist");
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
