pub mod error;

mod question;
mod seed;
mod statics;
mod submit;

use db::Store;
use http_body_util::Full;
use hyper::{
    body::{Body, Bytes},
    header::{HeaderValue, CONTENT_TYPE},
    Method, Request, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;

pub use seed::seed;

pub type Reply = Response<Full<Bytes>>;

pub struct App {
    /// Persistence collaborator holding the question bank.
    store: Box<dyn Store>,
    /// Directory of the static JSON documents.
    data: PathBuf,
}

impl App {
    pub fn new(store: Box<dyn Store>, data: PathBuf) -> Self {
        Self { store, data }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Serves a single request. Errors are rendered as plain-text responses.
    pub async fn respond<B: Body>(&self, req: Request<B>) -> Reply {
        let method = req.method().clone();
        log::debug!("{method} {}", req.uri().path());

        let mut res = match self.try_respond(req).await {
            Ok(res) => res,
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    log::error!("{method} request failed: {err}");
                }
                text(status, err.to_string())
            }
        };

        use hyper::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN};
        let headers = res.headers_mut();
        assert!(headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")).is_none());
        if method == Method::OPTIONS {
            let methods = HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS");
            assert!(headers.insert(ACCESS_CONTROL_ALLOW_METHODS, methods).is_none());
            assert!(headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*")).is_none());
        }

        res
    }

    async fn try_respond<B: Body>(&self, req: Request<B>) -> error::Result<Reply> {
        let (parts, body) = req.into_parts();

        // Preflight requests are answered for any path
        if parts.method == Method::OPTIONS {
            let mut res = Response::new(Full::default());
            *res.status_mut() = StatusCode::NO_CONTENT;
            return Ok(res);
        }

        let segments: Vec<_> = parts.uri.path().trim_start_matches('/').split('/').collect();
        let store = self.store();
        match (&parts.method, segments.as_slice()) {
            (&Method::GET, ["api", "questions", "random", count]) => question::try_sample(store, count).await,
            (&Method::GET, ["api", "questions", "category", category]) => {
                question::try_filter(store, category).await
            }
            (&Method::POST, ["api", "questions"]) => question::try_add(store, body).await,
            (&Method::GET, ["api", "categories"]) => question::try_categories(store).await,
            (&Method::POST, ["api", "submit"]) => submit::try_submit(store, body).await,
            (&Method::GET, ["api", "ui-config"]) => statics::try_serve(&self.data, "ui-config.json").await,
            (&Method::GET, ["api", "interview-scenarios"]) => {
                statics::try_serve(&self.data, "interview-scenarios.json").await
            }
            (&Method::GET, ["api", "homepage-data"]) => statics::try_serve(&self.data, "homepage-data.json").await,
            (&Method::GET, ["api", "health"]) => Ok(text(StatusCode::OK, "OK")),
            (
                _,
                ["api", "questions", "random" | "category", _]
                | ["api", "questions" | "categories" | "submit" | "health"]
                | ["api", "ui-config" | "interview-scenarios" | "homepage-data"],
            ) => Err(error::Error::MethodNotAllowed),
            _ => Err(error::Error::NotFound),
        }
    }
}

/// Collects the whole body and decodes it as JSON.
async fn read_json<B: Body, T: DeserializeOwned>(body: B) -> error::Result<T> {
    use http_body_util::BodyExt;
    use hyper::body::Buf;
    let reader = body.collect().await.map_err(|_| error::Error::MalformedBody)?.aggregate().reader();
    serde_json::from_reader(reader).map_err(|_| error::Error::MalformedBody)
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> error::Result<Reply> {
    let bytes = serde_json::to_vec(value).map_err(|_| error::Error::Fatal)?;
    Ok(with_type(status, bytes.into(), "application/json"))
}

fn text(status: StatusCode, message: impl Into<Bytes>) -> Reply {
    with_type(status, message.into(), "text/plain; charset=utf-8")
}

fn with_type(status: StatusCode, bytes: Bytes, mime: &'static str) -> Reply {
    let mut res = Response::new(Full::new(bytes));
    *res.status_mut() = status;
    assert!(res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(mime)).is_none());
    res
}
