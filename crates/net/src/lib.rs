use std::io::Read;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const USER_AGENT: &str = "WebShell/0.1";
const TIMEOUT: Duration = Duration::from_secs(10);
const BODY_LIMIT: u64 = 512 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("client build error: {0}")]
    Client(reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("reading body failed: {0}")]
    Body(#[from] std::io::Error),
    #[error("server answered {0}")]
    Status(u16),
}

#[derive(Debug)]
pub struct FetchedDocument {
    pub url: String, // final URL after redirects
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
    pub truncated: bool,
}

pub struct FetchResult {
    pub requested_url: String, // what we asked for
    pub duration_ms: u128,
    pub outcome: Result<FetchedDocument, FetchError>,
}

pub type FetchCallback = Arc<dyn Fn(FetchResult) + Send + Sync>;

/// Fetches `url` on a worker thread and hands the result to `cb` there.
pub fn fetch_document(url: String, cb: FetchCallback) {
    thread::spawn(move || {
        let start = Instant::now();
        log::debug!("fetching {url}");
        let outcome = fetch_blocking(&url);
        if let Err(err) = &outcome {
            log::debug!("fetch of {url} failed: {err}");
        }
        cb(FetchResult {
            requested_url: url,
            duration_ms: start.elapsed().as_millis(),
            outcome,
        });
    });
}

fn fetch_blocking(url: &str) -> Result<FetchedDocument, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(FetchError::Client)?;

    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }
    let final_url = resp.url().to_string();
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let mut buf = Vec::with_capacity(64 * 1024);
    resp.take(BODY_LIMIT + 1).read_to_end(&mut buf)?;
    let truncated = buf.len() as u64 > BODY_LIMIT;
    buf.truncate(BODY_LIMIT as usize);

    Ok(FetchedDocument {
        url: final_url,
        status: status.as_u16(),
        content_type,
        body: String::from_utf8_lossy(&buf).into_owned(),
        truncated,
    })
}

pub fn is_html(content_type: &Option<String>) -> bool {
    content_type
        .as_deref()
        .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(true)
}
