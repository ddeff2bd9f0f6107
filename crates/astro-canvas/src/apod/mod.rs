//! NASA Astronomy Picture of the Day: request building, response decoding
//! and a transport seam so the fetch can happen in JS, natively, or in a
//! test double.
//!
//! Every failure (offline, non-200, malformed body) ends in "no entry";
//! callers show an empty state rather than an error.

mod panel;

pub use panel::{ApodPanel, PanelState, EMPTY_MESSAGE};

use serde::{Deserialize, Serialize};

use crate::error::ApodError;

pub const APOD_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";
pub const DEMO_KEY: &str = "DEMO_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// One APOD record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodEntry {
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    pub url: String,
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl ApodEntry {
    /// Displayable image, or `None` for videos and other media.
    pub fn image_url(&self) -> Option<&str> {
        (self.media_type == MediaType::Image && !self.url.is_empty()).then_some(self.url.as_str())
    }

    /// Credit line; public-domain entries have no copyright holder.
    pub fn credit(&self) -> &str {
        self.copyright.as_deref().map(str::trim).unwrap_or("NASA")
    }
}

/// Query for one day's entry (today when `date` is absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApodRequest {
    pub api_key: String,
    pub date: Option<String>,
}

impl ApodRequest {
    /// An empty key means `DEMO_KEY`. Keys with characters outside
    /// `[A-Za-z0-9_-]` are rejected the same way.
    pub fn new(api_key: &str) -> Self {
        let api_key = api_key.trim();
        let api_key = if api_key.is_empty() {
            DEMO_KEY
        } else if is_api_key(api_key) {
            api_key
        } else {
            log::warn!("apod: ignoring malformed api key; using {DEMO_KEY}");
            DEMO_KEY
        };
        Self {
            api_key: api_key.to_string(),
            date: None,
        }
    }

    /// Ask for a specific `YYYY-MM-DD` date. Malformed dates are ignored and
    /// today's picture is requested instead.
    pub fn with_date(mut self, date: &str) -> Self {
        if is_iso_date(date) {
            self.date = Some(date.to_string());
        } else {
            log::warn!("apod: ignoring malformed date {date:?}");
        }
        self
    }

    pub fn url(&self) -> String {
        match &self.date {
            Some(date) => format!("{APOD_ENDPOINT}?api_key={}&date={date}", self.api_key),
            None => format!("{APOD_ENDPOINT}?api_key={}", self.api_key),
        }
    }
}

impl Default for ApodRequest {
    fn default() -> Self {
        Self::new(DEMO_KEY)
    }
}

fn is_api_key(key: &str) -> bool {
    key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn is_iso_date(date: &str) -> bool {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = *parts.as_slice() else {
        return false;
    };
    let numeric = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !(numeric(year, 4) && numeric(month, 2) && numeric(day, 2)) {
        return false;
    }
    let month: u32 = month.parse().unwrap_or(0);
    let day: u32 = day.parse().unwrap_or(0);
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Raw HTTP result handed over by whichever side performed the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs the GET. Non-2xx answers are returned as responses, not errors.
pub trait ApodTransport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, ApodError>;
}

/// Decode a response into an entry.
pub fn parse_response(response: &HttpResponse) -> Result<ApodEntry, ApodError> {
    if response.status != 200 {
        return Err(ApodError::Status(response.status));
    }
    serde_json::from_str(&response.body).map_err(ApodError::Parse)
}

/// Fetches APOD entries over a pluggable transport.
pub struct ApodClient<T: ApodTransport> {
    transport: T,
}

impl<T: ApodTransport> ApodClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The entry for `request`, or `None` on any failure (logged).
    pub fn fetch(&mut self, request: &ApodRequest) -> Option<ApodEntry> {
        let url = request.url();
        match self.transport.get(&url).and_then(|r| parse_response(&r)) {
            Ok(entry) => {
                log::info!("apod: loaded {:?} for {}", entry.title, entry.date);
                Some(entry)
            }
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }
}

/// Blocking transport for native builds.
#[cfg(feature = "native-http")]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "native-http")]
impl UreqTransport {
    pub fn new(timeout: std::time::Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

#[cfg(feature = "native-http")]
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(std::time::Duration::from_secs(10))
    }
}

#[cfg(feature = "native-http")]
impl ApodTransport for UreqTransport {
    fn get(&mut self, url: &str) -> Result<HttpResponse, ApodError> {
        match self.agent.get(url).call() {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string().map_err(|e| ApodError::Transport(e.to_string()))?;
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Status(status, resp)) => Ok(HttpResponse {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(e) => Err(ApodError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "date": "2024-04-08",
        "title": "Totality over Texas",
        "explanation": "The Moon covers the Sun.",
        "url": "https://apod.nasa.gov/apod/image/2404/eclipse.jpg",
        "hdurl": "https://apod.nasa.gov/apod/image/2404/eclipse_big.jpg",
        "media_type": "image",
        "service_version": "v1"
    }"#;

    struct Canned(Result<HttpResponse, ApodError>);

    impl ApodTransport for Canned {
        fn get(&mut self, _url: &str) -> Result<HttpResponse, ApodError> {
            match &self.0 {
                Ok(r) => Ok(r.clone()),
                Err(e) => Err(ApodError::Transport(e.to_string())),
            }
        }
    }

    fn ok(body: &str) -> Canned {
        Canned(Ok(HttpResponse { status: 200, body: body.to_string() }))
    }

    #[test]
    fn request_url_with_and_without_date() {
        let req = ApodRequest::new("abc");
        assert_eq!(req.url(), "https://api.nasa.gov/planetary/apod?api_key=abc");
        let req = req.with_date("2024-04-08");
        assert_eq!(req.url(), "https://api.nasa.gov/planetary/apod?api_key=abc&date=2024-04-08");
    }

    #[test]
    fn malformed_date_falls_back_to_today() {
        let req = ApodRequest::default().with_date("2024-13-01").with_date("04/08/2024");
        assert_eq!(req.date, None);
        assert!(req.url().ends_with("api_key=DEMO_KEY"));
    }

    #[test]
    fn key_with_query_characters_is_rejected() {
        let req = ApodRequest::new("abc&date=1999-01-01#x");
        assert_eq!(req.url(), "https://api.nasa.gov/planetary/apod?api_key=DEMO_KEY");
        let req = ApodRequest::new(" k3y_Ab-9 ");
        assert_eq!(req.url(), "https://api.nasa.gov/planetary/apod?api_key=k3y_Ab-9");
    }

    #[test]
    fn fetch_decodes_entry() {
        let entry = ApodClient::new(ok(SAMPLE)).fetch(&ApodRequest::default()).unwrap();
        assert_eq!(entry.title, "Totality over Texas");
        assert_eq!(entry.image_url(), Some("https://apod.nasa.gov/apod/image/2404/eclipse.jpg"));
        assert_eq!(entry.credit(), "NASA");
    }

    #[test]
    fn failures_become_none() {
        let offline = Canned(Err(ApodError::Transport("offline".into())));
        assert!(ApodClient::new(offline).fetch(&ApodRequest::default()).is_none());

        let throttled = Canned(Ok(HttpResponse { status: 429, body: String::new() }));
        assert!(ApodClient::new(throttled).fetch(&ApodRequest::default()).is_none());

        assert!(ApodClient::new(ok("<html>")).fetch(&ApodRequest::default()).is_none());
    }

    #[test]
    fn non_200_maps_to_status_error() {
        let err = parse_response(&HttpResponse { status: 503, body: SAMPLE.into() }).unwrap_err();
        assert!(matches!(err, ApodError::Status(503)));
    }

    #[test]
    fn video_and_unknown_media_have_no_image() {
        let video = SAMPLE.replace(r#""media_type": "image""#, r#""media_type": "video""#);
        let entry = parse_response(&HttpResponse { status: 200, body: video }).unwrap();
        assert_eq!(entry.media_type, MediaType::Video);
        assert_eq!(entry.image_url(), None);

        let other = SAMPLE.replace(r#""media_type": "image""#, r#""media_type": "interactive""#);
        let entry = parse_response(&HttpResponse { status: 200, body: other }).unwrap();
        assert_eq!(entry.media_type, MediaType::Other);
        assert_eq!(entry.image_url(), None);
    }
}
