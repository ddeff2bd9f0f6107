use glam::Vec2;

use super::{parse_response, ApodEntry, HttpResponse, MediaType};
use crate::canvas::{Canvas2D, Color, TextStyle};

pub const EMPTY_MESSAGE: &str = "No picture available today";
const LOADING_MESSAGE: &str = "Loading picture of the day...";
const SUMMARY_CHARS: usize = 140;

const CARD: Color = Color::new(0.04, 0.06, 0.16, 0.92);
const BORDER: Color = Color::new(0.45, 0.55, 0.95, 0.5);
const TITLE: TextStyle = TextStyle::new(16.0, Color::WHITE);
const META: TextStyle = TextStyle::new(11.0, Color::new(0.7, 0.78, 1.0, 0.9));
const BODY: TextStyle = TextStyle::new(12.0, Color::new(0.88, 0.9, 1.0, 0.9));
const MUTED: TextStyle = TextStyle::new(13.0, Color::new(0.7, 0.75, 0.9, 0.8)).centered();

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    Loading,
    Ready(ApodEntry),
    Empty,
}

/// Picture-of-the-day card. Starts out loading and settles exactly once
/// per request into an entry or the empty state.
#[derive(Debug, Clone, PartialEq)]
pub struct ApodPanel {
    state: PanelState,
}

impl ApodPanel {
    pub fn new() -> Self {
        Self { state: PanelState::Loading }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Back to loading before a new request goes out.
    pub fn reset(&mut self) {
        self.state = PanelState::Loading;
    }

    /// Settle from a raw HTTP response.
    pub fn receive(&mut self, status: u16, body: &str) {
        let response = HttpResponse { status, body: body.to_string() };
        self.state = match parse_response(&response) {
            Ok(entry) => PanelState::Ready(entry),
            Err(e) => {
                log::warn!("{e}");
                PanelState::Empty
            }
        };
    }

    /// Settle from an entry (or its absence) fetched by an `ApodClient`.
    pub fn settle(&mut self, entry: Option<ApodEntry>) {
        self.state = entry.map_or(PanelState::Empty, PanelState::Ready);
    }

    /// The request never completed.
    pub fn fail(&mut self, reason: &str) {
        log::warn!("apod: request failed: {reason}");
        self.state = PanelState::Empty;
    }

    pub fn entry(&self) -> Option<&ApodEntry> {
        match &self.state {
            PanelState::Ready(entry) => Some(entry),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.entry().map(|e| e.title.as_str())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.entry().and_then(ApodEntry::image_url)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas2D) {
        let (width, height) = canvas.size();
        canvas.clear();
        canvas.fill_rect(Vec2::ZERO, Vec2::new(width, height), CARD);
        canvas.stroke_polyline(
            &[
                Vec2::new(0.5, 0.5),
                Vec2::new(width - 0.5, 0.5),
                Vec2::new(width - 0.5, height - 0.5),
                Vec2::new(0.5, height - 0.5),
                Vec2::new(0.5, 0.5),
            ],
            1.0,
            BORDER,
        );

        let middle = Vec2::new(width / 2.0, height / 2.0);
        match &self.state {
            PanelState::Loading => canvas.fill_text(LOADING_MESSAGE, middle, MUTED),
            PanelState::Empty => canvas.fill_text(EMPTY_MESSAGE, middle, MUTED),
            PanelState::Ready(entry) => {
                canvas.fill_text(&entry.title, Vec2::new(16.0, 28.0), TITLE);
                let meta = format!("{}  ·  {}", entry.date, entry.credit());
                canvas.fill_text(&meta, Vec2::new(16.0, 46.0), META);
                if entry.media_type == MediaType::Video {
                    canvas.fill_text("Video: open the link to watch", Vec2::new(16.0, 64.0), META);
                }
                canvas.fill_text(&summary(&entry.explanation), Vec2::new(16.0, height - 16.0), BODY);
            }
        }
    }
}

impl Default for ApodPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn summary(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= SUMMARY_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(SUMMARY_CHARS - 3).collect();
    cut.push_str("...");
    cut
}
