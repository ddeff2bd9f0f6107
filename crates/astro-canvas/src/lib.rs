pub mod api;
pub mod apod;
pub mod canvas;
pub mod charts;
pub mod config;
pub mod core;
pub mod datasource;
pub mod error;
pub mod hit;
pub mod hosts;
pub mod input;
pub mod particles;
pub mod sky;
pub mod store;
pub mod timeline;

// Re-export key types at crate root for convenience
pub use api::runner::SceneRunner;
pub use api::scene::{CanvasScene, FrameInfo};
pub use apod::{ApodClient, ApodEntry, ApodPanel, ApodRequest, ApodTransport, HttpResponse, MediaType};
pub use canvas::{Canvas2D, Color, DrawCommand, RecordingCanvas, TextAlign, TextStyle};
pub use charts::{ChartKind, ChartRenderer, ChartView, Series};
pub use config::{FieldConfig, SceneConfig, SkyConfig, SkyLayers, TimelineConfig};
pub use core::frame::FrameLoop;
pub use core::once::OnceFlag;
pub use core::rng::Rng;
pub use datasource::{RandomWalkSource, SeriesSource, StaticSource};
pub use error::{ApodError, ConfigError, StorageError};
pub use hosts::{ChartScene, ParticleBackground, SkyMapScene, TimelineScene};
pub use input::{InputEvent, InputQueue};
pub use particles::{FieldMode, Particle, ParticleField};
pub use sky::{CelestialObject, ObjectKind, SkyCatalog, SkyRenderer, SkyView};
pub use store::{MemoryStorage, Preferences, Storage, Store, SubscriptionId};
pub use timeline::{EventCategory, TimelineEvent, TimelineFilter, TimelineProjector, TimelineView};

#[cfg(feature = "native-http")]
pub use apod::UreqTransport;
