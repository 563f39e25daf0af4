//! Triptych Core - three-pane adaptive stream player logic
//!
//! This crate holds everything in Triptych that is not a media framework
//! or a window system:
//! - Pane weight distribution (drag and maximize)
//! - Weight animation and proportional layout
//! - Pointer gesture recognition (drag vs tap)
//! - Per-pane playback error tracking
//! - The player contract and scoped player lifetime
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         Triptych Core                          │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │  PointerEvent ──► ┌──────────────┐      ┌──────────────┐       │
//! │                   │   Gesture    │ ───► │    Weight    │       │
//! │                   │  Recognizer  │      │ Distributor  │       │
//! │                   └──────────────┘      └──────┬───────┘       │
//! │                                                │ targets       │
//! │                   ┌──────────────┐      ┌──────┴───────┐       │
//! │      Rect x3 ◄─── │  PaneLayout  │ ◄─── │   Weight     │       │
//! │                   └──────────────┘      │   Animator   │       │
//! │                                         └──────────────┘       │
//! │                                                                │
//! │  PlayerEvent ──► ┌──────────────┐       ┌──────────────┐       │
//! │                  │ ErrorTracker │  x3   │  PlayerSet   │ ◄──── │
//! │                  └──────────────┘       └──────────────┘  host │
//! └────────────────────────────────────────────────────────────────┘
//! ```

pub mod animation;
pub mod config;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod player;
pub mod session;
pub mod tracker;
pub mod types;
pub mod weights;

pub use animation::WeightAnimator;
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use gesture::{GestureEvent, GestureRecognizer, PointerEvent};
pub use layout::{PaneLayout, Rect};
pub use player::{MediaPlayer, PlayerEventSink, PlayerSet};
pub use session::{Frame, Pane, TriptychSession};
pub use tracker::{PlaybackErrorTracker, TrackerState};
pub use types::*;
pub use weights::{WeightBounds, WeightDistributor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library startup
pub fn init() {
    tracing::info!(version = VERSION, "Triptych Core initialized");
}
