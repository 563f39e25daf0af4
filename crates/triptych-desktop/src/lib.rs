//! Triptych Desktop - three adaptive streams in one native window
//!
//! Desktop host for `triptych-core`:
//! - One GStreamer player per pane, drawn through the video overlay
//! - Drag and tap input from mouse or a single touch point
//! - A red error card over any pane whose stream fails
//! - Players released exactly once when the window closes
//!
//! # Example
//!
//! ```rust,no_run
//! use triptych_core::SessionConfig;
//! use triptych_desktop::{run, WindowConfig};
//!
//! run(SessionConfig::default(), WindowConfig::default()).unwrap();
//! ```

pub mod app;
pub mod controls;
pub mod error_card;
pub mod player;
pub mod window;

pub use app::{run, App, AppEvent, ProxySink};
pub use controls::{ControlAction, InputState};
pub use error_card::ErrorCard;
pub use player::{check_gstreamer_installation, GStreamerInfo, GstPanePlayer};
pub use window::WindowConfig;
