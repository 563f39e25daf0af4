//! Pane Player - GStreamer-backed implementation of the player contract
//!
//! Features:
//! - HLS/DASH playback via playbin (hlsdemux/dashdemux)
//! - Rendering into a sub-rectangle of the shared window (video overlay)
//! - Looping by seeking to zero on end of stream
//! - Error classification by GStreamer error domain

use anyhow::{Context, Result};
use gstreamer as gst;
use gstreamer::glib;
use gstreamer::prelude::*;
use gstreamer_player as gst_player;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use triptych_core::{
    MediaPlayer, PaneId, PlaybackError, PlaybackErrorKind, PlayerEvent, PlayerEventSink,
    PlayerState, Rect,
};
use url::Url;

/// Map a GStreamer error onto the pane error kinds
pub fn classify_error(error: &glib::Error) -> PlaybackError {
    let kind = if error.kind::<gst::ResourceError>().is_some() {
        PlaybackErrorKind::Network
    } else if let Some(stream) = error.kind::<gst::StreamError>() {
        match stream {
            gst::StreamError::Demux
            | gst::StreamError::TypeNotFound
            | gst::StreamError::WrongType
            | gst::StreamError::Format => PlaybackErrorKind::Manifest,
            gst::StreamError::Decode
            | gst::StreamError::CodecNotFound
            | gst::StreamError::Decrypt
            | gst::StreamError::DecryptNokey => PlaybackErrorKind::Decode,
            _ => PlaybackErrorKind::Other,
        }
    } else {
        PlaybackErrorKind::Other
    };

    PlaybackError::new(kind, error.message())
}

/// Map gst-player states onto pane player states
pub fn map_state(state: gst_player::PlayerState) -> PlayerState {
    match state {
        gst_player::PlayerState::Buffering => PlayerState::Buffering,
        gst_player::PlayerState::Paused | gst_player::PlayerState::Playing => PlayerState::Ready,
        _ => PlayerState::Idle,
    }
}

/// Video sink that stretches to fill its rectangle, when one is available
fn fill_sink() -> Option<gst::Element> {
    let sink = gst::ElementFactory::make("glimagesink").build().ok()?;
    sink.set_property("force-aspect-ratio", false);
    Some(sink)
}

/// GStreamer player bound to one pane of the window
pub struct GstPanePlayer {
    pane: PaneId,
    player: gst_player::Player,
    renderer: gst_player::PlayerVideoOverlayVideoRenderer,
    auto_play: bool,
    looping: Arc<AtomicBool>,
    released: bool,
}

impl GstPanePlayer {
    /// Create a player that draws into `window_handle` and reports its
    /// events to `sink`.
    pub fn new<S: PlayerEventSink>(pane: PaneId, window_handle: usize, sink: S) -> Result<Self> {
        gst::init().context("Failed to initialize GStreamer")?;

        // SAFETY: the handle belongs to a live window that outlives the
        // player; the session releases players before the window closes.
        let renderer = unsafe {
            match fill_sink() {
                Some(sink) => gst_player::PlayerVideoOverlayVideoRenderer::with_handle_and_sink(
                    window_handle,
                    &sink,
                ),
                None => gst_player::PlayerVideoOverlayVideoRenderer::new(window_handle),
            }
        };

        let player = gst_player::Player::new(
            Some(renderer.clone()),
            None::<gst_player::PlayerSignalDispatcher>,
        );

        let looping = Arc::new(AtomicBool::new(false));

        let events = sink.clone();
        player.connect_error(move |_player, error| {
            events.emit(pane, PlayerEvent::Error(classify_error(error)));
        });

        let events = sink.clone();
        player.connect_state_changed(move |_player, state| {
            debug!(pane = %pane, ?state, "Player state changed");
            events.emit(pane, PlayerEvent::StateChanged(map_state(state)));
        });

        let events = sink;
        let loop_flag = looping.clone();
        player.connect_end_of_stream(move |player| {
            if loop_flag.load(Ordering::Relaxed) {
                debug!(pane = %pane, "Looping stream");
                player.seek(gst::ClockTime::ZERO);
                player.play();
            } else {
                events.emit(pane, PlayerEvent::StateChanged(PlayerState::Ended));
            }
        });

        player.connect_warning(move |_player, warning| {
            warn!(pane = %pane, "Player warning: {}", warning);
        });

        Ok(Self {
            pane,
            player,
            renderer,
            auto_play: false,
            looping,
            released: false,
        })
    }

    pub fn pane(&self) -> PaneId {
        self.pane
    }

    /// Move the video to `rect` (window coordinates)
    pub fn set_render_rectangle(&self, rect: Rect) {
        if self.released {
            return;
        }
        self.renderer
            .set_render_rectangle(rect.x, rect.y, rect.width, rect.height);
        self.renderer.expose();
    }
}

impl MediaPlayer for GstPanePlayer {
    fn set_source(&mut self, uri: &Url) -> triptych_core::Result<()> {
        info!(pane = %self.pane, uri = %uri, "Loading");
        self.player.set_uri(Some(uri.as_str()));
        Ok(())
    }

    fn prepare(&mut self) -> triptych_core::Result<()> {
        if self.released {
            return Err(triptych_core::Error::player(self.pane, "player released"));
        }
        // Pausing prerolls the pipeline; playing prerolls and starts
        if self.auto_play {
            self.player.play();
        } else {
            self.player.pause();
        }
        Ok(())
    }

    fn set_auto_play(&mut self, auto_play: bool) {
        self.auto_play = auto_play;
    }

    fn set_looping(&mut self, enabled: bool) {
        self.looping.store(enabled, Ordering::Relaxed);
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.looping.store(false, Ordering::Relaxed);
        self.player.stop();
        debug!(pane = %self.pane, "Player stopped");
    }
}

impl Drop for GstPanePlayer {
    fn drop(&mut self) {
        self.release();
    }
}

/// Check GStreamer installation and capabilities
pub fn check_gstreamer_installation() -> Result<GStreamerInfo> {
    gst::init().context("Failed to initialize GStreamer")?;

    let (major, minor, micro, nano) = gst::version();
    let version = format!("{}.{}.{}.{}", major, minor, micro, nano);

    // Check for required elements
    let required_elements = [
        ("playbin", "Core playback"),
        ("dashdemux", "DASH support"),
        ("hlsdemux", "HLS support"),
        ("decodebin", "Auto decoding"),
        ("textoverlay", "Error card text"),
        ("videotestsrc", "Error card background"),
    ];

    let mut missing = Vec::new();
    for (element, desc) in &required_elements {
        if gst::ElementFactory::find(element).is_none() {
            missing.push(format!("{} ({})", element, desc));
        }
    }

    Ok(GStreamerInfo {
        version,
        missing_elements: missing,
    })
}

/// GStreamer installation information
#[derive(Debug)]
pub struct GStreamerInfo {
    pub version: String,
    pub missing_elements: Vec<String>,
}

impl GStreamerInfo {
    pub fn is_complete(&self) -> bool {
        self.missing_elements.is_empty()
    }
}
