//! Error card shown over a failed pane
//!
//! A tiny pipeline (black test source, red text overlay) rendered into the
//! pane's rectangle through the video overlay interface. It runs only while
//! the pane is errored.

use anyhow::{anyhow, Context, Result};
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_video as gst_video;
use gstreamer_video::prelude::*;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use triptych_core::{PaneId, Rect};

const PIPELINE: &str = "videotestsrc pattern=black is-live=true \
    ! textoverlay name=label halignment=center valignment=center \
      line-alignment=center shaded-background=false font-desc=\"Sans 16\" \
    ! videoconvert ! autovideosink sync=false";

/// ARGB red
const TEXT_COLOR: u32 = 0xffff_0000;

pub struct ErrorCard {
    pane: PaneId,
    pipeline: gst::Pipeline,
    overlay: Arc<Mutex<Option<gst_video::VideoOverlay>>>,
    rect: Arc<Mutex<Rect>>,
    visible: bool,
}

impl ErrorCard {
    pub fn new(pane: PaneId, window_handle: usize, message: &str) -> Result<Self> {
        let pipeline = gst::parse::launch(PIPELINE)
            .context("Failed to build error card pipeline")?
            .downcast::<gst::Pipeline>()
            .map_err(|_| anyhow!("error card is not a pipeline"))?;

        let label = pipeline
            .by_name("label")
            .context("error card has no text overlay")?;
        label.set_property("text", message);
        label.set_property("color", TEXT_COLOR);

        let overlay: Arc<Mutex<Option<gst_video::VideoOverlay>>> = Arc::new(Mutex::new(None));
        let rect = Arc::new(Mutex::new(Rect::default()));

        let bus = pipeline.bus().context("error card pipeline has no bus")?;
        let slot = overlay.clone();
        let target = rect.clone();
        bus.set_sync_handler(move |_bus, msg| {
            if !gst_video::is_video_overlay_prepare_window_handle_message(msg) {
                return gst::BusSyncReply::Pass;
            }
            let Some(sink) = msg
                .src()
                .and_then(|src| src.clone().dynamic_cast::<gst_video::VideoOverlay>().ok())
            else {
                return gst::BusSyncReply::Pass;
            };

            // SAFETY: same window handle the pane players draw into
            unsafe { sink.set_window_handle(window_handle) };
            if let Ok(r) = target.lock() {
                if sink.set_render_rectangle(r.x, r.y, r.width, r.height).is_err() {
                    warn!(pane = %pane, "Error card rejected render rectangle");
                }
            }
            if let Ok(mut s) = slot.lock() {
                *s = Some(sink);
            }
            gst::BusSyncReply::Drop
        });

        Ok(Self {
            pane,
            pipeline,
            overlay,
            rect,
            visible: false,
        })
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Start showing the card over `rect`
    pub fn show(&mut self, rect: Rect) {
        self.move_to(rect);
        if self.visible {
            return;
        }
        match self.pipeline.set_state(gst::State::Playing) {
            Ok(_) => {
                self.visible = true;
                debug!(pane = %self.pane, "Error card shown");
            }
            Err(e) => warn!(pane = %self.pane, error = %e, "Failed to start error card"),
        }
    }

    /// Stop the card pipeline
    pub fn hide(&mut self) {
        if !self.visible {
            return;
        }
        self.visible = false;
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            warn!(pane = %self.pane, error = %e, "Failed to stop error card");
        }
        debug!(pane = %self.pane, "Error card hidden");
    }

    /// Follow the pane when the layout changes
    pub fn move_to(&mut self, rect: Rect) {
        if let Ok(mut r) = self.rect.lock() {
            *r = rect;
        }
        if !self.visible {
            return;
        }
        if let Ok(slot) = self.overlay.lock() {
            if let Some(sink) = slot.as_ref() {
                let _ = sink.set_render_rectangle(rect.x, rect.y, rect.width, rect.height);
                sink.expose();
            }
        }
    }
}

impl Drop for ErrorCard {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}
