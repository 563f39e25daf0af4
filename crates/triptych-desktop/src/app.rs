//! Desktop application loop
//!
//! One winit window hosts all three panes. Player callbacks arrive on
//! GStreamer threads and are forwarded to the loop as user events, so every
//! weight and error-flag update happens on the loop thread.

use anyhow::{Context, Result};
use gstreamer as gst;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use triptych_core::{
    PaneId, PlayerEvent, PlayerEventSink, Rect, SessionConfig, TriptychSession, PANE_COUNT,
};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

use crate::controls::{ControlAction, InputState};
use crate::error_card::ErrorCard;
use crate::player::GstPanePlayer;
use crate::window::{overlay_handle, WindowConfig};

/// Events delivered to the loop from other threads
#[derive(Debug)]
pub enum AppEvent {
    Player { pane: PaneId, event: PlayerEvent },
}

/// Forwards player callbacks into the event loop
#[derive(Clone)]
pub struct ProxySink {
    proxy: EventLoopProxy<AppEvent>,
}

impl PlayerEventSink for ProxySink {
    fn emit(&self, pane: PaneId, event: PlayerEvent) {
        if self.proxy.send_event(AppEvent::Player { pane, event }).is_err() {
            debug!(pane = %pane, "Event loop closed; dropping player event");
        }
    }
}

/// Everything that lives while the window is open.
///
/// Field order matters: players and cards are dropped before the window
/// they draw into.
struct Running {
    session: TriptychSession<GstPanePlayer>,
    cards: [ErrorCard; PANE_COUNT],
    input: InputState,
    last_frame: Instant,
    animating: bool,
    window: Window,
}

impl Running {
    fn open(
        event_loop: &ActiveEventLoop,
        proxy: &EventLoopProxy<AppEvent>,
        config: &SessionConfig,
        window_config: &WindowConfig,
    ) -> Result<Self> {
        let window = event_loop
            .create_window(window_config.attributes())
            .context("Failed to create window")?;
        let handle = overlay_handle(&window)?;
        let size = window.inner_size();

        let sink = ProxySink {
            proxy: proxy.clone(),
        };
        let mut session =
            TriptychSession::new(config.clone(), size.width, size.height, |pane| {
                GstPanePlayer::new(pane, handle, sink.clone())
                    .map_err(|e| triptych_core::Error::player(pane, format!("{:#}", e)))
            })?;

        let cards = [
            ErrorCard::new(PaneId::FIRST, handle, &config.error_message)?,
            ErrorCard::new(PaneId::SECOND, handle, &config.error_message)?,
            ErrorCard::new(PaneId::THIRD, handle, &config.error_message)?,
        ];

        session.start()?;
        info!(session_id = %session.id(), "Playback started");

        let mut running = Self {
            session,
            cards,
            input: InputState::default(),
            last_frame: Instant::now(),
            animating: false,
            window,
        };
        running.place(running.session.rects());
        Ok(running)
    }

    /// Push pane rectangles to players and visible error cards
    fn place(&mut self, rects: [Rect; PANE_COUNT]) {
        for pane in PaneId::ALL {
            let rect = rects[pane.index()];
            self.session.player(pane).set_render_rectangle(rect);
            self.cards[pane.index()].move_to(rect);
        }
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let frame = self.session.tick(now - self.last_frame);
        self.last_frame = now;
        self.place(frame.rects);

        self.animating = frame.animating;
        if self.animating {
            self.window.request_redraw();
        }
    }

    fn control(&mut self, action: ControlAction) -> bool {
        match action {
            ControlAction::Quit => return false,
            ControlAction::Pointer(event) => {
                if let Some(gesture) = self.session.handle_pointer(event) {
                    debug!(?gesture, "Gesture");
                    if !self.animating {
                        self.animating = true;
                        self.last_frame = Instant::now();
                    }
                    self.window.request_redraw();
                }
            }
        }
        true
    }

    fn player_event(&mut self, pane: PaneId, event: PlayerEvent) {
        if !self.session.handle_player_event(pane, &event) {
            return;
        }
        let rect = self.session.rects()[pane.index()];
        let card = &mut self.cards[pane.index()];
        if self.session.pane(pane).has_error() {
            card.show(rect);
        } else {
            card.hide();
        }
    }

    fn close(&mut self) {
        for card in self.cards.iter_mut() {
            card.hide();
        }
        self.session.release();
    }
}

/// winit application driving one session
pub struct App {
    config: SessionConfig,
    window_config: WindowConfig,
    proxy: EventLoopProxy<AppEvent>,
    running: Option<Running>,
    failure: Option<anyhow::Error>,
}

impl App {
    pub fn new(
        config: SessionConfig,
        window_config: WindowConfig,
        proxy: EventLoopProxy<AppEvent>,
    ) -> Self {
        Self {
            config,
            window_config,
            proxy,
            running: None,
            failure: None,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut running) = self.running.take() {
            running.close();
            info!("Session closed");
        }
        event_loop.exit();
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match Running::open(event_loop, &self.proxy, &self.config, &self.window_config) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                error!("Failed to start session: {:#}", e);
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                running.session.resize(size.width, size.height);
                running.place(running.session.rects());
            }
            WindowEvent::RedrawRequested => running.redraw(),
            other => {
                if let Some(action) = running.input.translate(&other) {
                    if !running.control(action) {
                        self.shutdown(event_loop);
                    }
                }
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Player { pane, event } => match self.running.as_mut() {
                Some(running) => running.player_event(pane, event),
                None => debug!(pane = %pane, "Player event after shutdown"),
            },
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut running) = self.running.take() {
            warn!("Event loop exiting with an open session");
            running.close();
        }
    }
}

/// Open the window and play until it is closed
pub fn run(config: SessionConfig, window_config: WindowConfig) -> Result<()> {
    gst::init().context("Failed to initialize GStreamer")?;

    let mut builder = EventLoop::<AppEvent>::with_user_event();
    // The video overlay needs an X11 window; XWayland provides one
    #[cfg(target_os = "linux")]
    {
        use winit::platform::x11::EventLoopBuilderExtX11;
        builder.with_x11();
    }
    let event_loop = builder.build().context("Failed to create event loop")?;

    let mut app = App::new(config, window_config, event_loop.create_proxy());
    event_loop
        .run_app(&mut app)
        .context("Event loop failed")?;

    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
