//! Window management for the desktop player

use anyhow::{bail, Context, Result};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use winit::dpi::LogicalSize;
use winit::window::{Window, WindowAttributes};

/// Video window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Triptych".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl WindowConfig {
    pub fn attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
    }
}

/// Native handle GStreamer's video overlay can draw into
pub fn overlay_handle(window: &Window) -> Result<usize> {
    let handle = window
        .window_handle()
        .context("Window handle unavailable")?;

    match handle.as_raw() {
        RawWindowHandle::Xlib(h) => Ok(h.window as usize),
        RawWindowHandle::Xcb(h) => Ok(h.window.get() as usize),
        RawWindowHandle::Win32(h) => Ok(h.hwnd.get() as usize),
        RawWindowHandle::AppKit(h) => Ok(h.ns_view.as_ptr() as usize),
        other => bail!("Video overlay is not supported for {:?}", other),
    }
}
