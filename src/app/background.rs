//! Hosts the particle background on the event loop thread.
//!
//! Frames are timed by a [`FrameClock`] that the event loop polls through
//! `ControlFlow::WaitUntil`. Each tick is recorded into a [`DrawList`] and
//! shipped to the canvas behind the UI as one script call.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tao::window::Window;
use wry::WebView;

use crate::effects::{
    DrawList, Frame, FrameHandle, FrameScheduler, ListenerId, ParticleBackground, SurfaceSize,
    Viewport,
};

/// Roughly one display refresh.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Hands out frame deadlines for the event loop to wait on.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
        }
    }

    /// When the pending frame is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, at)| at)
    }

    /// Removes and returns the pending frame once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, at)) if at <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

impl FrameScheduler for FrameClock {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some((handle, Instant::now() + self.interval));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if matches!(self.pending, Some((pending, _)) if pending == handle) {
            self.pending = None;
        }
    }
}

/// The window's client area in logical pixels.
pub struct WindowViewport {
    window: Arc<Window>,
    listeners: Vec<ListenerId>,
    next_id: u64,
}

impl WindowViewport {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl Viewport for WindowViewport {
    fn size(&self) -> SurfaceSize {
        let logical = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        SurfaceSize::new(logical.width, logical.height)
    }

    fn subscribe_resize(&mut self) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push(id);
        id
    }

    fn unsubscribe_resize(&mut self, id: ListenerId) {
        self.listeners.retain(|listener| *listener != id);
    }
}

pub type DesktopBackground = ParticleBackground<DrawList, WindowViewport, FrameClock>;

pub fn new_desktop_background(window: Arc<Window>) -> DesktopBackground {
    ParticleBackground::new(WindowViewport::new(window), FrameClock::default())
}

/// The script that hands one frame to the canvas renderer in the page.
pub fn render_script(frame: &Frame) -> Option<String> {
    match serde_json::to_string(frame) {
        Ok(json) => Some(format!(
            "window.renderBackground && window.renderBackground({json});"
        )),
        Err(e) => {
            tracing::error!("Failed to serialize background frame: {}", e);
            None
        }
    }
}

/// Runs the due frame, if any, and sends what it drew to the webview.
pub fn pump_frame(background: &mut DesktopBackground, webview: &WebView, now: Instant) {
    let Some(handle) = background.frames_mut().take_due(now) else {
        return;
    };
    if !background.handle_frame(handle) {
        return;
    }
    let Some(frame) = background.surface_mut().and_then(DrawList::take_frame) else {
        return;
    };
    if let Some(script) = render_script(&frame) {
        if let Err(e) = webview.evaluate_script(&script) {
            tracing::warn!("Failed to render background frame: {}", e);
        }
    }
}

/// How long the event loop may sleep before the next frame is due.
pub fn next_deadline(background: &DesktopBackground) -> Option<Instant> {
    background.frames().deadline()
}

/// Starts or stops the animation. Stopping also wipes the canvas.
pub fn apply_preference(background: &mut DesktopBackground, enabled: bool, webview: &WebView) {
    if enabled {
        let size = background.viewport().size();
        background.start(DrawList::new(size));
    } else {
        background.stop();
        if let Err(e) = webview.evaluate_script("window.clearBackground && window.clearBackground();")
        {
            tracing::warn!("Failed to clear background: {}", e);
        }
    }
}
