//! Start/stop management of the background animation.
//!
//! The animation is a cancellable repeating task. The host owns the event loop:
//! it delivers frames requested through a [`FrameScheduler`] and viewport resize
//! notifications. Each delivered frame carries the handle it was requested with,
//! and only the most recently requested handle runs a tick. Stopping cancels that
//! handle, so nothing runs after [`ParticleBackground::stop`] returns.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{step_frame, DrawSurface, FieldConfig, ParticleField, SurfaceSize};

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Identifies one resize subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// One-shot "next frame" requests, cancellable by handle.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The area the surface is stretched over, with resize notifications.
pub trait Viewport {
    fn size(&self) -> SurfaceSize;
    fn subscribe_resize(&mut self) -> ListenerId;
    fn unsubscribe_resize(&mut self, id: ListenerId);
}

/// Drifting particles and twinkling stars drawn behind the UI.
pub struct ParticleBackground<S, V, F, R = StdRng> {
    viewport: V,
    frames: F,
    rng: R,
    config: FieldConfig,
    surface: Option<S>,
    field: Option<ParticleField>,
    pending_frame: Option<FrameHandle>,
    resize_listener: Option<ListenerId>,
    ticks: u64,
}

impl<S, V, F> ParticleBackground<S, V, F, StdRng>
where
    S: DrawSurface,
    V: Viewport,
    F: FrameScheduler,
{
    pub fn new(viewport: V, frames: F) -> Self {
        Self::with_rng(viewport, frames, StdRng::from_entropy())
    }
}

impl<S, V, F, R> ParticleBackground<S, V, F, R>
where
    S: DrawSurface,
    V: Viewport,
    F: FrameScheduler,
    R: Rng,
{
    pub fn with_rng(viewport: V, frames: F, rng: R) -> Self {
        Self {
            viewport,
            frames,
            rng,
            config: FieldConfig::default(),
            surface: None,
            field: None,
            pending_frame: None,
            resize_listener: None,
            ticks: 0,
        }
    }

    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Sizes `surface` to the viewport, generates a fresh field and requests the first frame.
    ///
    /// Starting while already running keeps the current animation.
    pub fn start(&mut self, mut surface: S) {
        if self.is_running() {
            tracing::warn!("Background animation already running; start ignored.");
            return;
        }

        let size = self.viewport.size();
        surface.resize(size);
        self.field = Some(ParticleField::generate(size, &self.config, &mut self.rng));
        self.surface = Some(surface);
        self.resize_listener = Some(self.viewport.subscribe_resize());
        self.pending_frame = Some(self.frames.request_frame());
        self.ticks = 0;

        tracing::info!(
            "Background animation started at {}x{} with {} particles and {} stars",
            size.width,
            size.height,
            self.config.particle_count,
            self.config.star_count
        );
    }

    /// Runs one tick if `handle` is the pending frame, then requests the next one.
    ///
    /// Returns `false` for stale or cancelled handles.
    pub fn handle_frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending_frame != Some(handle) {
            tracing::trace!("Ignoring stale frame {:?}", handle);
            return false;
        }
        self.pending_frame = None;

        let (Some(field), Some(surface)) = (self.field.as_mut(), self.surface.as_mut()) else {
            return false;
        };
        step_frame(field, surface, &self.config);
        self.ticks += 1;

        self.pending_frame = Some(self.frames.request_frame());
        true
    }

    /// Resizes the surface to the viewport. Entities keep their positions.
    pub fn handle_resize(&mut self) -> bool {
        if self.resize_listener.is_none() {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let size = self.viewport.size();
        surface.resize(size);
        tracing::debug!("Background resized to {}x{}", size.width, size.height);
        true
    }

    /// Cancels the pending frame and detaches the resize listener.
    ///
    /// Safe to call repeatedly and before `start`.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.frames.cancel_frame(handle);
        }
        if let Some(id) = self.resize_listener.take() {
            self.viewport.unsubscribe_resize(id);
        }
        if self.field.take().is_some() {
            tracing::info!("Background animation stopped after {} ticks", self.ticks);
        }
    }

    pub fn is_running(&self) -> bool {
        self.field.is_some()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }
}
