//! The decorative animated background: drifting particles linked by faint lines
//! over a field of twinkling stars.

pub mod field;
pub mod lifecycle;
pub mod stepper;
pub mod surface;

pub use field::{FieldConfig, Particle, ParticleField, Star};
pub use lifecycle::{FrameHandle, FrameScheduler, ListenerId, ParticleBackground, Viewport};
pub use stepper::{proximity_links, step_frame, Link};
pub use surface::{DrawCommand, DrawList, DrawSurface, Frame, Point, Rgba, SurfaceSize};
