//! Animated particle network for the plexus hero.
//!
//! The crate is split along the seams of the host it runs in: the
//! simulation ([`Particle`], [`ParticleField`]) knows nothing about
//! scheduling, the [`ParticleAnimator`] drives it through the
//! [`FrameScheduler`] and [`Environment`] traits, and [`TerminalSurface`]
//! is one [`Surface`] implementation that renders into a ratatui buffer.

mod animator;
mod debounce;
mod field;
mod particle;
mod surface;
mod terminal;

#[cfg(test)]
mod testing;

pub use animator::ParticleAnimator;
pub use debounce::Debouncer;
pub use field::{ParticleField, connection_alpha};
pub use particle::{Particle, wrap_coordinate};
pub use surface::{Environment, FrameHandle, FrameScheduler, Surface};
pub use terminal::TerminalSurface;
