//! The particle field animator: one cooperative frame loop plus the
//! resize, visibility and motion-preference reactions around it.

use std::time::Instant;

use log::debug;
use plexus_core::{FieldSettings, Rect, Transform};
use rand::{SeedableRng, rngs::StdRng};

use crate::debounce::Debouncer;
use crate::field::ParticleField;
use crate::surface::{Environment, FrameHandle, FrameScheduler, Surface};

/// Drives a [`ParticleField`] on a [`Surface`].
///
/// The loop is an explicit task: every call to [`on_frame`](Self::on_frame)
/// performs one step and requests its own next invocation from the
/// scheduler. At most one frame is pending at any time.
///
/// Built without a surface the animator is inert and every method is a
/// no-op.
#[derive(Debug)]
pub struct ParticleAnimator<S> {
    inner: Option<Active<S>>,
}

#[derive(Debug)]
struct Active<S> {
    surface: S,
    settings: FieldSettings,
    field: ParticleField,
    /// Whether the hero is on screen. Hidden frames do no work.
    visible: bool,
    /// The one frame request this animator is waiting on.
    frame: Option<FrameHandle>,
    resize: Debouncer,
    running: bool,
    torn_down: bool,
    rng: StdRng,
}

impl<S: Surface> ParticleAnimator<S> {
    /// Create an animator, or an inert one when no surface is available.
    pub fn new(surface: Option<S>, settings: FieldSettings) -> Self {
        Self::with_rng(surface, settings, StdRng::from_os_rng())
    }

    /// Like [`new`](Self::new) with a caller-supplied random source.
    pub fn with_rng(surface: Option<S>, settings: FieldSettings, rng: StdRng) -> Self {
        let inner = surface.map(|surface| Active {
            surface,
            resize: Debouncer::new(settings.resize_debounce()),
            settings,
            field: ParticleField::default(),
            visible: true,
            frame: None,
            running: false,
            torn_down: false,
            rng,
        });
        Self { inner }
    }

    /// An animator that never draws or schedules anything.
    pub fn inert() -> Self {
        Self { inner: None }
    }

    pub fn is_inert(&self) -> bool {
        self.inner.is_none()
    }

    /// Whether the frame loop is live (possibly paused while hidden).
    pub fn is_running(&self) -> bool {
        self.inner.as_ref().is_some_and(|a| a.running)
    }

    pub fn is_visible(&self) -> bool {
        self.inner.as_ref().is_some_and(|a| a.visible)
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.inner.as_ref().and_then(|a| a.frame)
    }

    /// When a debounced resize will settle, if one is pending.
    pub fn resize_deadline(&self) -> Option<Instant> {
        self.inner.as_ref().and_then(|a| a.resize.deadline())
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.inner.as_ref().map(|a| &a.field)
    }

    pub fn surface(&self) -> Option<&S> {
        self.inner.as_ref().map(|a| &a.surface)
    }

    /// Size the surface, spawn particles and start the loop, unless the
    /// environment asks for reduced motion.
    pub fn start(&mut self, env: &impl Environment, scheduler: &mut impl FrameScheduler) {
        let Some(active) = self.inner.as_mut() else {
            return;
        };
        if active.torn_down {
            return;
        }
        if env.prefers_reduced_motion() {
            debug!("reduced motion requested, particle field not started");
            return;
        }
        active.restart(env, scheduler);
    }

    /// Run one frame. Handles other than the pending one are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut impl FrameScheduler) {
        let Some(active) = self.inner.as_mut() else {
            return;
        };
        if active.frame != Some(handle) {
            return;
        }
        active.frame = None;

        if active.visible {
            active
                .field
                .render_frame(&mut active.surface, &active.settings);
        }
        active.frame = Some(scheduler.request_frame());
    }

    /// Note a viewport resize. The field is rebuilt once resizes stop
    /// arriving for the debounce window; see [`poll`](Self::poll).
    pub fn on_resize(&mut self, now: Instant) {
        if let Some(active) = self.inner.as_mut()
            && !active.torn_down
        {
            active.resize.trigger(now);
        }
    }

    /// Apply a settled resize, if any. Returns whether the field was rebuilt.
    pub fn poll(&mut self, now: Instant, env: &impl Environment) -> bool {
        let Some(active) = self.inner.as_mut() else {
            return false;
        };
        if !active.resize.fire(now) {
            return false;
        }
        active.resize_surface(env);
        active.regenerate(env);
        true
    }

    /// Record whether the hero is currently on screen.
    pub fn set_visible(&mut self, visible: bool) {
        if let Some(active) = self.inner.as_mut() {
            active.visible = visible;
        }
    }

    /// React to the user's reduced-motion preference changing.
    ///
    /// Reducing stops the loop and blanks the surface; allowing rebuilds
    /// everything as on first start.
    pub fn on_motion_preference_change(
        &mut self,
        reduce: bool,
        env: &impl Environment,
        scheduler: &mut impl FrameScheduler,
    ) {
        let Some(active) = self.inner.as_mut() else {
            return;
        };
        if active.torn_down {
            return;
        }
        if reduce {
            active.stop(scheduler);
        } else {
            active.restart(env, scheduler);
        }
    }

    /// Stop for good: cancel the pending frame and resize, blank the surface.
    pub fn teardown(&mut self, scheduler: &mut impl FrameScheduler) {
        let Some(active) = self.inner.as_mut() else {
            return;
        };
        if active.torn_down {
            return;
        }
        active.stop(scheduler);
        active.resize.cancel();
        active.torn_down = true;
        debug!("particle field torn down");
    }
}

impl<S: Surface> Active<S> {
    fn restart(&mut self, env: &impl Environment, scheduler: &mut impl FrameScheduler) {
        self.resize_surface(env);
        self.regenerate(env);
        if let Some(handle) = self.frame.take() {
            scheduler.cancel_frame(handle);
        }
        self.frame = Some(scheduler.request_frame());
        self.running = true;
        debug!("particle field started with {} particles", self.field.len());
    }

    fn stop(&mut self, scheduler: &mut impl FrameScheduler) {
        if let Some(handle) = self.frame.take() {
            scheduler.cancel_frame(handle);
        }
        self.surface
            .clear_rect(Rect::from_size(self.field.bounds()));
        if self.running {
            debug!("particle field stopped");
        }
        self.running = false;
    }

    /// Match the backing store to the hero, keeping drawing coordinates in
    /// logical pixels.
    fn resize_surface(&mut self, env: &impl Environment) {
        let hero = env.hero_size();
        let dpr = match env.device_pixel_ratio() {
            ratio if ratio > 0.0 && ratio.is_finite() => ratio,
            _ => 1.0,
        };
        let backing = hero.scale(dpr);
        self.surface.set_backing_size(
            backing.width.max(0.0) as u32,
            backing.height.max(0.0) as u32,
        );
        self.surface.set_display_size(hero);
        self.surface.set_transform(Transform::scale(dpr));
    }

    fn regenerate(&mut self, env: &impl Environment) {
        let count = self.settings.particle_count(env.viewport_width());
        self.field = ParticleField::populate(count, env.hero_size(), &self.settings, &mut self.rng);
        debug!(
            "regenerated {} particles for {:.0}x{:.0}",
            count,
            self.field.bounds().width,
            self.field.bounds().height
        );
    }
}
