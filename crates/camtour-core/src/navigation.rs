//! Navigation state machine.
//!
//! A [`Navigator`] owns "which camera is the viewer at" and the single
//! transition that may be in flight. It is driven from outside: the host calls
//! [`Navigator::request_navigate`] on user input and [`Navigator::tick`] once
//! per frame with its own clock. Time is in seconds on any monotonic clock.

use std::sync::Arc;

use crate::error::Result;
use crate::options::TourOptions;
use crate::pose::CameraPose;
use crate::transition::{interpolate, RenderablePose};

/// A transition in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Camera the transition started from.
    pub from: usize,
    /// Camera the transition ends at.
    pub to: usize,
    /// Host time at which the transition was accepted.
    pub start_time: f64,
}

/// Whether a transition is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NavigationPhase {
    /// Resting at the current camera.
    #[default]
    Idle,
    /// Moving between two cameras. Further requests are dropped.
    Transitioning(Transition),
}

/// Where the viewer is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NavigationState {
    current_index: Option<usize>,
    phase: NavigationPhase,
}

impl NavigationState {
    /// Camera currently occupied; `None` only for an empty pose set.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    /// The transition in flight, if any.
    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        match self.phase {
            NavigationPhase::Idle => None,
            NavigationPhase::Transitioning(transition) => Some(transition),
        }
    }
}

/// What a tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No transition in flight.
    Idle,
    /// A transition is in flight; render `pose`.
    InFlight {
        /// Interpolated pose for this tick.
        pose: RenderablePose,
        /// Linear (un-eased) progress in `[0, 1)`.
        progress: f32,
    },
    /// The transition just finished at camera `index`; render `pose` and
    /// recompute highlights.
    Completed {
        /// Camera now occupied.
        index: usize,
        /// Exactly that camera's pose.
        pose: RenderablePose,
    },
}

/// Owns the navigation state for a fixed set of poses.
#[derive(Debug, Clone)]
pub struct Navigator {
    poses: Arc<[CameraPose]>,
    transition_duration: f32,
    orbit_target_distance: f32,
    state: NavigationState,
}

impl Navigator {
    /// Creates a navigator resting at `options.initial_camera_index`.
    ///
    /// An out-of-range initial index falls back to the first camera. With no
    /// poses the navigator stays empty and every request is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::InvalidOption`](crate::TourError::InvalidOption)
    /// if `options` fail validation, since a non-finite duration would keep a
    /// transition in flight forever.
    pub fn new(poses: Arc<[CameraPose]>, options: &TourOptions) -> Result<Self> {
        options.validate()?;

        let current_index = if poses.is_empty() {
            None
        } else if options.initial_camera_index < poses.len() {
            Some(options.initial_camera_index)
        } else {
            log::warn!(
                "initial camera {} is out of range (0..{}), starting at camera 0",
                options.initial_camera_index,
                poses.len()
            );
            Some(0)
        };

        Ok(Self {
            poses,
            transition_duration: options.transition_duration,
            orbit_target_distance: options.orbit_target_distance,
            state: NavigationState {
                current_index,
                phase: NavigationPhase::Idle,
            },
        })
    }

    /// Snapshot of the navigation state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.state
    }

    /// Camera currently occupied.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    /// Pose of the camera currently occupied.
    #[must_use]
    pub fn current_pose(&self) -> Option<&CameraPose> {
        self.state.current_index.and_then(|i| self.poses.get(i))
    }

    /// Returns true while a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state.phase, NavigationPhase::Transitioning(_))
    }

    /// The poses this navigator moves between.
    #[must_use]
    pub fn poses(&self) -> &Arc<[CameraPose]> {
        &self.poses
    }

    /// Number of navigable cameras.
    #[must_use]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Returns true if there is nowhere to navigate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Transition duration in seconds.
    #[must_use]
    pub fn transition_duration(&self) -> f32 {
        self.transition_duration
    }

    /// Pose to apply immediately at startup, without interpolation.
    #[must_use]
    pub fn initial_placement(&self) -> Option<RenderablePose> {
        self.current_pose().map(CameraPose::renderable)
    }

    /// Starts a transition to `target` at time `now`.
    ///
    /// Returns `false` and changes nothing if a transition is already in
    /// flight, `target` is the current camera, or `target` is out of range.
    pub fn request_navigate(&mut self, target: usize, now: f64) -> bool {
        if let NavigationPhase::Transitioning(transition) = self.state.phase {
            log::debug!(
                "ignoring request for camera {target}: transition {} -> {} in flight",
                transition.from,
                transition.to
            );
            return false;
        }

        let Some(current) = self.state.current_index else {
            log::debug!("ignoring request for camera {target}: no cameras loaded");
            return false;
        };

        if target == current {
            log::debug!("already at camera {target}");
            return false;
        }

        if target >= self.poses.len() {
            log::debug!(
                "ignoring request for camera {target}: out of range (0..{})",
                self.poses.len()
            );
            return false;
        }

        log::debug!("transition {current} -> {target} started at {now:.3}s");
        self.state.phase = NavigationPhase::Transitioning(Transition {
            from: current,
            to: target,
            start_time: now,
        });
        true
    }

    /// Advances the transition in flight to time `now`.
    ///
    /// Ticks earlier than the start time are treated as progress 0, and a
    /// repeated timestamp recomputes the same pose.
    pub fn tick(&mut self, now: f64) -> TickOutcome {
        let NavigationPhase::Transitioning(transition) = self.state.phase else {
            return TickOutcome::Idle;
        };

        let from = &self.poses[transition.from];
        let to = &self.poses[transition.to];
        let elapsed = now - transition.start_time;
        let duration = f64::from(self.transition_duration);

        if elapsed >= duration {
            self.state.current_index = Some(transition.to);
            self.state.phase = NavigationPhase::Idle;
            log::debug!(
                "transition {} -> {} completed at {now:.3}s",
                transition.from,
                transition.to
            );
            return TickOutcome::Completed {
                index: transition.to,
                pose: to.renderable(),
            };
        }

        let progress = (elapsed / duration).clamp(0.0, 1.0) as f32;
        TickOutcome::InFlight {
            pose: interpolate(from, to, progress, self.orbit_target_distance),
            progress,
        }
    }

    /// Camera before the current one, if any.
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        self.state.current_index?.checked_sub(1)
    }

    /// Camera after the current one, if any.
    #[must_use]
    pub fn next_index(&self) -> Option<usize> {
        let next = self.state.current_index? + 1;
        (next < self.poses.len()).then_some(next)
    }

    /// First camera, if any.
    #[must_use]
    pub fn first_index(&self) -> Option<usize> {
        (!self.poses.is_empty()).then_some(0)
    }

    /// Last camera, if any.
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.poses.len().checked_sub(1)
    }
}
