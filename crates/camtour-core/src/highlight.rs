//! Marker highlighting derived from navigation state and the view graph.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TourError};
use crate::pose::CameraPose;
use crate::view_graph::ViewGraph;

/// Visual class of a camera marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Highlight {
    /// The camera the viewer is at.
    Current,
    /// Connected to the current camera in the view graph.
    Adjacent,
    /// Everything else.
    Distant,
}

/// Classifies every camera relative to `current`.
///
/// The result is indexed by camera index. With no current camera every
/// marker is [`Highlight::Distant`].
#[must_use]
pub fn classify(poses: &[CameraPose], graph: &ViewGraph, current: Option<usize>) -> Vec<Highlight> {
    let mut highlights = vec![Highlight::Distant; poses.len()];
    let Some(current) = current.filter(|&i| i < poses.len()) else {
        return highlights;
    };

    for neighbor in graph.neighbors(current) {
        if let Some(slot) = highlights.get_mut(neighbor) {
            *slot = Highlight::Adjacent;
        }
    }
    highlights[current] = Highlight::Current;
    highlights
}

/// Marker color and size per highlight class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightPalette {
    /// RGB color of the current camera's marker.
    pub current_color: Vec3,
    /// RGB color of markers connected to the current camera.
    pub adjacent_color: Vec3,
    /// RGB color of every other marker.
    pub distant_color: Vec3,
    /// Radius multiplier for the current camera's marker.
    pub current_scale: f32,
    /// Radius multiplier for adjacent markers.
    pub adjacent_scale: f32,
    /// Radius multiplier for distant markers.
    pub distant_scale: f32,
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            current_color: Vec3::new(0.1, 0.9, 0.2),
            adjacent_color: Vec3::new(1.0, 0.65, 0.0),
            distant_color: Vec3::new(0.55, 0.55, 0.6),
            current_scale: 1.5,
            adjacent_scale: 1.2,
            distant_scale: 1.0,
        }
    }
}

impl HighlightPalette {
    /// Color for a highlight class.
    #[must_use]
    pub fn color(&self, highlight: Highlight) -> Vec3 {
        match highlight {
            Highlight::Current => self.current_color,
            Highlight::Adjacent => self.adjacent_color,
            Highlight::Distant => self.distant_color,
        }
    }

    /// Size multiplier for a highlight class.
    #[must_use]
    pub fn scale(&self, highlight: Highlight) -> f32 {
        match highlight {
            Highlight::Current => self.current_scale,
            Highlight::Adjacent => self.adjacent_scale,
            Highlight::Distant => self.distant_scale,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let colors = [self.current_color, self.adjacent_color, self.distant_color];
        if colors
            .iter()
            .any(|c| !c.is_finite() || c.min_element() < 0.0 || c.max_element() > 1.0)
        {
            return Err(TourError::InvalidOption(
                "highlight colors must have components in [0, 1]".to_string(),
            ));
        }
        let scales = [self.current_scale, self.adjacent_scale, self.distant_scale];
        if scales.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(TourError::InvalidOption(
                "highlight scales must be finite and positive".to_string(),
            ));
        }
        Ok(())
    }
}
