//! Loading camera poses from a JSON pose source.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::agisoft;
use crate::error::{PoseError, Result, TourError};
use crate::options::TourOptions;
use crate::pose::{normalize, CameraPose};
use crate::record::CameraRecord;

/// A pose source document: `{ "cameras": [...], "metadata": {...} }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseSource {
    /// Cameras in navigation order.
    pub cameras: Vec<CameraRecord>,
    /// Free-form description written by the exporter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SourceMetadata>,
}

/// Descriptive block written alongside the cameras.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Number of cameras the exporter wrote.
    #[serde(default)]
    pub total_cameras: Option<usize>,
    /// What the file contains.
    #[serde(default)]
    pub description: Option<String>,
    /// World frame the centers are expressed in.
    #[serde(default)]
    pub coordinate_system: Option<String>,
}

/// Result of normalizing a [`PoseSource`].
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Accepted poses, indexed contiguously in source order.
    pub poses: Arc<[CameraPose]>,
    /// Records that were refused, with their position in the source.
    pub rejected: Vec<(usize, PoseError)>,
}

impl LoadReport {
    /// Returns true if every record was accepted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl PoseSource {
    /// Wraps a list of records.
    pub fn new(cameras: Vec<CameraRecord>) -> Self {
        Self {
            cameras,
            metadata: None,
        }
    }

    /// Parses a pose source from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a pose source from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads and parses a pose source file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let source = Self::from_reader(std::io::BufReader::new(file))?;
        log::info!(
            "read {} camera records from {}",
            source.cameras.len(),
            path.display()
        );
        Ok(source)
    }

    /// Builds a pose source from an Agisoft Metashape camera export.
    ///
    /// Disabled cameras and cameras without a transform are left out; see
    /// [`agisoft::parse_cameras`].
    pub fn from_agisoft_xml(xml: &str) -> Result<Self> {
        let cameras = agisoft::parse_cameras(xml)?;
        log::info!("parsed {} cameras from Agisoft XML", cameras.len());
        Ok(Self {
            metadata: Some(SourceMetadata {
                total_cameras: Some(cameras.len()),
                description: Some("Camera poses for virtual tour navigation".to_string()),
                coordinate_system: Some(
                    "Agisoft chunk frame; world-to-camera rotations, OpenCV camera axes"
                        .to_string(),
                ),
            }),
            cameras,
        })
    }

    /// Reads an Agisoft Metashape camera export from disk.
    pub fn from_agisoft_xml_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path)?;
        log::info!("reading Agisoft cameras from {}", path.display());
        Self::from_agisoft_xml(&xml)
    }

    /// Serializes the source back to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates every record and converts the valid ones into poses.
    ///
    /// Invalid records are skipped and listed in [`LoadReport::rejected`];
    /// they never become navigable.
    pub fn normalize(&self, options: &TourOptions) -> LoadReport {
        let mut poses = Vec::with_capacity(self.cameras.len());
        let mut rejected = Vec::new();

        for (position, record) in self.cameras.iter().enumerate() {
            match normalize(record, poses.len(), options) {
                Ok(pose) => poses.push(pose),
                Err(err) => {
                    log::warn!(
                        "skipping camera {} ({}): {err}",
                        position,
                        record.display_name(position)
                    );
                    rejected.push((position, err));
                }
            }
        }

        if let Some(expected) = self.metadata.as_ref().and_then(|m| m.total_cameras) {
            if expected != self.cameras.len() {
                log::warn!(
                    "metadata announces {expected} cameras but the source lists {}",
                    self.cameras.len()
                );
            }
        }

        log::info!(
            "loaded {} of {} cameras",
            poses.len(),
            self.cameras.len()
        );

        LoadReport {
            poses: poses.into(),
            rejected,
        }
    }

    /// Like [`PoseSource::normalize`], but every record must be valid and at
    /// least one camera must remain.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidPose`] for the first refused record, or
    /// [`TourError::EmptyPoseSet`] if the source lists no cameras.
    pub fn normalize_strict(&self, options: &TourOptions) -> Result<Arc<[CameraPose]>> {
        let poses = self
            .cameras
            .iter()
            .enumerate()
            .map(|(index, record)| {
                normalize(record, index, options)
                    .map_err(|source| TourError::InvalidPose { index, source })
            })
            .collect::<Result<Vec<_>>>()?;

        if poses.is_empty() {
            return Err(TourError::EmptyPoseSet);
        }
        Ok(poses.into())
    }
}
