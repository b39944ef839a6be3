//! JSON frame inputs and reports.

use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::core::{BallRecord, BallRecordError, CalibrationError, ColorRanges, FrameContext, HsvRange};
use crate::solver::{SolveError, SolverParams, Triangulation, TriangulationSolver};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced while loading a frame input.
#[derive(thiserror::Error, Debug)]
pub enum FrameInputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid frame input JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Ball(#[from] BallRecordError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

/// Everything needed to solve one frame: detections, calibration and the
/// color ranges the detector used.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameInput {
    pub context: FrameContext,
    #[serde(default, skip_serializing_if = "ColorRanges::is_empty")]
    pub color_ranges: ColorRanges,
    #[serde(default)]
    pub solver: SolverParams,
    pub balls: Vec<BallRecord>,
}

impl FrameInput {
    /// Parse and validate a frame input.
    ///
    /// Balls without their own HSV range get the range registered for their
    /// color label.
    pub fn from_json_str(raw: &str) -> Result<Self, FrameInputError> {
        let mut input: FrameInput = serde_json::from_str(raw)?;
        input.context.validate()?;
        let ranges = &input.color_ranges;
        input.balls = input
            .balls
            .into_iter()
            .map(|b| {
                let range = ranges.get(b.color_label()).copied();
                b.with_default_hsv_range(range)
            })
            .collect();
        Ok(input)
    }

    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(path)))]
    pub fn load(path: &Path) -> Result<Self, FrameInputError> {
        let raw = fs::read_to_string(path).map_err(|source| FrameInputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Green, red and blue balls on one row, 200 px apart, with a 0.825 m
    /// spacing and the 0.0189634 rad/px lens ratio.
    pub fn demo() -> Result<Self, FrameInputError> {
        let color_ranges: ColorRanges = [
            ("Green", HsvRange::new([36, 50, 70], [89, 255, 255])),
            ("Red", HsvRange::new([0, 120, 70], [10, 255, 255])),
            ("Blue", HsvRange::new([90, 50, 70], [128, 255, 255])),
        ]
        .into_iter()
        .collect();

        let balls = [(100.0, "Green"), (300.0, "Red"), (500.0, "Blue")]
            .into_iter()
            .map(|(x, label)| {
                BallRecord::new(
                    Point2::new(x, 300.0),
                    Point2::new(x + 1.0, 301.0),
                    100.0,
                    label,
                    color_ranges.get(label).copied(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            context: FrameContext::new(0.0, 0.825, 0.0189634, 1640.0)?,
            color_ranges,
            solver: SolverParams::default(),
            balls,
        })
    }

    pub fn solve(&self) -> Result<Triangulation, SolveError> {
        TriangulationSolver::new(self.solver).solve_detailed(&self.balls, &self.context)
    }
}

/// One ball as written into a report.
#[derive(Clone, Debug, Serialize)]
pub struct BallSummary {
    pub label: String,
    pub circle_center: [f64; 2],
    pub moment_center: [f64; 2],
    pub radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hsv_range: Option<HsvRange>,
}

impl From<&BallRecord> for BallSummary {
    fn from(ball: &BallRecord) -> Self {
        let c = ball.circle_center();
        let m = ball.moment_center();
        Self {
            label: ball.color_label().to_string(),
            circle_center: [c.x, c.y],
            moment_center: [m.x, m.y],
            radius: ball.radius(),
            hsv_range: ball.hsv_range().copied(),
        }
    }
}

/// Result of solving one frame input, ready for JSON output.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<String>,
    pub frame_index: u64,
    pub balls: Vec<BallSummary>,
    /// Ball labels from left to right in the image.
    pub left_to_right: Vec<String>,
    pub triangulation: Option<Triangulation>,
    pub error: Option<String>,
}

impl FrameReport {
    pub fn new(
        input: &FrameInput,
        input_path: Option<&Path>,
        result: &Result<Triangulation, SolveError>,
    ) -> Self {
        let mut by_x: Vec<&BallRecord> = input.balls.iter().collect();
        by_x.sort_by(|a, b| a.x().total_cmp(&b.x()));

        Self {
            input_path: input_path.map(|p| p.to_string_lossy().into_owned()),
            frame_index: input.context.frame_index,
            balls: input.balls.iter().map(BallSummary::from).collect(),
            left_to_right: by_x.iter().map(|b| b.color_label().to_string()).collect(),
            triangulation: result.as_ref().ok().copied(),
            error: result.as_ref().err().map(|e| e.to_string()),
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<(), FrameInputError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| FrameInputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| FrameInputError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
