use std::fmt;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::color::HsvRange;

/// Errors returned when a ball record violates its invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BallRecordError {
    #[error("ball radius must be non-negative (got {radius})")]
    NegativeRadius { radius: f64 },
    #[error("ball record contains a non-finite {field}")]
    NonFinite { field: &'static str },
}

/// One detected ball in a single frame.
///
/// Both center estimates are kept. The circle-fit center (minimum enclosing
/// circle) is the one used for ordering and for all geometry; the moment
/// center (image moments centroid) is carried for consumers that prefer it
/// and can differ from the circle center by a few pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BallRecordSpec", into = "BallRecordSpec")]
pub struct BallRecord {
    circle_center: Point2<f64>,
    moment_center: Point2<f64>,
    radius: f64,
    color_label: String,
    hsv_range: Option<HsvRange>,
}

impl BallRecord {
    /// Build a validated record. Both centers are stored as given.
    pub fn new(
        circle_center: Point2<f64>,
        moment_center: Point2<f64>,
        radius: f64,
        color_label: impl Into<String>,
        hsv_range: Option<HsvRange>,
    ) -> Result<Self, BallRecordError> {
        if !(circle_center.x.is_finite() && circle_center.y.is_finite()) {
            return Err(BallRecordError::NonFinite {
                field: "circle_center",
            });
        }
        if !(moment_center.x.is_finite() && moment_center.y.is_finite()) {
            return Err(BallRecordError::NonFinite {
                field: "moment_center",
            });
        }
        if !radius.is_finite() {
            return Err(BallRecordError::NonFinite { field: "radius" });
        }
        if radius < 0.0 {
            return Err(BallRecordError::NegativeRadius { radius });
        }

        Ok(Self {
            circle_center,
            moment_center,
            radius,
            color_label: color_label.into(),
            hsv_range,
        })
    }

    /// Attach the color range that produced this detection, keeping any
    /// range already present.
    pub fn with_default_hsv_range(mut self, range: Option<HsvRange>) -> Self {
        if self.hsv_range.is_none() {
            self.hsv_range = range;
        }
        self
    }

    pub fn circle_center(&self) -> Point2<f64> {
        self.circle_center
    }

    pub fn moment_center(&self) -> Point2<f64> {
        self.moment_center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color_label(&self) -> &str {
        &self.color_label
    }

    pub fn hsv_range(&self) -> Option<&HsvRange> {
        self.hsv_range.as_ref()
    }

    /// Horizontal sort key (circle-fit center x).
    #[inline]
    pub fn x(&self) -> f64 {
        self.circle_center.x
    }

    /// Vertical sort key (circle-fit center y).
    #[inline]
    pub fn y(&self) -> f64 {
        self.circle_center.y
    }

    pub fn sort_key(&self) -> (f64, f64) {
        (self.x(), self.y())
    }

    /// Pixel distance between the circle-fit and moment centers.
    pub fn center_discrepancy(&self) -> f64 {
        (self.circle_center - self.moment_center).norm()
    }
}

impl fmt::Display for BallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : ({}, {})",
            self.color_label, self.circle_center.x, self.circle_center.y
        )
    }
}

/// Serialized form of [`BallRecord`]; validated on conversion.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct BallRecordSpec {
    circle_center: Point2<f64>,
    moment_center: Point2<f64>,
    radius: f64,
    color_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hsv_range: Option<HsvRange>,
}

impl TryFrom<BallRecordSpec> for BallRecord {
    type Error = BallRecordError;

    fn try_from(spec: BallRecordSpec) -> Result<Self, Self::Error> {
        BallRecord::new(
            spec.circle_center,
            spec.moment_center,
            spec.radius,
            spec.color_label,
            spec.hsv_range,
        )
    }
}

impl From<BallRecord> for BallRecordSpec {
    fn from(ball: BallRecord) -> Self {
        Self {
            circle_center: ball.circle_center,
            moment_center: ball.moment_center,
            radius: ball.radius,
            color_label: ball.color_label,
            hsv_range: ball.hsv_range,
        }
    }
}

/// Input indices of three balls ordered left to right by [`BallRecord::x`].
///
/// Ties keep input order.
pub fn order_by_x(balls: &[BallRecord; 3]) -> [usize; 3] {
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| balls[a].x().total_cmp(&balls[b].x()));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ball(x: f64, y: f64, label: &str) -> BallRecord {
        BallRecord::new(
            Point2::new(x, y),
            Point2::new(x + 1.0, y + 1.0),
            100.0,
            label,
            None,
        )
        .expect("valid ball")
    }

    #[test]
    fn sort_key_uses_circle_center() {
        let b = ball(300.0, 120.5, "Red");
        assert_eq!(b.sort_key(), (300.0, 120.5));
        assert_eq!(b.moment_center(), Point2::new(301.0, 121.5));
    }

    #[test]
    fn moment_center_keeps_subpixel_precision() {
        let b = BallRecord::new(
            Point2::new(10.0, 10.0),
            Point2::new(10.4, 12.6),
            3.0,
            "Blue",
            None,
        )
        .unwrap();
        assert_eq!(b.moment_center(), Point2::new(10.4, 12.6));
        assert_relative_eq!(b.center_discrepancy(), 6.92f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn rejects_negative_radius() {
        let err = BallRecord::new(Point2::origin(), Point2::origin(), -1.0, "Red", None)
            .unwrap_err();
        assert_eq!(err, BallRecordError::NegativeRadius { radius: -1.0 });
    }

    #[test]
    fn rejects_non_finite_center() {
        let err = BallRecord::new(
            Point2::new(f64::NAN, 0.0),
            Point2::origin(),
            1.0,
            "Red",
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BallRecordError::NonFinite {
                field: "circle_center"
            }
        );
    }

    #[test]
    fn display_matches_label_and_center() {
        assert_eq!(ball(100.0, 300.0, "Green").to_string(), "Green : (100, 300)");
    }

    #[test]
    fn order_by_x_sorts_left_to_right() {
        let balls = [
            ball(100.0, 300.0, "Green"),
            ball(500.0, 300.0, "Blue"),
            ball(300.0, 300.0, "Red"),
        ];
        assert_eq!(order_by_x(&balls), [0, 2, 1]);
    }

    #[test]
    fn order_by_x_is_stable_on_ties() {
        let balls = [
            ball(200.0, 10.0, "A"),
            ball(100.0, 10.0, "B"),
            ball(200.0, 50.0, "C"),
        ];
        assert_eq!(order_by_x(&balls), [1, 0, 2]);
    }

    #[test]
    fn deserialization_validates_radius() {
        let json = r#"{"circle_center":[1,2],"moment_center":[1,2],"radius":-3,"color_label":"Red"}"#;
        assert!(serde_json::from_str::<BallRecord>(json).is_err());

        let json = r#"{"circle_center":[1,2],"moment_center":[1.2,2.0],"radius":3,"color_label":"Red"}"#;
        let b: BallRecord = serde_json::from_str(json).unwrap();
        assert_eq!(b.color_label(), "Red");
        assert_eq!(b.moment_center(), Point2::new(1.2, 2.0));
        assert!(b.hsv_range().is_none());
    }

    #[test]
    fn default_hsv_range_does_not_override() {
        let own = HsvRange::new([0, 0, 0], [10, 10, 10]);
        let other = HsvRange::new([20, 20, 20], [30, 30, 30]);
        let b = BallRecord::new(Point2::origin(), Point2::origin(), 1.0, "Red", Some(own))
            .unwrap()
            .with_default_hsv_range(Some(other));
        assert_eq!(b.hsv_range(), Some(&own));

        let b = ball(0.0, 0.0, "Red").with_default_hsv_range(Some(other));
        assert_eq!(b.hsv_range(), Some(&other));
    }
}
