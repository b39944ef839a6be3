use ball_triangulation_core::{order_by_x, BallRecord, FrameContext};
use log::{debug, warn};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{BallOrdering, Degeneracy, ObserverPose, SolveError, SolverParams, Triangulation};

/// Stateless three-ball triangulation.
///
/// Geometry, for balls `b0, b1, b2` a known spacing `s` apart and camera
/// ratio `k` (radians per pixel):
///
/// ```text
/// angle1 = k * |b0 - b1|            angle2 = k * |b1 - b2|
/// alpha  = atan(s sin(a1 + a2) / (s sin(a2) / sin(a1) - s cos(a1 + a2)))
/// l      = s sin(a1 + alpha) / sin(a1)
/// x      = l sin(alpha)             y      = -l cos(alpha)
/// rotation = servo + deg((b1.x - reference_column) * k) + deg(alpha) + 90
/// ```
///
/// `x`/`y` are measured from `b2`. All positions are circle-fit centers.
#[derive(Clone, Copy, Debug, Default)]
pub struct TriangulationSolver {
    params: SolverParams,
}

impl TriangulationSolver {
    pub fn new(params: SolverParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Solve one frame and return only the pose.
    pub fn solve(
        &self,
        balls: &[BallRecord],
        ctx: &FrameContext,
    ) -> Result<ObserverPose, SolveError> {
        self.solve_detailed(balls, ctx).map(|t| t.pose)
    }

    /// Solve one frame, keeping the intermediate angles.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, balls, ctx),
            fields(frame = ctx.frame_index, balls = balls.len())
        )
    )]
    pub fn solve_detailed(
        &self,
        balls: &[BallRecord],
        ctx: &FrameContext,
    ) -> Result<Triangulation, SolveError> {
        let balls: &[BallRecord; 3] = balls
            .try_into()
            .map_err(|_| SolveError::WrongBallCount { got: balls.len() })?;
        ctx.validate()?;

        if let Err(err) = self.check_separation(balls) {
            warn!("frame {}: {err}", ctx.frame_index);
            return Err(err.into());
        }

        let left_to_right = order_by_x(balls);
        let geometry_order = match self.params.ordering {
            BallOrdering::InputOrder => [0, 1, 2],
            BallOrdering::SortedByX => left_to_right,
        };
        let [p0, p1, p2] = geometry_order.map(|i| balls[i].circle_center());

        let result = self.triangulate(p0, p1, p2, ctx);
        match result {
            Ok((pose, angle1, angle2, alpha, distance)) => {
                debug!(
                    "frame {}: angle1={angle1:.6} angle2={angle2:.6} alpha={alpha:.6} l={distance:.6} -> x={:.4} y={:.4} rot={:.3}",
                    ctx.frame_index, pose.x, pose.y, pose.rotation
                );
                Ok(Triangulation {
                    pose,
                    angle1,
                    angle2,
                    alpha,
                    distance,
                    geometry_order,
                    left_to_right,
                })
            }
            Err(err) => {
                warn!("frame {}: {err}", ctx.frame_index);
                Err(err.into())
            }
        }
    }

    fn check_separation(&self, balls: &[BallRecord; 3]) -> Result<(), Degeneracy> {
        for (first, second) in [(0, 1), (0, 2), (1, 2)] {
            let a = balls[first].circle_center();
            let b = balls[second].circle_center();
            if a == b || (a - b).norm() <= self.params.min_separation_px {
                return Err(Degeneracy::CoincidentBalls { first, second });
            }
        }
        Ok(())
    }

    fn triangulate(
        &self,
        p0: Point2<f64>,
        p1: Point2<f64>,
        p2: Point2<f64>,
        ctx: &FrameContext,
    ) -> Result<(ObserverPose, f64, f64, f64, f64), Degeneracy> {
        let eps = self.params.min_denominator;
        let s = ctx.target_spacing;
        let k = ctx.camera_ratio;

        let angle1 = k * (p0 - p1).norm();
        let angle2 = k * (p1 - p2).norm();

        let sin1 = angle1.sin();
        if sin1.abs() < eps {
            return Err(Degeneracy::ZeroSubtendedAngle { angle1 });
        }

        let sum = angle1 + angle2;
        let num = s * sum.sin();
        let den = s * angle2.sin() / sin1 - s * sum.cos();
        if !den.is_finite() || den.abs() < eps {
            return Err(Degeneracy::UndefinedDirection { denominator: den });
        }

        let alpha = (num / den).atan();
        let distance = s * (angle1 + alpha).sin() / sin1;

        let x = distance * alpha.sin();
        let y = -distance * alpha.cos();

        let rotation_offset = (p1.x - ctx.reference_column) * k;
        let rotation = ctx.servo_angle + rotation_offset.to_degrees() + alpha.to_degrees() + 90.0;

        let pose = ObserverPose { x, y, rotation };
        if !alpha.is_finite() || !distance.is_finite() {
            return Err(Degeneracy::NonFinite("observer distance"));
        }
        if !pose.is_finite() {
            return Err(Degeneracy::NonFinite("observer pose"));
        }
        Ok((pose, angle1, angle2, alpha, distance))
    }
}

/// Solve one frame with default parameters.
pub fn solve(balls: &[BallRecord], ctx: &FrameContext) -> Result<ObserverPose, SolveError> {
    TriangulationSolver::default().solve(balls, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ball(x: f64, y: f64, label: &str) -> BallRecord {
        BallRecord::new(Point2::new(x, y), Point2::new(x, y), 20.0, label, None).unwrap()
    }

    fn ctx() -> FrameContext {
        FrameContext::new(0.0, 0.825, 0.0189634, 1640.0).unwrap()
    }

    fn row() -> Vec<BallRecord> {
        vec![
            ball(100.0, 300.0, "Green"),
            ball(300.0, 300.0, "Red"),
            ball(500.0, 300.0, "Blue"),
        ]
    }

    #[test]
    fn wrong_ball_count_is_rejected() {
        let solver = TriangulationSolver::default();
        let mut balls = row();
        balls.pop();
        assert_eq!(
            solver.solve(&balls, &ctx()),
            Err(SolveError::WrongBallCount { got: 2 })
        );
        let mut balls = row();
        balls.push(ball(700.0, 300.0, "Yellow"));
        assert_eq!(
            solver.solve(&balls, &ctx()),
            Err(SolveError::WrongBallCount { got: 4 })
        );
    }

    #[test]
    fn coincident_balls_are_degenerate() {
        let balls = vec![
            ball(100.0, 300.0, "Green"),
            ball(300.0, 300.0, "Red"),
            ball(300.0, 300.0, "Blue"),
        ];
        let err = TriangulationSolver::default()
            .solve(&balls, &ctx())
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::DegenerateGeometry(Degeneracy::CoincidentBalls {
                first: 1,
                second: 2
            })
        );
    }

    #[test]
    fn min_separation_widens_coincidence() {
        let balls = vec![
            ball(100.0, 300.0, "Green"),
            ball(102.0, 300.0, "Red"),
            ball(500.0, 300.0, "Blue"),
        ];
        let params = SolverParams {
            min_separation_px: 3.0,
            ..SolverParams::default()
        };
        assert!(matches!(
            TriangulationSolver::new(params).solve(&balls, &ctx()),
            Err(SolveError::DegenerateGeometry(
                Degeneracy::CoincidentBalls { .. }
            ))
        ));
    }

    #[test]
    fn zero_sine_of_first_angle_is_degenerate() {
        // camera_ratio * 100 px = pi
        let ctx = FrameContext::new(0.0, 1.0, std::f64::consts::PI / 100.0, 0.0).unwrap();
        let balls = vec![
            ball(0.0, 0.0, "Green"),
            ball(100.0, 0.0, "Red"),
            ball(130.0, 0.0, "Blue"),
        ];
        let params = SolverParams {
            min_denominator: 1e-9,
            ..SolverParams::default()
        };
        assert!(matches!(
            TriangulationSolver::new(params).solve(&balls, &ctx),
            Err(SolveError::DegenerateGeometry(
                Degeneracy::ZeroSubtendedAngle { .. }
            ))
        ));
    }

    #[test]
    fn invalid_calibration_is_reported() {
        let mut ctx = ctx();
        ctx.camera_ratio = 0.0;
        assert!(matches!(
            TriangulationSolver::default().solve(&row(), &ctx),
            Err(SolveError::InvalidCalibration(_))
        ));
    }

    #[test]
    fn detailed_result_reports_orders() {
        let balls = vec![
            ball(100.0, 300.0, "Green"),
            ball(500.0, 300.0, "Blue"),
            ball(300.0, 300.0, "Red"),
        ];
        let t = TriangulationSolver::default()
            .solve_detailed(&balls, &ctx())
            .unwrap();
        assert_eq!(t.geometry_order, [0, 1, 2]);
        assert_eq!(t.left_to_right, [0, 2, 1]);
        assert_relative_eq!(t.angle1, 0.0189634 * 400.0, epsilon = 1e-12);
        assert_relative_eq!(t.angle2, 0.0189634 * 200.0, epsilon = 1e-12);

        let sorted = TriangulationSolver::new(
            SolverParams::default().with_ordering(BallOrdering::SortedByX),
        )
        .solve_detailed(&balls, &ctx())
        .unwrap();
        assert_eq!(sorted.geometry_order, [0, 2, 1]);
        assert_relative_eq!(sorted.angle1, 0.0189634 * 200.0, epsilon = 1e-12);
    }

    #[test]
    fn servo_angle_shifts_rotation_only() {
        let base = solve(&row(), &ctx()).unwrap();
        let mut turned = ctx();
        turned.servo_angle = 15.0;
        let shifted = solve(&row(), &turned).unwrap();
        assert_eq!(base.x, shifted.x);
        assert_eq!(base.y, shifted.y);
        assert_relative_eq!(shifted.rotation - base.rotation, 15.0, epsilon = 1e-9);
    }
}
