use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::{ChartScales, DataPoint};

/// A series element together with its pixel-space position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointProjection {
    pub x: f64,
    pub y: f64,
    pub point: DataPoint,
}

/// Projects every series element through the chart scales.
///
/// Output order matches input order so indices stay interchangeable.
#[must_use]
pub fn project_points(points: &[DataPoint], scales: ChartScales) -> Vec<PointProjection> {
    #[cfg(feature = "parallel-projection")]
    {
        use rayon::prelude::*;

        points
            .par_iter()
            .map(|point| project_one(*point, scales))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        points
            .iter()
            .map(|point| project_one(*point, scales))
            .collect()
    }
}

fn project_one(point: DataPoint, scales: ChartScales) -> PointProjection {
    let (x, y) = scales.project(point);
    PointProjection { x, y, point }
}

/// One drawing instruction of a curve in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
}

/// Vector path description produced by the path builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinePath {
    pub commands: Vec<PathCommand>,
}

impl LinePath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// SVG path data (`M`, `L`, `C`) for canvases that parse path strings.
    #[must_use]
    pub fn to_svg_path_data(&self) -> String {
        let mut out = String::new();
        for command in &self.commands {
            // Writing into a String cannot fail.
            let _ = match *command {
                PathCommand::MoveTo { x, y } => write!(out, "M{x},{y}"),
                PathCommand::LineTo { x, y } => write!(out, "L{x},{y}"),
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => write!(out, "C{x1},{y1},{x2},{y2},{x},{y}"),
            };
        }
        out
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.commands.iter().all(|command| match *command {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                x.is_finite() && y.is_finite()
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => [x1, y1, x2, y2, x, y].iter().all(|v| v.is_finite()),
        })
    }
}

/// Builds the series curve with monotone-x cubic interpolation.
#[must_use]
pub fn build_line_path(projections: &[PointProjection]) -> LinePath {
    let anchors: Vec<(f64, f64)> = projections.iter().map(|p| (p.x, p.y)).collect();
    build_monotone_path(&anchors)
}

/// Monotone cubic interpolation through pixel anchors.
///
/// Each segment's control points stay inside the vertical span of its two
/// anchors, so the curve never overshoots a local minimum or maximum.
/// Consecutive coincident anchors are collapsed; a single anchor yields a lone
/// `MoveTo` and two anchors a straight `LineTo`.
#[must_use]
pub fn build_monotone_path(anchors: &[(f64, f64)]) -> LinePath {
    let mut unique: Vec<(f64, f64)> = Vec::with_capacity(anchors.len());
    for &anchor in anchors {
        if unique.last() != Some(&anchor) {
            unique.push(anchor);
        }
    }

    let mut commands = Vec::with_capacity(unique.len());
    let Some(&(x0, y0)) = unique.first() else {
        return LinePath { commands };
    };
    commands.push(PathCommand::MoveTo { x: x0, y: y0 });
    match unique.len() {
        1 => return LinePath { commands },
        2 => {
            let (x, y) = unique[1];
            commands.push(PathCommand::LineTo { x, y });
            return LinePath { commands };
        }
        _ => {}
    }

    let tangents = monotone_tangents(&unique);
    for (index, pair) in unique.windows(2).enumerate() {
        let (xa, ya) = pair[0];
        let (xb, yb) = pair[1];
        let dx = (xb - xa) / 3.0;
        commands.push(PathCommand::CubicTo {
            x1: xa + dx,
            y1: ya + dx * tangents[index],
            x2: xb - dx,
            y2: yb - dx * tangents[index + 1],
            x: xb,
            y: yb,
        });
    }
    LinePath { commands }
}

fn secant(a: (f64, f64), b: (f64, f64)) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 { 0.0 } else { (b.1 - a.1) / h }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Steffen-style tangents: interior tangents are limited by both neighbouring
/// secants and vanish at local extrema; end tangents are one-sided.
fn monotone_tangents(anchors: &[(f64, f64)]) -> Vec<f64> {
    let n = anchors.len();
    let mut tangents = vec![0.0; n];

    for i in 1..n - 1 {
        let h0 = anchors[i].0 - anchors[i - 1].0;
        let h1 = anchors[i + 1].0 - anchors[i].0;
        let s0 = secant(anchors[i - 1], anchors[i]);
        let s1 = secant(anchors[i], anchors[i + 1]);
        let p = if h0 + h1 == 0.0 {
            0.0
        } else {
            (s0 * h1 + s1 * h0) / (h0 + h1)
        };
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        tangents[i] = if t.is_finite() { t } else { 0.0 };
    }

    tangents[0] = end_tangent(secant(anchors[0], anchors[1]), tangents[1]);
    tangents[n - 1] = end_tangent(secant(anchors[n - 2], anchors[n - 1]), tangents[n - 2]);
    tangents
}

fn end_tangent(secant: f64, neighbour_tangent: f64) -> f64 {
    let t = (3.0 * secant - neighbour_tangent) / 2.0;
    if t.is_finite() { t } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::{PathCommand, build_monotone_path, monotone_tangents};

    #[test]
    fn local_extremum_gets_flat_tangent() {
        let tangents = monotone_tangents(&[(0.0, 10.0), (10.0, 0.0), (20.0, 10.0)]);
        assert_eq!(tangents[1], 0.0);
    }

    #[test]
    fn coincident_anchors_are_collapsed() {
        let path = build_monotone_path(&[(0.0, 0.0), (0.0, 0.0), (5.0, 5.0)]);
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 5.0, y: 5.0 },
            ]
        );
    }
}
