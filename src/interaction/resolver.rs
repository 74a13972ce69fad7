use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{ChartScales, DataPoint, LayoutBox, PointProjection, project_points};

/// Winner of a nearest-point lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPoint {
    pub index: usize,
    pub projection: PointProjection,
}

/// Finds the projection horizontally closest to `pointer_x`.
///
/// The pointer is clamped into the plotting rectangle first, so coordinates
/// far outside the box resolve to the first or last point. Exact ties go to
/// the lowest index. Returns `None` only for an empty slice.
#[must_use]
pub fn resolve_nearest_point(
    pointer_x: f64,
    projections: &[PointProjection],
    layout: LayoutBox,
) -> Option<ResolvedPoint> {
    let clamped_x = layout.clamp_x(pointer_x);
    projections
        .iter()
        .enumerate()
        // `min_by_key` keeps the first of equal keys.
        .min_by_key(|(_, projection)| OrderedFloat((projection.x - clamped_x).abs()))
        .map(|(index, projection)| ResolvedPoint {
            index,
            projection: *projection,
        })
}

/// Read-only projection table shared between the chart and the resolver
/// worker. Rebuilt whole whenever the dataset or layout changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionTable {
    projections: Arc<[PointProjection]>,
    layout: LayoutBox,
}

impl ProjectionTable {
    #[must_use]
    pub fn build(points: &[DataPoint], scales: ChartScales, layout: LayoutBox) -> Self {
        Self {
            projections: project_points(points, scales).into(),
            layout,
        }
    }

    #[must_use]
    pub fn from_projections(projections: Vec<PointProjection>, layout: LayoutBox) -> Self {
        Self {
            projections: projections.into(),
            layout,
        }
    }

    #[must_use]
    pub fn projections(&self) -> &[PointProjection] {
        &self.projections
    }

    #[must_use]
    pub fn layout(&self) -> LayoutBox {
        self.layout
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    #[must_use]
    pub fn resolve(&self, pointer_x: f64) -> Option<ResolvedPoint> {
        resolve_nearest_point(pointer_x, &self.projections, self.layout)
    }
}
