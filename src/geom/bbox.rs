use geo::{BoundingRect, MultiPolygon, Rect};
use rstar::{RTreeObject, AABB};

/// Bounding rectangle of a unit's geometry, stored in the unit R-tree.
#[derive(Debug, Clone)]
pub(super) struct UnitEnvelope {
    unit: usize,
    rect: Rect<f64>,
}

impl UnitEnvelope {
    /// Envelope for `unit`, or `None` when the geometry has no extent.
    pub(super) fn of(unit: usize, shape: &MultiPolygon<f64>) -> Option<Self> {
        shape.bounding_rect().map(|rect| Self { unit, rect })
    }

    /// Index of the unit this envelope bounds.
    #[inline] pub(super) fn unit(&self) -> usize { self.unit }

    /// The envelope as an R-tree query window.
    #[inline]
    pub(super) fn aabb(&self) -> AABB<[f64; 2]> {
        AABB::from_corners(self.rect.min().into(), self.rect.max().into())
    }
}

impl RTreeObject for UnitEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope { self.aabb() }
}
