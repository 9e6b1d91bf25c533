use geo::{
    coordinate_position::CoordPos, dimensions::Dimensions, BooleanOps, MultiPolygon, Relate,
    Validation,
};
use rstar::{RTree, AABB};

use crate::geom::UnitEnvelope;

/// Unit geometries indexed by position, with an R-tree over their envelopes.
///
/// Units whose geometry is empty or invalid get no envelope; they never show
/// up in spatial queries and end up as isolated nodes of the adjacency graph.
#[derive(Debug, Clone)]
pub(crate) struct Geometries {
    shapes: Vec<MultiPolygon<f64>>,
    usable: Vec<bool>,
    rtree: RTree<UnitEnvelope>,
}

impl Geometries {
    /// Index a list of unit geometries.
    pub(crate) fn new(shapes: Vec<MultiPolygon<f64>>) -> Self {
        let usable = shapes.iter()
            .map(|shape| !shape.0.is_empty() && shape.is_valid())
            .collect::<Vec<_>>();

        let rtree = RTree::bulk_load(
            shapes.iter().enumerate()
                .filter(|&(i, _)| usable[i])
                .filter_map(|(i, shape)| UnitEnvelope::of(i, shape))
                .collect()
        );

        Self { shapes, usable, rtree }
    }

    /// Get the number of geometries.
    #[inline] pub(crate) fn len(&self) -> usize { self.shapes.len() }

    /// Get the geometry of a unit.
    #[inline] pub(crate) fn get(&self, unit: usize) -> &MultiPolygon<f64> { &self.shapes[unit] }

    /// Number of geometries left out of the spatial index.
    pub(crate) fn unusable_count(&self) -> usize {
        self.usable.iter().filter(|&&ok| !ok).count()
    }

    /// Indices of geometries whose envelope intersects `envelope`.
    #[inline]
    fn query(&self, envelope: &AABB<[f64; 2]>) -> impl Iterator<Item = usize> + '_ {
        self.rtree.locate_in_envelope_intersecting(envelope).map(|entry| entry.unit())
    }

    /// Build rook adjacency lists: two units are adjacent when their polygons
    /// intersect and their boundaries share a segment of positive length.
    /// Corner-only contact does not count; sliver overlaps along a shared
    /// edge do.
    pub(crate) fn rook_adjacencies(&self) -> Vec<Vec<u32>> {
        let mut adjacencies = vec![Vec::new(); self.len()];

        for entry in self.rtree.iter() {
            let i = entry.unit();
            for j in self.query(&entry.aabb()) {
                if j <= i { continue } // each unordered pair once

                let matrix = self.shapes[i].relate(&self.shapes[j]);
                if matrix.is_intersects()
                    && matrix.get(CoordPos::OnBoundary, CoordPos::OnBoundary) == Dimensions::OneDimensional
                {
                    adjacencies[i].push(j as u32);
                    adjacencies[j].push(i as u32);
                }
            }
        }

        adjacencies.iter_mut().for_each(|neighbors| neighbors.sort_unstable());
        adjacencies
    }

    /// Union of the geometries of the given units, or `None` for an empty set.
    pub(crate) fn union_of(&self, units: &[usize]) -> Option<MultiPolygon<f64>> {
        units.iter()
            .filter(|&&u| self.usable[u])
            .map(|&u| self.shapes[u].clone())
            .reduce(|a, b| a.union(&b))
    }
}
