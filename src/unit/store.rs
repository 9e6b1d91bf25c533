use ahash::AHashMap;
use tracing::{info, warn};

use crate::{
    common::{DistrictError, Result},
    geom::Geometries,
    graph::Graph,
    unit::Unit,
};

/// Immutable set of units, ordered by id.
///
/// A unit's position in the store is its node index in the adjacency graph
/// and in every partition built over it.
#[derive(Debug, Clone)]
pub struct UnitStore {
    ids: Vec<String>,
    populations: Vec<u64>,
    geoms: Geometries,
    index: AHashMap<String, usize>,
}

impl UnitStore {
    /// Build a store from unit records, rejecting empty input and duplicate ids.
    pub fn new(mut units: Vec<Unit>) -> Result<Self> {
        if units.is_empty() {
            return Err(DistrictError::InvalidInput("unit set is empty".into()));
        }
        if let Some(unit) = units.iter().find(|unit| unit.id.is_empty()) {
            return Err(DistrictError::InvalidInput(format!(
                "unit with population {} has an empty id", unit.population
            )));
        }

        units.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(pair) = units.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(DistrictError::InvalidInput(format!("duplicate unit id '{}'", pair[0].id)));
        }

        let mut ids = Vec::with_capacity(units.len());
        let mut populations = Vec::with_capacity(units.len());
        let mut shapes = Vec::with_capacity(units.len());
        for unit in units {
            ids.push(unit.id);
            populations.push(unit.population);
            shapes.push(unit.geometry);
        }

        let index = ids.iter().enumerate().map(|(i, id)| (id.clone(), i)).collect();
        Ok(Self { ids, populations, geoms: Geometries::new(shapes), index })
    }

    /// Get the number of units.
    #[inline] pub fn len(&self) -> usize { self.ids.len() }

    /// Check if there are no units (never true for a constructed store).
    #[inline] pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Id of the unit at `index`.
    #[inline] pub fn id(&self, index: usize) -> &str { &self.ids[index] }

    /// All unit ids in index order.
    #[inline] pub fn ids(&self) -> &[String] { &self.ids }

    /// Position of the unit with the given id.
    #[inline] pub fn index_of(&self, id: &str) -> Option<usize> { self.index.get(id).copied() }

    /// Population of the unit at `index`.
    #[inline] pub fn population(&self, index: usize) -> u64 { self.populations[index] }

    /// Sum of all unit populations.
    pub fn total_population(&self) -> u64 { self.populations.iter().sum() }

    /// Geometry of the unit at `index`.
    #[inline] pub fn geometry(&self, index: usize) -> &geo::MultiPolygon<f64> { self.geoms.get(index) }

    #[inline] pub(crate) fn geometries(&self) -> &Geometries { &self.geoms }

    /// Build the rook contiguity graph over all units.
    pub fn build_graph(&self) -> Graph {
        let skipped = self.geoms.unusable_count();
        if skipped > 0 {
            warn!(skipped, "units with empty or invalid geometry left without neighbors");
        }

        let graph = Graph::new(&self.geoms.rook_adjacencies(), self.populations.clone());
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            components = graph.num_components(),
            "built adjacency graph"
        );
        graph
    }
}
