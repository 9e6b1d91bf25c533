use std::sync::Arc;

use geo::MultiPolygon;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::{
    common::{DistrictingConfig, Result},
    partition::{select_seeds, GrowthReport, LeftoverReport, Partition, RepairOutcome},
    plan::{score_districts, DistrictShape, PlanScore},
    unit::UnitStore,
};

/// A districting plan: every unit of a store assigned to one of
/// `num_districts` population-balanced regions.
#[derive(Clone, Debug)]
pub struct Plan {
    store: Arc<UnitStore>,
    partition: Partition,
    target: f64,
    tolerance: f64,
    seeds: Vec<usize>,
    growth: GrowthReport,
    leftovers: LeftoverReport,
    repair: RepairOutcome,
}

impl Plan {
    /// Generate a plan, seeding the random source from `config.seed` (or the OS).
    pub fn generate(store: impl Into<Arc<UnitStore>>, config: &DistrictingConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::generate_with_rng(store, config, &mut rng)
    }

    /// Generate a plan with an injected random source.
    ///
    /// Runs the full pipeline: adjacency graph, weighted seed selection,
    /// region growth, leftover resolution, then boundary repair.
    pub fn generate_with_rng<R: Rng>(
        store: impl Into<Arc<UnitStore>>,
        config: &DistrictingConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let store: Arc<UnitStore> = store.into();
        let k = config.num_districts;

        let graph = store.build_graph();
        let target = graph.total_population() as f64 / k as f64;
        info!(districts = k, target, tolerance = config.tolerance, "generating plan");

        let seeds = select_seeds(&graph, k, rng)?;
        let mut partition = Partition::new(k, graph);
        partition.seed(&seeds);

        let growth = partition.grow(target, config.tolerance);
        let leftovers = partition.resolve_leftovers();
        let repair = partition.repair(target, config.max_repair_iters, config.preserve_contiguity);

        let plan = Self { store, partition, target, tolerance: config.tolerance, seeds, growth, leftovers, repair };
        info!(
            max_deviation = plan.max_deviation(),
            within_tolerance = plan.within_tolerance(),
            "plan complete"
        );
        Ok(plan)
    }

    /// Get a reference to the unit store.
    #[inline] pub fn store(&self) -> &UnitStore { &self.store }

    /// Get a reference to the underlying partition.
    #[inline] pub fn partition(&self) -> &Partition { &self.partition }

    /// Get the number of districts.
    #[inline] pub fn num_districts(&self) -> usize { self.partition.num_regions() }

    /// Ideal district population (total population / number of districts).
    #[inline] pub fn target(&self) -> f64 { self.target }

    #[inline] pub fn tolerance(&self) -> f64 { self.tolerance }

    /// Seed unit of each district, by store index.
    #[inline] pub fn seeds(&self) -> &[usize] { &self.seeds }

    #[inline] pub fn growth(&self) -> &GrowthReport { &self.growth }

    #[inline] pub fn leftovers(&self) -> &LeftoverReport { &self.leftovers }

    #[inline] pub fn repair(&self) -> &RepairOutcome { &self.repair }

    /// Population of each district.
    #[inline] pub fn district_populations(&self) -> &[u64] { self.partition.region_populations() }

    /// District of the unit with the given id.
    pub fn district_of(&self, id: &str) -> Option<u32> {
        self.store.index_of(id).and_then(|unit| self.partition.region(unit))
    }

    /// `(unit id, district)` pairs in unit id order.
    pub fn assignments(&self) -> Vec<(&str, u32)> {
        (0..self.store.len())
            .filter_map(|unit| self.partition.region(unit).map(|district| (self.store.id(unit), district)))
            .collect()
    }

    /// Largest relative population deviation across districts.
    pub fn max_deviation(&self) -> f64 { self.partition.max_deviation(self.target) }

    /// Check whether every district lies within the tolerance band.
    pub fn within_tolerance(&self) -> bool { self.max_deviation() <= self.tolerance }

    /// Dissolved geometry of a district, or `None` if it has no usable members.
    pub fn district_geometry(&self, district: u32) -> Option<MultiPolygon<f64>> {
        self.store.geometries().union_of(&self.partition.sorted_members(district))
    }

    /// Dissolve every district into its shape and population.
    pub fn district_shapes(&self) -> Vec<DistrictShape> {
        (0..self.num_districts() as u32)
            .map(|district| DistrictShape {
                district,
                population: self.partition.region_population(district),
                geometry: self.district_geometry(district),
            })
            .collect()
    }

    /// Score the plan for population equality and Polsby–Popper compactness.
    pub fn score(&self) -> PlanScore {
        score_districts(&self.district_shapes(), self.target)
    }
}
