use super::bc::{self, Orientation};
use super::node::{NodeBehavior, NodeBehaviorPool, NodeHandle};
use super::{CollisionManager, MultiscaleMap};
use crate::prelude_crate::*;
use colored::*;
use rayon::prelude::*;
use std::ops::Range;

// ------------------------------------------------------------------------ ENUM: BoundsPolicy

/// How streaming guards against sending populations outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Debug assertion only; an out-of-grid write is undefined in release builds.
    Assert,
    /// Every target is checked and a violation is returned as an error.
    #[default]
    Checked,
}

// ---------------------------------------------------------------------------- STRUCT: Region

/// Rectangle of nodes, `i` and `j` ranges half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub i: Range<usize>,
    pub j: Range<usize>,
}

impl Region {
    pub fn new(i: Range<usize>, j: Range<usize>) -> Self {
        Region { i, j }
    }

    pub fn node(i: usize, j: usize) -> Self {
        Region {
            i: i..i + 1,
            j: j..j + 1,
        }
    }

    pub fn all(ni: usize, nj: usize) -> Self {
        Region { i: 0..ni, j: 0..nj }
    }

    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// let region = Region::new(0..4, 3..20).clip(40, 12);
    ///
    /// assert_eq!(region, Region::new(0..4, 3..12));
    /// assert_eq!(region.iter().count(), 36);
    /// ```
    pub fn clip(&self, ni: usize, nj: usize) -> Self {
        let clip = |range: &Range<usize>, n: usize| range.start.min(n)..range.end.min(n);
        Region {
            i: clip(&self.i, ni),
            j: clip(&self.j, nj),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.i
            .clone()
            .flat_map(move |i| self.j.clone().map(move |j| (i, j)))
    }
}

// ---------------------------------------------------------------------------- STRUCT: Lattice

/// Double-buffered D2Q9 populations over an `ni x nj` grid, with one behavior per cell.
///
/// Nodes are stored row-major over `(i, j)` and the nine populations of a node are
/// contiguous. Streaming reads the current buffer and writes the scratch buffer only;
/// collision works on the current buffer, and the boundary correction that follows it
/// writes the incoming slots of the scratch buffer that no stream targets.
#[derive(Debug)]
pub struct Lattice {
    ni: usize,
    nj: usize,
    f: Vec<Float>,
    f_tmp: Vec<Float>,
    handles: Vec<Option<NodeHandle>>,
    pool: NodeBehaviorPool,
    bounds_policy: BoundsPolicy,
}

impl Lattice {
    /// Both buffers start at the rest equilibrium of `density`.
    ///
    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// let lattice = Lattice::new(40, 12, 1.0, BoundsPolicy::Checked);
    ///
    /// assert_eq!(lattice.get_n(), (40, 12));
    /// assert!((lattice.get_f(3, 4, 0) - 4.0 / 9.0).abs() < 1e-12);
    /// assert!((lattice.get_incoming(3, 4, 5) - 1.0 / 36.0).abs() < 1e-12);
    /// ```
    pub fn new(ni: usize, nj: usize, density: Float, bounds_policy: BoundsPolicy) -> Self {
        Self::with_pool_capacity(ni, nj, density, bounds_policy, ni * nj)
    }

    /// Like [`Lattice::new`], with room for only `capacity` node behaviors. Cells left
    /// without a behavior stay inactive.
    ///
    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// let mut lattice = Lattice::with_pool_capacity(4, 4, 1.0, BoundsPolicy::Checked, 1);
    ///
    /// assert!(lattice.set_node_behavior(1, 1, NodeBehavior::Active).is_ok());
    /// assert_eq!(
    ///     lattice.set_node_behavior(2, 2, NodeBehavior::Active),
    ///     Err(LbError::PoolExhausted { capacity: 1 })
    /// );
    /// ```
    pub fn with_pool_capacity(
        ni: usize,
        nj: usize,
        density: Float,
        bounds_policy: BoundsPolicy,
        capacity: usize,
    ) -> Self {
        let num_nodes = ni * nj;
        let f = (0..num_nodes)
            .flat_map(|_| W.iter().map(move |w_i| w_i * density))
            .collect::<Vec<Float>>();
        Lattice {
            ni,
            nj,
            f_tmp: f.clone(),
            f,
            handles: vec![None; num_nodes],
            pool: NodeBehaviorPool::with_capacity(capacity),
            bounds_policy,
        }
    }

    pub fn get_ni(&self) -> usize {
        self.ni
    }

    pub fn get_nj(&self) -> usize {
        self.nj
    }

    pub fn get_n(&self) -> (usize, usize) {
        (self.ni, self.nj)
    }

    pub fn get_bounds_policy(&self) -> BoundsPolicy {
        self.bounds_policy
    }

    pub fn get_pool(&self) -> &NodeBehaviorPool {
        &self.pool
    }

    pub(crate) fn node_index(&self, i: usize, j: usize) -> usize {
        i * self.nj + j
    }

    fn slot(&self, i: usize, j: usize, k: usize) -> usize {
        self.node_index(i, j) * Q + k
    }

    /// Cheap grid membership predicate.
    pub fn contains(&self, i: isize, j: isize) -> bool {
        i >= 0 && j >= 0 && (i as usize) < self.ni && (j as usize) < self.nj
    }

    /// Current population `k` of node `(i, j)`.
    pub fn get_f(&self, i: usize, j: usize, k: usize) -> Float {
        self.f[self.slot(i, j, k)]
    }

    pub fn get_populations(&self, i: usize, j: usize) -> &[Float] {
        let start = self.slot(i, j, 0);
        &self.f[start..start + Q]
    }

    pub(crate) fn get_populations_mut(&mut self, i: usize, j: usize) -> &mut [Float] {
        let start = self.slot(i, j, 0);
        &mut self.f[start..start + Q]
    }

    /// Overwrites the current populations of one node.
    pub fn set_populations(&mut self, i: usize, j: usize, f: &[Float; Q]) {
        self.get_populations_mut(i, j).copy_from_slice(f);
    }

    /// Population `k` already delivered to `(i, j)` for the next step.
    pub fn get_incoming(&self, i: usize, j: usize, k: usize) -> Float {
        self.f_tmp[self.slot(i, j, k)]
    }

    pub(crate) fn get_all_populations(&self) -> &[Float] {
        &self.f
    }

    pub fn get_node_behavior(&self, i: usize, j: usize) -> NodeBehavior {
        self.get_node_behavior_at(self.node_index(i, j))
    }

    pub(crate) fn get_node_behavior_at(&self, n: usize) -> NodeBehavior {
        match self.handles[n] {
            Some(handle) => *self.pool.get(handle),
            None => NodeBehavior::Inactive,
        }
    }

    /// Assigns the behavior of one cell. Each cell accepts a single assignment.
    pub fn set_node_behavior(&mut self, i: usize, j: usize, behavior: NodeBehavior) -> LbResult<()> {
        if i >= self.ni || j >= self.nj {
            return Err(LbError::NodeOutOfGrid {
                i,
                j,
                ni: self.ni,
                nj: self.nj,
            });
        }
        if let NodeBehavior::Periodic(relay) = behavior {
            let target = relay.get_target();
            if target.0 >= self.ni || target.1 >= self.nj {
                return Err(LbError::RelayTargetOutOfGrid { i, j, target });
            }
        }
        let n = self.node_index(i, j);
        if self.handles[n].is_some() {
            return Err(LbError::BehaviorAlreadyAssigned { i, j });
        }
        let handle = self
            .pool
            .allocate(behavior)
            .ok_or(LbError::PoolExhausted {
                capacity: self.pool.get_capacity(),
            })?;
        self.handles[n] = Some(handle);
        Ok(())
    }

    // -------------------------------------------------------------------------- streaming

    pub(crate) fn stream_directions(
        &mut self,
        i: usize,
        j: usize,
        directions: DirectionSet,
    ) -> LbResult<()> {
        let source = self.slot(i, j, 0);
        for k in directions.iter() {
            let target_i = i as isize + C[k][0] as isize;
            let target_j = j as isize + C[k][1] as isize;
            match self.bounds_policy {
                BoundsPolicy::Assert => debug_assert!(
                    self.contains(target_i, target_j),
                    "direction {k} of node ({i}, {j}) leaves the grid"
                ),
                BoundsPolicy::Checked => {
                    if !self.contains(target_i, target_j) {
                        return Err(LbError::StreamOutOfBounds {
                            i,
                            j,
                            k,
                            target: (target_i, target_j),
                        });
                    }
                }
            }
            let target = self.slot(target_i as usize, target_j as usize, k);
            self.f_tmp[target] = self.f[source + k];
        }
        Ok(())
    }

    pub fn stream_node(&mut self, i: usize, j: usize) -> LbResult<()> {
        let behavior = self.get_node_behavior(i, j);
        behavior.stream(self, i, j)
    }

    pub fn stream_region(&mut self, region: &Region) -> LbResult<()> {
        region
            .clip(self.ni, self.nj)
            .iter()
            .try_for_each(|(i, j)| self.stream_node(i, j))
    }

    /// Streams each region in turn. Regions may be listed in any order.
    pub fn stream_regions(&mut self, regions: &[Region]) -> LbResult<()> {
        regions
            .iter()
            .try_for_each(|region| self.stream_region(region))
    }

    /// Streams every node into the scratch buffer.
    pub fn stream(&mut self) -> LbResult<()> {
        self.stream_region(&Region::all(self.ni, self.nj))
    }

    /// Exchanges the current and scratch roles.
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.f, &mut self.f_tmp);
    }

    // ---------------------------------------------------------------- collision and bound

    pub fn collide_and_bound_node(
        &mut self,
        multiscale_map: &mut MultiscaleMap,
        collision_manager: &CollisionManager,
        i: usize,
        j: usize,
    ) {
        let behavior = self.get_node_behavior(i, j);
        behavior.collide_and_bound(self, multiscale_map, collision_manager, i, j);
    }

    pub fn collide_and_bound_region(
        &mut self,
        multiscale_map: &mut MultiscaleMap,
        collision_manager: &CollisionManager,
        region: &Region,
    ) {
        region.clip(self.ni, self.nj).iter().for_each(|(i, j)| {
            self.collide_and_bound_node(multiscale_map, collision_manager, i, j);
        });
    }

    pub fn collide_and_bound_regions(
        &mut self,
        multiscale_map: &mut MultiscaleMap,
        collision_manager: &CollisionManager,
        regions: &[Region],
    ) {
        regions.iter().for_each(|region| {
            self.collide_and_bound_region(multiscale_map, collision_manager, region);
        });
    }

    /// Collides every node in parallel, then applies the boundary corrections.
    pub fn collide_and_bound(
        &mut self,
        multiscale_map: &mut MultiscaleMap,
        collision_manager: &CollisionManager,
    ) {
        let handles = &self.handles;
        let pool = &self.pool;
        let (density, velocity, omega) = multiscale_map.get_fields_mut();
        self.f
            .par_chunks_mut(Q)
            .zip(omega.par_iter_mut())
            .enumerate()
            .filter(|(n, _)| handles[*n].is_some_and(|handle| !pool.get(handle).is_inactive()))
            .for_each(|(n, (f, omega))| {
                collision_manager.collide_populations(f, density[n], velocity[n], omega);
            });
        self.bound_region(&Region::all(self.ni, self.nj));
    }

    fn bound_region(&mut self, region: &Region) {
        region.iter().for_each(|(i, j)| {
            let behavior = self.get_node_behavior(i, j);
            if behavior.is_boundary() {
                behavior.bound(self, i, j);
            }
        });
    }

    /// Fills the relay and bounce-back slots from the current populations without
    /// colliding. Needed once before the first stream.
    pub fn prime_boundaries(&mut self) {
        println!("{}\n", "Priming boundary relays...".yellow());
        self.bound_region(&Region::all(self.ni, self.nj));
    }

    pub(crate) fn bounce_back(&mut self, i: usize, j: usize, orientation: Orientation) {
        let start = self.slot(i, j, 0);
        bc::compute_bounce_back(
            &self.f[start..start + Q],
            &mut self.f_tmp[start..start + Q],
            orientation,
        );
    }

    pub(crate) fn relay(&mut self, i: usize, j: usize, k: usize, destination: (usize, usize)) {
        let source = self.slot(i, j, k);
        let target = self.slot(destination.0, destination.1, k);
        self.f_tmp[target] = self.f[source];
    }

    /// Sum of all current populations of non-inactive nodes.
    pub fn compute_total_mass(&self) -> Float {
        self.f
            .par_chunks(Q)
            .enumerate()
            .filter(|(n, _)| !self.get_node_behavior_at(*n).is_inactive())
            .map(|(_, f)| f.iter().sum::<Float>())
            .sum::<Float>()
    }
}
