use super::bc::{self, Orientation};
use super::{CollisionManager, Lattice, MultiscaleMap};
use crate::prelude_crate::*;

// ------------------------------------------------------------------ STRUCT: PeriodicRelay

/// Wraparound data of a periodic node: the node on the opposite edge and the directions
/// whose post-collision populations are sent there instead of being streamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicRelay {
    target: (usize, usize),
    directions: DirectionSet,
    wall: Option<Orientation>,
}

impl PeriodicRelay {
    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// let relay = PeriodicRelay::new((39, 4), &[3, 6, 7]);
    ///
    /// assert_eq!(relay.get_target(), (39, 4));
    /// assert_eq!(relay.get_relayed_directions().len(), 3);
    /// assert_eq!(relay.get_wall(), None);
    /// ```
    pub fn new(target: (usize, usize), directions: &[usize]) -> Self {
        PeriodicRelay {
            target,
            directions: DirectionSet::from_slice(directions),
            wall: None,
        }
    }

    /// A periodic node that also bounds a wall, as at the corners of a channel.
    /// Directions crossing the wall are bounced back rather than relayed.
    pub fn with_wall(self, orientation: Orientation) -> Self {
        PeriodicRelay {
            wall: Some(orientation),
            ..self
        }
    }

    pub fn get_target(&self) -> (usize, usize) {
        self.target
    }

    pub fn get_wall(&self) -> Option<Orientation> {
        self.wall
    }

    pub fn get_relayed_directions(&self) -> DirectionSet {
        match self.wall {
            Some(orientation) => self
                .directions
                .difference(DirectionSet::from_slice(&orientation.get_solid_directions())),
            None => self.directions,
        }
    }

    fn get_streamed_directions(&self) -> DirectionSet {
        let streamed = match self.wall {
            Some(orientation) => orientation.get_streamed_directions(),
            None => DirectionSet::ALL,
        };
        streamed.difference(self.directions)
    }
}

// ------------------------------------------------------------------- ENUM: NodeBehavior

/// Per-cell streaming pattern and boundary treatment. Assigned once at setup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NodeBehavior {
    #[default]
    Inactive,
    Active,
    Wall(Orientation),
    Periodic(PeriodicRelay),
}

pub use NodeBehavior::*;

impl NodeBehavior {
    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// assert_eq!(NodeBehavior::Active.get_streamed_directions().len(), 9);
    /// assert_eq!(NodeBehavior::Inactive.get_streamed_directions().len(), 0);
    ///
    /// let wall = NodeBehavior::Wall(Orientation::West);
    /// assert!(!wall.get_streamed_directions().contains(5));
    /// assert!(wall.get_streamed_directions().contains(0));
    /// ```
    pub fn get_streamed_directions(&self) -> DirectionSet {
        match self {
            Inactive => DirectionSet::EMPTY,
            Active => DirectionSet::ALL,
            Wall(orientation) => orientation.get_streamed_directions(),
            Periodic(relay) => relay.get_streamed_directions(),
        }
    }

    pub fn is_inactive(&self) -> bool {
        matches!(self, Inactive)
    }

    /// Whether a correction follows collision.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Wall(_) | Periodic(_))
    }

    pub fn stream(&self, lattice: &mut Lattice, i: usize, j: usize) -> LbResult<()> {
        match self {
            Inactive => Ok(()),
            _ => lattice.stream_directions(i, j, self.get_streamed_directions()),
        }
    }

    pub fn collide_and_bound(
        &self,
        lattice: &mut Lattice,
        multiscale_map: &mut MultiscaleMap,
        collision_manager: &CollisionManager,
        i: usize,
        j: usize,
    ) {
        if self.is_inactive() {
            return;
        }
        collision_manager.collide(lattice, multiscale_map, i, j);
        self.bound(lattice, i, j);
    }

    /// Boundary correction alone, applied to the current populations of the node.
    pub fn bound(&self, lattice: &mut Lattice, i: usize, j: usize) {
        match self {
            Inactive | Active => {}
            Wall(orientation) => lattice.bounce_back(i, j, *orientation),
            Periodic(relay) => {
                if let Some(orientation) = relay.get_wall() {
                    lattice.bounce_back(i, j, orientation);
                }
                relay.get_relayed_directions().iter().for_each(|k| {
                    let destination =
                        bc::relay_destination((i, j), k, relay.get_target(), lattice.get_n());
                    lattice.relay(i, j, k, destination);
                });
            }
        }
    }
}

// ------------------------------------------------------------- STRUCT: NodeBehaviorPool

/// Index of a behavior stored in a [`NodeBehaviorPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u32);

impl NodeHandle {
    pub fn get_index(&self) -> usize {
        self.0 as usize
    }
}

/// Fixed-capacity arena of node behaviors, filled during setup.
#[derive(Debug)]
pub struct NodeBehaviorPool {
    behaviors: Vec<NodeBehavior>,
    capacity: usize,
}

impl NodeBehaviorPool {
    pub fn with_capacity(capacity: usize) -> Self {
        NodeBehaviorPool {
            behaviors: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Stores a behavior, or returns `None` once the capacity is used up.
    ///
    /// # Examples
    /// ```
    /// # use lbflow2d::prelude::*;
    /// let mut pool = NodeBehaviorPool::with_capacity(1);
    ///
    /// let handle = pool.allocate(NodeBehavior::Active).unwrap();
    /// assert!(pool.allocate(NodeBehavior::Active).is_none());
    /// assert_eq!(pool.get(handle), &NodeBehavior::Active);
    /// ```
    pub fn allocate(&mut self, behavior: NodeBehavior) -> Option<NodeHandle> {
        if self.behaviors.len() >= self.capacity {
            return None;
        }
        let index = u32::try_from(self.behaviors.len()).ok()?;
        self.behaviors.push(behavior);
        Some(NodeHandle(index))
    }

    pub fn get(&self, handle: NodeHandle) -> &NodeBehavior {
        &self.behaviors[handle.get_index()]
    }

    pub fn get_capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn get_remaining(&self) -> usize {
        self.capacity - self.behaviors.len()
    }

    /// Bytes reserved for the whole pool.
    pub fn footprint(&self) -> usize {
        self.capacity * max_node_behavior_size()
    }
}

pub const fn max_node_behavior_size() -> usize {
    std::mem::size_of::<NodeBehavior>()
}
