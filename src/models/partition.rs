//! Target partition and depot types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Point, Target};

/// One of the two tour sides.
///
/// Every target in the working set is assigned to exactly one side; each
/// side's tour starts and ends at that side's depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The side served from depot A.
    A,
    /// The side served from depot B.
    B,
}

impl Side {
    /// Returns the opposite side.
    pub fn other(&self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// The two fixed depots, one per side.
///
/// # Examples
///
/// ```
/// use bitour::models::{Depots, Point, Side};
///
/// let depots = Depots::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
/// assert_eq!(depots.get(Side::B), Point::new(10.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Depots {
    a: Point,
    b: Point,
}

impl Depots {
    /// Creates the depot pair.
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Depot A.
    pub fn a(&self) -> Point {
        self.a
    }

    /// Depot B.
    pub fn b(&self) -> Point {
        self.b
    }

    /// Depot of the given side.
    pub fn get(&self, side: Side) -> Point {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }
}

/// A two-sided assignment of targets to depots.
///
/// The two sides are disjoint by target id and their union is the working
/// set. The sequence order within a side carries no meaning; tours are
/// expressed as permutations over a side elsewhere.
///
/// # Examples
///
/// ```
/// use bitour::models::{Partition, Side, Target};
///
/// let partition = Partition::new(
///     vec![Target::new(0, 1.0, 0.0)],
///     vec![Target::new(1, 9.0, 0.0)],
/// )
/// .unwrap();
/// assert_eq!(partition.side(Side::A).len(), 1);
/// assert_eq!(partition.total_targets(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    side_a: Vec<Target>,
    side_b: Vec<Target>,
}

impl Partition {
    /// Creates a partition from the two side sequences.
    ///
    /// Returns `None` if any target id appears more than once across both
    /// sides.
    pub fn new(side_a: Vec<Target>, side_b: Vec<Target>) -> Option<Self> {
        let mut seen = HashSet::with_capacity(side_a.len() + side_b.len());
        for target in side_a.iter().chain(side_b.iter()) {
            if !seen.insert(target.id()) {
                return None;
            }
        }
        Some(Self { side_a, side_b })
    }

    /// Assigns every target to the side of its nearer depot.
    ///
    /// Ties go to side A.
    pub fn nearest_depot(targets: &[Target], depots: &Depots) -> Self {
        let mut side_a = Vec::new();
        let mut side_b = Vec::new();
        for &target in targets {
            if target.distance_to(&depots.a()) <= target.distance_to(&depots.b()) {
                side_a.push(target);
            } else {
                side_b.push(target);
            }
        }
        Self { side_a, side_b }
    }

    /// Targets assigned to the given side.
    pub fn side(&self, side: Side) -> &[Target] {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    /// Total number of targets across both sides.
    pub fn total_targets(&self) -> usize {
        self.side_a.len() + self.side_b.len()
    }

    /// Returns `true` if both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.side_a.is_empty() && self.side_b.is_empty()
    }

    /// Moves the target at `index` from one side to the end of the other.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for the `from` side.
    pub fn relocate(&mut self, from: Side, index: usize) {
        let target = match from {
            Side::A => self.side_a.remove(index),
            Side::B => self.side_b.remove(index),
        };
        match from {
            Side::A => self.side_b.push(target),
            Side::B => self.side_a.push(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets() -> Vec<Target> {
        vec![
            Target::new(0, 1.0, 0.0),
            Target::new(1, 2.0, 0.0),
            Target::new(2, 9.0, 0.0),
        ]
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
    }

    #[test]
    fn test_depots_get() {
        let depots = Depots::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(depots.get(Side::A), depots.a());
        assert_eq!(depots.get(Side::B), depots.b());
    }

    #[test]
    fn test_partition_new_disjoint() {
        let p = Partition::new(
            vec![Target::new(0, 1.0, 0.0)],
            vec![Target::new(1, 2.0, 0.0)],
        );
        assert!(p.is_some());
    }

    #[test]
    fn test_partition_new_rejects_duplicate_id() {
        let p = Partition::new(
            vec![Target::new(0, 1.0, 0.0)],
            vec![Target::new(0, 2.0, 0.0)],
        );
        assert!(p.is_none());
    }

    #[test]
    fn test_partition_new_rejects_duplicate_within_side() {
        let p = Partition::new(
            vec![Target::new(0, 1.0, 0.0), Target::new(0, 2.0, 0.0)],
            vec![],
        );
        assert!(p.is_none());
    }

    #[test]
    fn test_nearest_depot_assignment() {
        let depots = Depots::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let partition = Partition::nearest_depot(&targets(), &depots);
        assert_eq!(partition.side(Side::A).len(), 2);
        assert_eq!(partition.side(Side::B).len(), 1);
        assert_eq!(partition.side(Side::B)[0].id(), 2);
    }

    #[test]
    fn test_nearest_depot_tie_goes_to_a() {
        let depots = Depots::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let partition = Partition::nearest_depot(&[Target::new(0, 5.0, 0.0)], &depots);
        assert_eq!(partition.side(Side::A).len(), 1);
        assert!(partition.side(Side::B).is_empty());
    }

    #[test]
    fn test_relocate_moves_target() {
        let mut partition = Partition::new(targets(), vec![]).expect("disjoint");
        partition.relocate(Side::A, 1);
        assert_eq!(partition.side(Side::A).len(), 2);
        assert_eq!(partition.side(Side::B).len(), 1);
        assert_eq!(partition.side(Side::B)[0].id(), 1);
        assert_eq!(partition.total_targets(), 3);
    }

    #[test]
    fn test_relocate_round_trip() {
        let mut partition = Partition::new(targets(), vec![]).expect("disjoint");
        partition.relocate(Side::A, 0);
        partition.relocate(Side::B, 0);
        assert_eq!(partition.side(Side::A).len(), 3);
        assert!(partition.side(Side::B).is_empty());
    }

    #[test]
    fn test_empty_partition() {
        let partition = Partition::new(vec![], vec![]).expect("disjoint");
        assert!(partition.is_empty());
        assert_eq!(partition.total_targets(), 0);
    }
}
