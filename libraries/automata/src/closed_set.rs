use std::fmt;

use utilities::OrdSet;

use crate::State;

/// A conjunctive configuration of an alternating automaton: the set of
/// states that must all be reached.
pub type Node = OrdSet<State>;

/// A disjunctive set of conjunctive configurations.
pub type Nodes = OrdSet<Node>;

/// The closure direction of a [StateClosedSet].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Upward,
    Downward,
}

/// An upward- or downward-closed set of nodes over the state domain
/// `[minimum, maximum]`, represented by the antichain of its minimal
/// (respectively maximal) elements.
///
/// An upward-closed set contains every node that has some antichain element
/// as a subset; a downward-closed set contains every node that is a subset
/// of some antichain element. The antichain is kept canonical: no element is
/// comparable to another under set inclusion.
#[derive(Clone, PartialEq, Eq)]
pub struct StateClosedSet {
    direction: Direction,
    minimum: State,
    maximum: State,
    antichain: Nodes,
}

impl StateClosedSet {
    /// Creates an empty closed set over the given state domain.
    pub fn new(direction: Direction, minimum: State, maximum: State) -> StateClosedSet {
        StateClosedSet {
            direction,
            minimum,
            maximum,
            antichain: Nodes::new(),
        }
    }

    /// Creates the closure of a single node.
    pub fn from_node(
        direction: Direction,
        minimum: State,
        maximum: State,
        node: Node,
    ) -> StateClosedSet {
        let mut result = StateClosedSet::new(direction, minimum, maximum);
        result.insert(node);
        result
    }

    /// Creates the closure of a set of nodes, reducing it to its antichain.
    pub fn from_nodes(
        direction: Direction,
        minimum: State,
        maximum: State,
        nodes: Nodes,
    ) -> StateClosedSet {
        let mut result = StateClosedSet::new(direction, minimum, maximum);
        result.insert_all(nodes);
        result
    }

    /// Returns the closure direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the antichain representing this closed set.
    pub fn antichain(&self) -> &Nodes {
        &self.antichain
    }

    /// Consumes the closed set and returns its antichain.
    pub fn into_antichain(self) -> Nodes {
        self.antichain
    }

    /// Returns true iff the closed set contains no node at all.
    pub fn is_empty(&self) -> bool {
        self.antichain.is_empty()
    }

    /// Inserts the closure of the given node.
    ///
    /// The node is discarded when it is already covered by an antichain
    /// element; otherwise every antichain element that the new node covers is
    /// removed. Inserting the empty node into an upward-closed set therefore
    /// absorbs the whole antichain and makes the set contain every node.
    pub fn insert(&mut self, node: Node) {
        debug_assert!(
            node.iter().all(|&state| self.minimum <= state && state <= self.maximum),
            "Node {node:?} exceeds the domain [{}, {}].",
            self.minimum,
            self.maximum
        );

        match self.direction {
            Direction::Upward => {
                if self
                    .antichain
                    .iter()
                    .any(|existing| existing.is_subset_of(&node))
                {
                    return;
                }

                self.antichain.retain(|existing| !node.is_subset_of(existing));
                self.antichain.insert(node);
            }
            Direction::Downward => {
                if self
                    .antichain
                    .iter()
                    .any(|existing| node.is_subset_of(existing))
                {
                    return;
                }

                self.antichain.retain(|existing| !existing.is_subset_of(&node));
                self.antichain.insert(node);
            }
        }

        debug_assert!(self.is_antichain(), "The antichain is not canonical.");
    }

    /// Inserts the closure of the singleton node of the given state.
    pub fn insert_state(&mut self, state: State) {
        self.insert(Node::singleton(state));
    }

    /// Inserts the closure of every node in the given set.
    pub fn insert_all(&mut self, nodes: Nodes) {
        for node in nodes {
            self.insert(node);
        }
    }

    /// Returns the union of two closed sets of the same direction.
    pub fn union(&self, other: &StateClosedSet) -> StateClosedSet {
        debug_assert_eq!(
            self.direction, other.direction,
            "Union requires matching closure directions."
        );

        let mut result = self.clone();
        result.insert_all(other.antichain.clone());
        result
    }

    /// Returns the intersection of two closed sets of the same direction.
    ///
    /// For upward-closed sets the intersection is generated by the pairwise
    /// unions of the antichain elements; for downward-closed sets by their
    /// pairwise intersections.
    pub fn intersection(&self, other: &StateClosedSet) -> StateClosedSet {
        debug_assert_eq!(
            self.direction, other.direction,
            "Intersection requires matching closure directions."
        );

        let mut result = StateClosedSet::new(self.direction, self.minimum, self.maximum);
        for lhs in &self.antichain {
            for rhs in &other.antichain {
                match self.direction {
                    Direction::Upward => result.insert(lhs.union(rhs)),
                    Direction::Downward => result.insert(lhs.intersection(rhs)),
                }
            }
        }

        result
    }

    /// Returns true iff the closed set contains the given node.
    pub fn contains(&self, node: &Node) -> bool {
        match self.direction {
            Direction::Upward => self
                .antichain
                .iter()
                .any(|existing| existing.is_subset_of(node)),
            Direction::Downward => self
                .antichain
                .iter()
                .any(|existing| node.is_subset_of(existing)),
        }
    }

    /// Returns true iff every node of this closed set belongs to `other`.
    pub fn is_included_in(&self, other: &StateClosedSet) -> bool {
        debug_assert_eq!(
            self.direction, other.direction,
            "Inclusion requires matching closure directions."
        );

        self.antichain.iter().all(|node| other.contains(node))
    }

    fn is_antichain(&self) -> bool {
        self.antichain.iter().all(|lhs| {
            self.antichain
                .iter()
                .filter(|rhs| lhs != *rhs)
                .all(|rhs| !lhs.is_subset_of(rhs) && !rhs.is_subset_of(lhs))
        })
    }
}

impl fmt::Debug for StateClosedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} closure of {:?}", self.direction, self.antichain)
    }
}
