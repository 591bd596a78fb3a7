use std::fmt;

use utilities::OrdSet;

use crate::AutomataError;
use crate::Direction;
use crate::Node;
use crate::Nodes;
use crate::Result;
use crate::State;
use crate::StateClosedSet;
use crate::StateSet;
use crate::Symbol;

/// A single disjunctive transition entry: from the owning state under
/// `symbol` the automaton continues in some node of `destinations`, where a
/// node is interpreted conjunctively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AfaMove {
    pub symbol: Symbol,
    pub destinations: Nodes,
}

/// One entry of the inverse transition relation. When the current
/// configuration includes every state of `sharing_list`, each state of
/// `result_states` is a predecessor under the entry's symbol.
///
/// The sharing list is stored once, in the bucket of its minimal element,
/// regardless of how many states of the list it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseResult {
    pub result_states: StateSet,
    pub sharing_list: Node,
}

/// The inverse results of a single state under a single symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InverseMove {
    symbol: Symbol,
    results: Vec<InverseResult>,
}

/// An alternating finite automaton.
///
/// Transitions map a state and a symbol to a positive Boolean formula over
/// states, stored in disjunctive normal form as a set of conjunctive nodes.
/// Next to the forward relation an inverse relation is maintained (fed
/// through [Afa::add_inverse_trans]) that the backward predicate transformer
/// [Afa::pre_node] operates on. The two stores are independent; neither
/// links into the other.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Afa {
    transition_relation: Vec<Vec<AfaMove>>,
    inverse_relation: Vec<Vec<InverseMove>>,
    initial_states: StateSet,
    final_states: StateSet,
}

impl Afa {
    /// Creates an automaton without states.
    pub fn new() -> Afa {
        Afa::default()
    }

    /// Creates an automaton with the given number of states and no
    /// transitions.
    pub fn with_states(num_of_states: usize) -> Afa {
        Afa {
            transition_relation: vec![Vec::new(); num_of_states],
            inverse_relation: vec![Vec::new(); num_of_states],
            initial_states: StateSet::new(),
            final_states: StateSet::new(),
        }
    }

    /// Appends a fresh state and returns its identifier.
    pub fn add_state(&mut self) -> State {
        self.transition_relation.push(Vec::new());
        self.inverse_relation.push(Vec::new());
        self.transition_relation.len() - 1
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.transition_relation.len()
    }

    /// Marks the given state as initial.
    pub fn add_initial(&mut self, state: State) {
        debug_assert!(state < self.num_of_states(), "State {state} does not exist.");
        self.initial_states.insert(state);
    }

    /// Returns true iff the given state is initial.
    pub fn has_initial(&self, state: State) -> bool {
        self.initial_states.contains(&state)
    }

    /// Returns the set of initial states.
    pub fn initial_states(&self) -> &StateSet {
        &self.initial_states
    }

    /// Marks the given state as final.
    pub fn add_final(&mut self, state: State) {
        debug_assert!(state < self.num_of_states(), "State {state} does not exist.");
        self.final_states.insert(state);
    }

    /// Returns true iff the given state is final.
    pub fn has_final(&self, state: State) -> bool {
        self.final_states.contains(&state)
    }

    /// Returns the set of final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Returns the outgoing moves of the given state, sorted by symbol.
    pub fn moves(&self, state: State) -> &[AfaMove] {
        &self.transition_relation[state]
    }

    /// Adds the transition (src, symbol, destinations) to the forward
    /// relation.
    ///
    /// When a move under the symbol already exists the new destinations are
    /// folded into it through an upward closure, which discards redundant
    /// disjuncts: a destination node that is a superset of a stored one adds
    /// nothing, and stored nodes that become redundant are dropped. Adding
    /// the same transition twice therefore leaves the automaton unchanged.
    pub fn add_trans(&mut self, src: State, symbol: Symbol, destinations: Nodes) {
        debug_assert!(src < self.num_of_states(), "State {src} does not exist.");
        debug_assert!(
            destinations
                .iter()
                .flat_map(|node| node.iter())
                .all(|&state| state < self.num_of_states()),
            "Destination nodes reference a state that does not exist."
        );

        let (minimum, maximum) = self.domain();
        let moves = &mut self.transition_relation[src];

        match moves.binary_search_by_key(&symbol, |entry| entry.symbol) {
            Ok(position) => {
                let mut closure = StateClosedSet::from_nodes(
                    Direction::Upward,
                    minimum,
                    maximum,
                    moves[position].destinations.clone(),
                );
                closure.insert_all(destinations);
                moves[position].destinations = closure.into_antichain();
            }
            Err(position) => {
                moves.insert(position, AfaMove { symbol, destinations });
            }
        }
    }

    /// Adds the transition (src, symbol, destinations) to the inverse
    /// relation.
    ///
    /// Every destination node is recorded in the bucket of its minimal
    /// element: when the bucket already holds an inverse result whose
    /// sharing list equals the node, `src` joins its result states,
    /// otherwise a fresh inverse result is appended.
    pub fn add_inverse_trans(&mut self, src: State, symbol: Symbol, destinations: &Nodes) {
        debug_assert!(src < self.num_of_states(), "State {src} does not exist.");

        for node in destinations {
            let Some(&store_to) = node.first() else {
                continue;
            };
            debug_assert!(
                store_to < self.num_of_states(),
                "State {store_to} does not exist."
            );

            let buckets = &mut self.inverse_relation[store_to];
            match buckets.binary_search_by_key(&symbol, |entry| entry.symbol) {
                Ok(position) => {
                    let bucket = &mut buckets[position];
                    if let Some(result) = bucket
                        .results
                        .iter_mut()
                        .find(|result| result.sharing_list == *node)
                    {
                        result.result_states.insert(src);
                    } else {
                        bucket.results.push(InverseResult {
                            result_states: StateSet::singleton(src),
                            sharing_list: node.clone(),
                        });
                    }
                }
                Err(position) => {
                    buckets.insert(
                        position,
                        InverseMove {
                            symbol,
                            results: vec![InverseResult {
                                result_states: StateSet::singleton(src),
                                sharing_list: node.clone(),
                            }],
                        },
                    );
                }
            }
        }
    }

    /// Returns the destination nodes stored for (src, symbol), or the empty
    /// set when no such move exists.
    pub fn perform_trans(&self, src: State, symbol: Symbol) -> Result<Nodes> {
        self.check_state(src)?;

        match self.transition_relation[src]
            .binary_search_by_key(&symbol, |entry| entry.symbol)
        {
            Ok(position) => Ok(self.transition_relation[src][position].destinations.clone()),
            Err(_) => Ok(Nodes::new()),
        }
    }

    /// Returns the inverse results stored for (src, symbol), or an empty
    /// slice when no such bucket exists.
    pub fn perform_inverse_trans(&self, src: State, symbol: Symbol) -> Result<&[InverseResult]> {
        self.check_state(src)?;

        match self.inverse_relation[src].binary_search_by_key(&symbol, |entry| entry.symbol) {
            Ok(position) => Ok(&self.inverse_relation[src][position].results),
            Err(_) => Ok(&[]),
        }
    }

    /// Returns true iff every destination reachable from (src, symbol) is
    /// already covered by `destinations`.
    pub fn has_trans(&self, src: State, symbol: Symbol, destinations: &Nodes) -> Result<bool> {
        let stored = self.perform_trans(src, symbol)?;
        Ok(!stored.is_empty() && stored.is_subset_of(destinations))
    }

    /// Returns the number of moves in the forward relation.
    pub fn trans_size(&self) -> usize {
        self.transition_relation.iter().map(|moves| moves.len()).sum()
    }

    /// Returns true iff the automaton accepts the empty word, i.e. some
    /// state is both initial and final.
    pub fn accepts_epsilon(&self) -> bool {
        !self.initial_states.is_disjoint(&self.final_states)
    }

    /// The upward-closed set of all nodes containing an initial state.
    pub fn get_initial_nodes(&self) -> StateClosedSet {
        let (minimum, maximum) = self.domain();
        let mut result = StateClosedSet::new(Direction::Upward, minimum, maximum);
        for &state in &self.initial_states {
            result.insert_state(state);
        }
        result
    }

    /// The downward-closed set of all nodes avoiding every initial state.
    pub fn get_non_initial_nodes(&self) -> StateClosedSet {
        let (minimum, maximum) = self.domain();
        let node: Node = (0..self.num_of_states())
            .filter(|state| !self.has_initial(*state))
            .collect();
        StateClosedSet::from_node(Direction::Downward, minimum, maximum, node)
    }

    /// The downward-closed set of all nodes consisting of final states only.
    pub fn get_final_nodes(&self) -> StateClosedSet {
        let (minimum, maximum) = self.domain();
        StateClosedSet::from_node(
            Direction::Downward,
            minimum,
            maximum,
            self.final_states.clone(),
        )
    }

    /// The upward-closed set of all nodes containing a non-final state.
    pub fn get_non_final_nodes(&self) -> StateClosedSet {
        let (minimum, maximum) = self.domain();
        let mut result = StateClosedSet::new(Direction::Upward, minimum, maximum);
        for state in 0..self.num_of_states() {
            if !self.has_final(state) {
                result.insert_state(state);
            }
        }
        result
    }

    /// The set of nodes reachable from the given state in one step under the
    /// given symbol, as an upward-closed set.
    pub fn post_state(&self, state: State, symbol: Symbol) -> Result<StateClosedSet> {
        let destinations = self.perform_trans(state, symbol)?;
        let (minimum, maximum) = self.domain();

        Ok(StateClosedSet::from_nodes(
            Direction::Upward,
            minimum,
            maximum,
            destinations,
        ))
    }

    /// The set of nodes reachable from the given node in one step under the
    /// given symbol.
    ///
    /// Every state of a conjunctive configuration must take a step, so the
    /// result is the intersection of the per-state results. The empty node
    /// reaches only the empty node, whose upward closure is the set of all
    /// nodes.
    pub fn post_node(&self, node: &Node, symbol: Symbol) -> Result<StateClosedSet> {
        let (minimum, maximum) = self.domain();

        let mut states = node.iter();
        let Some(&first) = states.next() else {
            return Ok(StateClosedSet::from_node(
                Direction::Upward,
                minimum,
                maximum,
                Node::new(),
            ));
        };

        let mut result = self.post_state(first, symbol)?;
        for &state in states {
            result = result.intersection(&self.post_state(state, symbol)?);
        }

        Ok(result)
    }

    /// The set of nodes reachable from any of the given nodes in one step
    /// under the given symbol; the disjunctive union of [Afa::post_node].
    pub fn post_nodes(&self, nodes: &Nodes, symbol: Symbol) -> Result<StateClosedSet> {
        let (minimum, maximum) = self.domain();
        let mut result = StateClosedSet::new(Direction::Upward, minimum, maximum);

        for node in nodes {
            result.insert_all(self.post_node(node, symbol)?.into_antichain());
        }

        Ok(result)
    }

    /// [Afa::post_nodes] applied to the antichain of an upward-closed set.
    pub fn post_closed_set(&self, set: &StateClosedSet, symbol: Symbol) -> Result<StateClosedSet> {
        if set.direction() != Direction::Upward {
            return Err(AutomataError::DirectionMismatch {
                operation: "post",
                expected: Direction::Upward,
            });
        }

        self.post_nodes(set.antichain(), symbol)
    }

    /// The set of nodes reachable from the given node in one step under any
    /// symbol.
    ///
    /// Candidate symbols are taken from the move list of the minimal state
    /// of the node. This representative suffices because the result of
    /// [Afa::post_node] is the intersection over all states of the node: a
    /// symbol the minimal state cannot fire yields the empty intersection
    /// anyway.
    pub fn post_node_all(&self, node: &Node) -> Result<StateClosedSet> {
        let (minimum, maximum) = self.domain();

        let Some(&representative) = node.first() else {
            return Ok(StateClosedSet::from_node(
                Direction::Upward,
                minimum,
                maximum,
                Node::new(),
            ));
        };
        self.check_state(representative)?;

        let mut result = StateClosedSet::new(Direction::Upward, minimum, maximum);
        for entry in &self.transition_relation[representative] {
            result.insert_all(self.post_node(node, entry.symbol)?.into_antichain());
        }

        Ok(result)
    }

    /// The union of [Afa::post_node_all] over the given nodes.
    pub fn post_nodes_all(&self, nodes: &Nodes) -> Result<StateClosedSet> {
        let (minimum, maximum) = self.domain();
        let mut result = StateClosedSet::new(Direction::Upward, minimum, maximum);

        for node in nodes {
            result.insert_all(self.post_node_all(node)?.into_antichain());
        }

        Ok(result)
    }

    /// The forward predicate transformer on a whole closed set: the set of
    /// nodes reachable in one step under any symbol from any node of the
    /// set. Defined on upward-closed sets only.
    pub fn post(&self, set: &StateClosedSet) -> Result<StateClosedSet> {
        if set.direction() != Direction::Upward {
            return Err(AutomataError::DirectionMismatch {
                operation: "post",
                expected: Direction::Upward,
            });
        }

        self.post_nodes_all(set.antichain())
    }

    /// The set of nodes that reach the given node in one step under the
    /// given symbol, as a downward-closed set.
    ///
    /// An inverse result contributes its result states exactly when its
    /// sharing list, the conjunctive context of the transition it was
    /// derived from, is satisfied by the given node.
    pub fn pre_node(&self, node: &Node, symbol: Symbol) -> Result<StateClosedSet> {
        let mut predecessors = StateSet::new();

        for &state in node {
            for result in self.perform_inverse_trans(state, symbol)? {
                if result.sharing_list.is_subset_of(node) {
                    predecessors.insert_all(&result.result_states);
                }
            }
        }

        let (minimum, maximum) = self.domain();
        Ok(StateClosedSet::from_node(
            Direction::Downward,
            minimum,
            maximum,
            predecessors,
        ))
    }

    /// The union of [Afa::pre_node] over the given nodes.
    pub fn pre_nodes(&self, nodes: &Nodes, symbol: Symbol) -> Result<StateClosedSet> {
        let (minimum, maximum) = self.domain();
        let mut result = StateClosedSet::new(Direction::Downward, minimum, maximum);

        for node in nodes {
            result.insert_all(self.pre_node(node, symbol)?.into_antichain());
        }

        Ok(result)
    }

    /// [Afa::pre_nodes] applied to the antichain of a downward-closed set.
    pub fn pre_closed_set(&self, set: &StateClosedSet, symbol: Symbol) -> Result<StateClosedSet> {
        if set.direction() != Direction::Downward {
            return Err(AutomataError::DirectionMismatch {
                operation: "pre",
                expected: Direction::Downward,
            });
        }

        self.pre_nodes(set.antichain(), symbol)
    }

    /// The set of nodes that reach the given node in one step under any
    /// symbol.
    ///
    /// Unlike [Afa::post_node_all] a single representative state cannot
    /// enumerate the candidate symbols here: a sharing list is keyed at its
    /// own minimal element, which may be any member of the node, and the
    /// contributions are unioned rather than intersected. Candidate symbols
    /// are therefore collected from the inverse buckets of every state of
    /// the node.
    pub fn pre_node_all(&self, node: &Node) -> Result<StateClosedSet> {
        let (minimum, maximum) = self.domain();

        if node.is_empty() {
            return Ok(StateClosedSet::from_node(
                Direction::Downward,
                minimum,
                maximum,
                Node::new(),
            ));
        }

        let mut symbols: OrdSet<Symbol> = OrdSet::new();
        for &state in node {
            self.check_state(state)?;
            for entry in &self.inverse_relation[state] {
                symbols.insert(entry.symbol);
            }
        }

        let mut result = StateClosedSet::new(Direction::Downward, minimum, maximum);
        for &symbol in &symbols {
            result.insert_all(self.pre_node(node, symbol)?.into_antichain());
        }

        Ok(result)
    }

    /// The union of [Afa::pre_node_all] over the given nodes.
    pub fn pre_nodes_all(&self, nodes: &Nodes) -> Result<StateClosedSet> {
        let (minimum, maximum) = self.domain();
        let mut result = StateClosedSet::new(Direction::Downward, minimum, maximum);

        for node in nodes {
            result.insert_all(self.pre_node_all(node)?.into_antichain());
        }

        Ok(result)
    }

    /// The backward predicate transformer on a whole closed set: the set of
    /// nodes reaching, in one step under any symbol, some node of the set.
    /// Defined on downward-closed sets only.
    pub fn pre(&self, set: &StateClosedSet) -> Result<StateClosedSet> {
        if set.direction() != Direction::Downward {
            return Err(AutomataError::DirectionMismatch {
                operation: "pre",
                expected: Direction::Downward,
            });
        }

        self.pre_nodes_all(set.antichain())
    }

    /// The state domain for closed sets over this automaton. The upper bound
    /// saturates at zero so that transformers on an automaton without states
    /// operate on empty closed sets instead of wrapping around.
    pub(crate) fn domain(&self) -> (State, State) {
        (0, self.num_of_states().saturating_sub(1))
    }

    fn check_state(&self, state: State) -> Result<()> {
        if state >= self.num_of_states() {
            return Err(AutomataError::StateOutOfBounds {
                state,
                num_of_states: self.num_of_states(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Afa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        writeln!(f, "Number of initial states: {}", self.initial_states.len())?;
        writeln!(f, "Number of final states: {}", self.final_states.len())?;
        write!(f, "Number of moves: {}", self.trans_size())
    }
}

impl fmt::Debug for Afa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;
        writeln!(f, "Initial states: {:?}", self.initial_states)?;
        writeln!(f, "Final states: {:?}", self.final_states)?;

        for (from, moves) in self.transition_relation.iter().enumerate() {
            for entry in moves {
                writeln!(f, "{from} --[{}]-> {:?}", entry.symbol, entry.destinations)?;
            }
        }

        Ok(())
    }
}

/// Computes the union of two automata. Not implemented.
pub fn union(_lhs: &Afa, _rhs: &Afa) -> Result<Afa> {
    Err(AutomataError::Unimplemented("union"))
}

/// Reverses the automaton. Not implemented.
pub fn revert(_aut: &Afa) -> Result<Afa> {
    Err(AutomataError::Unimplemented("revert"))
}

/// Removes the given epsilon symbol from the automaton. Not implemented.
pub fn remove_epsilon(_aut: &Afa, _epsilon: Symbol) -> Result<Afa> {
    Err(AutomataError::Unimplemented("remove_epsilon"))
}

/// Minimizes the automaton. Not implemented.
pub fn minimize(_aut: &Afa) -> Result<Afa> {
    Err(AutomataError::Unimplemented("minimize"))
}

/// Completes the automaton over the given alphabet with a sink state. Not
/// implemented.
pub fn make_complete(_aut: &mut Afa, _alphabet: &[Symbol], _sink: State) -> Result<()> {
    Err(AutomataError::Unimplemented("make_complete"))
}

/// Decides language emptiness and produces a counterexample word. Not
/// implemented; [crate::forward_emptiness_closure] and its siblings give
/// the verdict without a counterexample.
pub fn is_lang_empty_cex(_aut: &Afa) -> Result<(bool, Vec<Symbol>)> {
    Err(AutomataError::Unimplemented("is_lang_empty_cex"))
}

/// Decides membership of the given word. Not implemented.
pub fn is_in_lang(_aut: &Afa, _word: &[Symbol]) -> Result<bool> {
    Err(AutomataError::Unimplemented("is_in_lang"))
}

/// Decides whether some prefix of the given word is accepted. Not
/// implemented.
pub fn is_prfx_in_lang(_aut: &Afa, _word: &[Symbol]) -> Result<bool> {
    Err(AutomataError::Unimplemented("is_prfx_in_lang"))
}

/// Decides whether the automaton is deterministic. Not implemented.
pub fn is_deterministic(_aut: &Afa) -> Result<bool> {
    Err(AutomataError::Unimplemented("is_deterministic"))
}

/// Decides whether the automaton is complete over the given alphabet. Not
/// implemented.
pub fn is_complete(_aut: &Afa, _alphabet: &[Symbol]) -> Result<bool> {
    Err(AutomataError::Unimplemented("is_complete"))
}

/// Decides whether the state sets of the two automata are disjoint. Not
/// implemented.
pub fn are_state_disjoint(_lhs: &Afa, _rhs: &Afa) -> Result<bool> {
    Err(AutomataError::Unimplemented("are_state_disjoint"))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn node(states: &[State]) -> Node {
        Node::from_vec(states.to_vec())
    }

    fn nodes(groups: &[&[State]]) -> Nodes {
        groups.iter().map(|states| node(states)).collect()
    }

    #[test]
    fn test_add_trans_round_trip() {
        let mut afa = Afa::with_states(3);
        afa.add_trans(0, 0, nodes(&[&[1, 2]]));

        let stored = afa.perform_trans(0, 0).unwrap();
        assert!(stored.contains(&node(&[1, 2])));

        // The upward closure of the stored destinations covers the added node.
        let closed = afa.post_state(0, 0).unwrap();
        assert!(closed.contains(&node(&[1, 2])));
        assert!(closed.contains(&node(&[0, 1, 2])));
    }

    #[test]
    fn test_add_trans_is_idempotent() {
        let mut first = Afa::with_states(3);
        first.add_trans(0, 0, nodes(&[&[1]]));

        let mut second = Afa::with_states(3);
        second.add_trans(0, 0, nodes(&[&[1]]));
        second.add_trans(0, 0, nodes(&[&[1]]));

        assert_eq!(first, second);
    }

    #[test]
    fn test_add_trans_discards_redundant_disjunct() {
        let mut afa = Afa::with_states(3);
        afa.add_trans(0, 0, nodes(&[&[1]]));
        afa.add_trans(0, 0, nodes(&[&[1, 2]]));

        let stored = afa.perform_trans(0, 0).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored.contains(&node(&[1])));
    }

    #[test]
    fn test_inverse_results_share_the_witness() {
        let mut afa = Afa::with_states(3);
        let destinations = nodes(&[&[1, 2]]);
        afa.add_inverse_trans(0, 0, &destinations);
        afa.add_inverse_trans(2, 0, &destinations);

        // Both sources share a single inverse result stored at state 1, the
        // minimum of the destination node.
        let results = afa.perform_inverse_trans(1, 0).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sharing_list, node(&[1, 2]));
        assert_eq!(results[0].result_states.as_slice(), &[0, 2]);

        assert!(afa.perform_inverse_trans(2, 0).unwrap().is_empty());
    }

    #[test]
    fn test_post_node_intersects_over_states() {
        let mut afa = Afa::with_states(4);
        afa.add_trans(0, 0, nodes(&[&[2]]));
        afa.add_trans(1, 0, nodes(&[&[3]]));

        let result = afa.post_node(&node(&[0, 1]), 0).unwrap();

        // Both states step, so both destinations are required.
        assert!(result.contains(&node(&[2, 3])));
        assert!(!result.contains(&node(&[2])));
        assert!(!result.contains(&node(&[3])));
    }

    #[test]
    fn test_post_node_empty_configuration() {
        let afa = Afa::with_states(2);
        let result = afa.post_node(&Node::new(), 0).unwrap();

        assert!(result.contains(&Node::new()));
        assert!(result.contains(&node(&[1])));
    }

    #[test]
    fn test_post_node_without_move_is_empty() {
        let mut afa = Afa::with_states(2);
        afa.add_trans(0, 0, nodes(&[&[1]]));

        // State 1 has no move under symbol 0, so the conjunction fails.
        let result = afa.post_node(&node(&[0, 1]), 0).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_pre_node_respects_sharing_list() {
        let mut afa = Afa::with_states(3);
        let destinations = nodes(&[&[1, 2]]);
        afa.add_trans(0, 0, destinations.clone());
        afa.add_inverse_trans(0, 0, &destinations);

        // The sharing list {1, 2} is satisfied by {1, 2} but not by {1}.
        let satisfied = afa.pre_node(&node(&[1, 2]), 0).unwrap();
        assert!(satisfied.contains(&node(&[0])));

        let unsatisfied = afa.pre_node(&node(&[1]), 0).unwrap();
        assert!(!unsatisfied.contains(&node(&[0])));
    }

    #[test]
    fn test_post_monotone_in_the_node() {
        let mut afa = Afa::with_states(4);
        afa.add_trans(0, 0, nodes(&[&[2]]));
        afa.add_trans(1, 0, nodes(&[&[3]]));

        let small = afa.post_node(&node(&[0]), 0).unwrap();
        let large = afa.post_node(&node(&[0, 1]), 0).unwrap();

        // A larger conjunctive configuration reaches fewer nodes.
        assert!(large.is_included_in(&small));
    }

    #[test]
    fn test_post_direction_mismatch() {
        let afa = Afa::with_states(1);
        let downward = afa.get_final_nodes();

        assert_eq!(
            afa.post(&downward),
            Err(AutomataError::DirectionMismatch {
                operation: "post",
                expected: Direction::Upward,
            })
        );
    }

    #[test]
    fn test_pre_direction_mismatch() {
        let afa = Afa::with_states(1);
        let upward = afa.get_initial_nodes();

        assert_eq!(
            afa.pre(&upward),
            Err(AutomataError::DirectionMismatch {
                operation: "pre",
                expected: Direction::Downward,
            })
        );
    }

    #[test]
    fn test_post_state_out_of_bounds() {
        let afa = Afa::with_states(1);

        assert_eq!(
            afa.post_state(1, 0),
            Err(AutomataError::StateOutOfBounds {
                state: 1,
                num_of_states: 1,
            })
        );
    }

    #[test]
    fn test_unimplemented_operations_signal() {
        let afa = Afa::with_states(1);

        assert_eq!(minimize(&afa), Err(AutomataError::Unimplemented("minimize")));
        assert_eq!(
            is_in_lang(&afa, &[0]),
            Err(AutomataError::Unimplemented("is_in_lang"))
        );
        assert_eq!(revert(&afa), Err(AutomataError::Unimplemented("revert")));
    }

    #[test]
    fn test_accepts_epsilon() {
        let mut afa = Afa::with_states(2);
        afa.add_initial(0);
        afa.add_final(1);
        assert!(!afa.accepts_epsilon());

        afa.add_final(0);
        assert!(afa.accepts_epsilon());
    }

    #[test]
    fn test_membership_closed_sets() {
        let mut afa = Afa::with_states(3);
        afa.add_initial(0);
        afa.add_final(2);

        let initial = afa.get_initial_nodes();
        assert!(initial.contains(&node(&[0])));
        assert!(initial.contains(&node(&[0, 1])));
        assert!(!initial.contains(&node(&[1])));

        let final_nodes = afa.get_final_nodes();
        assert!(final_nodes.contains(&node(&[2])));
        assert!(!final_nodes.contains(&node(&[1, 2])));

        let non_final = afa.get_non_final_nodes();
        assert!(non_final.contains(&node(&[0, 2])));
        assert!(!non_final.contains(&node(&[2])));

        let non_initial = afa.get_non_initial_nodes();
        assert!(non_initial.contains(&node(&[1, 2])));
        assert!(!non_initial.contains(&node(&[0])));
    }
}
