use std::fmt;

use utilities::OrdSet;

/// The identifier of a state, dense within its automaton.
pub type State = usize;

/// The identifier of a symbol.
pub type Symbol = usize;

/// The distinguished silent transition symbol. It compares greater than
/// every ordinary symbol, so in a sorted move list the epsilon entry is
/// always the last one.
pub const EPSILON: Symbol = Symbol::MAX;

/// A set of states kept in ascending order.
pub type StateSet = OrdSet<State>;

/// The states reachable from some source state under a single symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub symbol: Symbol,
    pub targets: StateSet,
}

/// The outgoing moves of a single state, sorted by symbol with at most one
/// entry per symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Returns the move under the given symbol, if any.
    pub fn find(&self, symbol: Symbol) -> Option<&Move> {
        match self.moves.binary_search_by_key(&symbol, |entry| entry.symbol) {
            Ok(position) => Some(&self.moves[position]),
            Err(_) => None,
        }
    }

    /// Adds a single target state under the given symbol.
    pub fn insert(&mut self, symbol: Symbol, target: State) {
        match self.moves.binary_search_by_key(&symbol, |entry| entry.symbol) {
            Ok(position) => {
                self.moves[position].targets.insert(target);
            }
            Err(position) => {
                self.moves.insert(
                    position,
                    Move {
                        symbol,
                        targets: StateSet::singleton(target),
                    },
                );
            }
        }
    }

    /// Unions the given target states into the move under the given symbol,
    /// creating the move when it does not exist yet.
    pub fn insert_targets(&mut self, symbol: Symbol, targets: &StateSet) {
        match self.moves.binary_search_by_key(&symbol, |entry| entry.symbol) {
            Ok(position) => {
                self.moves[position].targets.insert_all(targets);
            }
            Err(position) => {
                self.moves.insert(
                    position,
                    Move {
                        symbol,
                        targets: targets.clone(),
                    },
                );
            }
        }
    }

    /// Returns the move with the largest symbol. Since epsilon sorts after
    /// every ordinary symbol, an epsilon move can only be this entry.
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Returns an iterator over the moves in ascending symbol order.
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Returns the underlying symbol-sorted slice of moves.
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the number of moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true iff the state has no outgoing moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// A nondeterministic finite automaton. States are allocated densely with
/// [Nfa::add_state]; membership of the initial and final sets is tracked
/// separately from the transition relation.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Nfa {
    transition_relation: Vec<MoveList>,
    initial_states: StateSet,
    final_states: StateSet,
}

impl Nfa {
    /// Creates an automaton without states.
    pub fn new() -> Nfa {
        Nfa::default()
    }

    /// Creates an automaton with the given number of states and no
    /// transitions.
    pub fn with_states(num_of_states: usize) -> Nfa {
        Nfa {
            transition_relation: vec![MoveList::default(); num_of_states],
            initial_states: StateSet::new(),
            final_states: StateSet::new(),
        }
    }

    /// Appends a fresh state and returns its identifier.
    pub fn add_state(&mut self) -> State {
        self.transition_relation.push(MoveList::default());
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

    /// Adds a transition from `src` to `target` under `symbol`. Repeated
    /// insertion of the same transition has no effect.
    pub fn add_trans(&mut self, src: State, symbol: Symbol, target: State) {
        debug_assert!(src < self.num_of_states(), "State {src} does not exist.");
        debug_assert!(
            target < self.num_of_states(),
            "State {target} does not exist."
        );

        self.transition_relation[src].insert(symbol, target);
    }

    /// Returns the move list of the given state.
    pub fn moves(&self, state: State) -> &MoveList {
        &self.transition_relation[state]
    }

    pub(crate) fn moves_mut(&mut self, state: State) -> &mut MoveList {
        &mut self.transition_relation[state]
    }

    /// Returns the number of transitions, counting one per move entry.
    pub fn num_of_moves(&self) -> usize {
        self.transition_relation.iter().map(|moves| moves.len()).sum()
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        writeln!(f, "Number of initial states: {}", self.initial_states.len())?;
        writeln!(f, "Number of final states: {}", self.final_states.len())?;
        write!(f, "Number of moves: {}", self.num_of_moves())
    }
}

impl fmt::Debug for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;
        writeln!(f, "Initial states: {:?}", self.initial_states)?;
        writeln!(f, "Final states: {:?}", self.final_states)?;

        for (from, moves) in self.transition_relation.iter().enumerate() {
            for entry in moves.iter() {
                if entry.symbol == EPSILON {
                    writeln!(f, "{from} --[epsilon]-> {:?}", entry.targets)?;
                } else {
                    writeln!(f, "{from} --[{}]-> {:?}", entry.symbol, entry.targets)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_list_sorted_by_symbol() {
        let mut moves = MoveList::default();
        moves.insert(3, 0);
        moves.insert(1, 1);
        moves.insert(EPSILON, 2);
        moves.insert(1, 0);

        let symbols: Vec<Symbol> = moves.iter().map(|entry| entry.symbol).collect();
        assert_eq!(symbols, vec![1, 3, EPSILON]);

        // Repeated symbols are merged into a single entry.
        assert_eq!(moves.find(1).unwrap().targets.as_slice(), &[0, 1]);
        assert_eq!(moves.last().unwrap().symbol, EPSILON);
    }

    #[test]
    fn test_add_trans_is_idempotent() {
        let mut nfa = Nfa::with_states(2);
        nfa.add_trans(0, 0, 1);
        nfa.add_trans(0, 0, 1);

        assert_eq!(nfa.num_of_moves(), 1);
        assert_eq!(nfa.moves(0).find(0).unwrap().targets.as_slice(), &[1]);
    }

    #[test]
    fn test_membership_sets() {
        let mut nfa = Nfa::new();
        let first = nfa.add_state();
        let second = nfa.add_state();

        nfa.add_initial(first);
        nfa.add_final(second);

        assert!(nfa.has_initial(first));
        assert!(!nfa.has_initial(second));
        assert!(nfa.has_final(second));
        assert!(!nfa.has_final(first));
    }
}
