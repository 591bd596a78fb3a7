use ahash::AHashMap;
use log::trace;
use utilities::SynchronizedIterator;

use crate::Move;
use crate::Nfa;
use crate::State;
use crate::StateSet;
use crate::Symbol;
use crate::EPSILON;

/// Maps pairs of operand states to the product state allocated for them.
pub type ProductMap = AHashMap<(State, State), State>;

/// Computes an NFA whose language is the intersection of the languages of
/// `lhs` and `rhs`.
///
/// When `preserve_epsilon` holds, the product additionally carries an
/// epsilon transition for every epsilon transition of either operand, paired
/// with the unchanged state of the other operand.
pub fn intersection(lhs: &Nfa, rhs: &Nfa, preserve_epsilon: bool) -> Nfa {
    intersection_with_product_map(lhs, rhs, preserve_epsilon).0
}

/// As [intersection], additionally returning the map from operand state
/// pairs to the product states discovered for them.
pub fn intersection_with_product_map(
    lhs: &Nfa,
    rhs: &Nfa,
    preserve_epsilon: bool,
) -> (Nfa, ProductMap) {
    let mut product = Nfa::new();
    let mut product_map = ProductMap::default();

    // Pairs of operand states whose outgoing moves still have to be explored.
    let mut pairs_to_process: Vec<(State, State)> = Vec::new();

    for &lhs_initial in lhs.initial_states() {
        for &rhs_initial in rhs.initial_states() {
            let product_state = product.add_state();
            product_map.insert((lhs_initial, rhs_initial), product_state);
            pairs_to_process.push((lhs_initial, rhs_initial));

            product.add_initial(product_state);
            if lhs.has_final(lhs_initial) && rhs.has_final(rhs_initial) {
                product.add_final(product_state);
            }
        }
    }

    while let Some((lhs_state, rhs_state)) = pairs_to_process.pop() {
        let product_state = product_map[&(lhs_state, rhs_state)];
        trace!("Processing pair ({lhs_state}, {rhs_state}) as product state {product_state}");

        // The classic product step: pair up the moves of both operand states
        // that share a symbol and expand the Cartesian product of their
        // target sets.
        let mut synchronized = SynchronizedIterator::new(|entry: &Move| entry.symbol);
        synchronized.push(lhs.moves(lhs_state).as_slice());
        synchronized.push(rhs.moves(rhs_state).as_slice());

        while let Some(group) = synchronized.next_group() {
            debug_assert_eq!(group.len(), 2, "One move per operand state.");

            let symbol = group[0].symbol;
            let mut targets = StateSet::new();
            for &lhs_target in &group[0].targets {
                for &rhs_target in &group[1].targets {
                    targets.insert(create_product_state(
                        &mut product,
                        &mut product_map,
                        &mut pairs_to_process,
                        lhs,
                        rhs,
                        lhs_target,
                        rhs_target,
                    ));
                }
            }

            add_product_move(&mut product, product_state, symbol, &targets);
        }

        if preserve_epsilon {
            // An epsilon move can only be the last entry of a sorted move
            // list, since epsilon sorts after every ordinary symbol.
            if let Some(last) = lhs.moves(lhs_state).last() {
                if last.symbol == EPSILON {
                    let mut targets = StateSet::new();
                    for &lhs_target in &last.targets {
                        targets.insert(create_product_state(
                            &mut product,
                            &mut product_map,
                            &mut pairs_to_process,
                            lhs,
                            rhs,
                            lhs_target,
                            rhs_state,
                        ));
                    }

                    add_product_move(&mut product, product_state, EPSILON, &targets);
                }
            }

            if let Some(last) = rhs.moves(rhs_state).last() {
                if last.symbol == EPSILON {
                    let mut targets = StateSet::new();
                    for &rhs_target in &last.targets {
                        targets.insert(create_product_state(
                            &mut product,
                            &mut product_map,
                            &mut pairs_to_process,
                            lhs,
                            rhs,
                            lhs_state,
                            rhs_target,
                        ));
                    }

                    add_product_move(&mut product, product_state, EPSILON, &targets);
                }
            }
        }
    }

    (product, product_map)
}

/// Returns the product state for the given pair of operand states,
/// allocating it and scheduling the pair for exploration when the pair is
/// encountered for the first time.
fn create_product_state(
    product: &mut Nfa,
    product_map: &mut ProductMap,
    pairs_to_process: &mut Vec<(State, State)>,
    lhs: &Nfa,
    rhs: &Nfa,
    lhs_target: State,
    rhs_target: State,
) -> State {
    if let Some(&existing) = product_map.get(&(lhs_target, rhs_target)) {
        return existing;
    }

    let product_state = product.add_state();
    product_map.insert((lhs_target, rhs_target), product_state);
    pairs_to_process.push((lhs_target, rhs_target));

    if lhs.has_final(lhs_target) && rhs.has_final(rhs_target) {
        product.add_final(product_state);
    }

    product_state
}

/// Adds the discovered targets to the product's move under the given symbol,
/// merging with targets discovered earlier for the same symbol.
fn add_product_move(product: &mut Nfa, source: State, symbol: Symbol, targets: &StateSet) {
    if targets.is_empty() {
        return;
    }

    product.moves_mut(source).insert_targets(symbol, targets);
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::random_nfa;

    /// Word membership by stepping through subsets, used as the oracle for
    /// the product construction. Only correct for automata without epsilon
    /// transitions.
    fn accepts(nfa: &Nfa, word: &[Symbol]) -> bool {
        let mut current: StateSet = nfa.initial_states().clone();

        for &symbol in word {
            let mut next = StateSet::new();
            for &state in &current {
                if let Some(entry) = nfa.moves(state).find(symbol) {
                    next.insert_all(&entry.targets);
                }
            }
            current = next;
        }

        current.iter().any(|&state| nfa.has_final(state))
    }

    /// All words over `0..num_of_symbols` up to the given length.
    fn words(num_of_symbols: usize, max_len: usize) -> Vec<Vec<Symbol>> {
        let mut result: Vec<Vec<Symbol>> = vec![Vec::new()];
        let mut previous: Vec<Vec<Symbol>> = vec![Vec::new()];

        for _ in 0..max_len {
            let mut next = Vec::new();
            for word in &previous {
                for symbol in 0..num_of_symbols {
                    let mut extended = word.clone();
                    extended.push(symbol);
                    next.push(extended);
                }
            }
            result.extend(next.iter().cloned());
            previous = next;
        }

        result
    }

    #[test]
    fn test_product_shared_symbol() {
        let mut lhs = Nfa::with_states(2);
        lhs.add_initial(0);
        lhs.add_final(1);
        lhs.add_trans(0, 0, 1);

        let mut rhs = Nfa::with_states(2);
        rhs.add_initial(0);
        rhs.add_final(1);
        rhs.add_trans(0, 0, 1);

        let (product, product_map) = intersection_with_product_map(&lhs, &rhs, false);

        assert_eq!(product.num_of_states(), 2);
        assert_eq!(product.initial_states().len(), 1);
        assert_eq!(product.final_states().len(), 1);

        let initial = product_map[&(0, 0)];
        let target = product_map[&(1, 1)];
        assert!(product.has_initial(initial));
        assert!(product.has_final(target));
        assert_eq!(
            product.moves(initial).find(0).unwrap().targets.as_slice(),
            &[target]
        );
    }

    #[test]
    fn test_product_no_shared_symbol() {
        let mut lhs = Nfa::with_states(2);
        lhs.add_initial(0);
        lhs.add_final(1);
        lhs.add_trans(0, 0, 1);

        let mut rhs = Nfa::with_states(2);
        rhs.add_initial(0);
        rhs.add_final(1);
        rhs.add_trans(0, 1, 1);

        let product = intersection(&lhs, &rhs, false);

        assert_eq!(product.num_of_states(), 1);
        assert_eq!(product.initial_states().len(), 1);
        assert!(product.final_states().is_empty());
        assert_eq!(product.num_of_moves(), 0);
    }

    #[test]
    fn test_product_preserves_epsilon() {
        let mut lhs = Nfa::with_states(2);
        lhs.add_initial(0);
        lhs.add_final(1);
        lhs.add_trans(0, EPSILON, 1);

        let mut rhs = Nfa::with_states(1);
        rhs.add_initial(0);
        rhs.add_final(0);

        let (product, product_map) = intersection_with_product_map(&lhs, &rhs, true);

        assert_eq!(product.num_of_states(), 2);
        let initial = product_map[&(0, 0)];
        let target = product_map[&(1, 0)];

        assert!(product.has_initial(initial));
        assert!(product.has_final(target));
        assert_eq!(
            product.moves(initial).find(EPSILON).unwrap().targets.as_slice(),
            &[target]
        );
    }

    #[test]
    fn test_product_finality_matches_components() {
        let lhs = random_nfa(8, 2, 3);
        let rhs = random_nfa(8, 2, 3);

        let (product, product_map) = intersection_with_product_map(&lhs, &rhs, false);

        for ((lhs_state, rhs_state), product_state) in &product_map {
            assert_eq!(
                product.has_final(*product_state),
                lhs.has_final(*lhs_state) && rhs.has_final(*rhs_state)
            );
        }
    }

    #[test]
    fn test_random_product_against_word_oracle() {
        for _ in 0..10 {
            let lhs = random_nfa(5, 2, 3);
            let rhs = random_nfa(5, 2, 3);

            let product = intersection(&lhs, &rhs, false);

            for word in words(2, 4) {
                assert_eq!(
                    accepts(&product, &word),
                    accepts(&lhs, &word) && accepts(&rhs, &word),
                    "Product disagrees with the operands on {word:?}\nlhs: {lhs:?}\nrhs: {rhs:?}\nproduct: {product:?}"
                );
            }
        }
    }

    #[test]
    fn test_product_move_lists_sorted() {
        let lhs = random_nfa(6, 3, 3);
        let rhs = random_nfa(6, 3, 3);

        let product = intersection(&lhs, &rhs, false);

        for state in 0..product.num_of_states() {
            let symbols: Vec<Symbol> =
                product.moves(state).iter().map(|entry| entry.symbol).collect();
            assert!(
                symbols.windows(2).all(|pair| pair[0] < pair[1]),
                "Move list of {state} is not strictly sorted: {symbols:?}"
            );
        }
    }
}
