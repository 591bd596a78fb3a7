use rand::Rng;

use crate::Afa;
use crate::Nfa;
use crate::Node;
use crate::Nodes;

/// Generates an NFA with the desired number of states and symbols, where
/// every state has up to `outdegree` outgoing transitions. State 0 is
/// initial and every state is final with one-in-four probability. The
/// outdegree must be at least one.
pub fn random_nfa(num_of_states: usize, num_of_symbols: usize, outdegree: usize) -> Nfa {
    debug_assert!(outdegree > 0, "The outdegree must be at least one.");

    let mut nfa = Nfa::with_states(num_of_states);
    nfa.add_initial(0);

    let mut rng = rand::thread_rng();

    for state in 0..num_of_states {
        if rng.gen_ratio(1, 4) {
            nfa.add_final(state);
        }

        for _ in 0..rng.gen_range(0..outdegree) {
            let symbol = rng.gen_range(0..num_of_symbols);
            let target = rng.gen_range(0..num_of_states);
            nfa.add_trans(state, symbol, target);
        }
    }

    nfa
}

/// Generates an AFA with the desired number of states and symbols, where
/// every state has up to `outdegree` moves whose destinations are small
/// random sets of conjunctive nodes. Both the forward and the inverse
/// relation are populated. State 0 is initial and every state is final with
/// one-in-four probability. The outdegree must be at least one.
pub fn random_afa(num_of_states: usize, num_of_symbols: usize, outdegree: usize) -> Afa {
    debug_assert!(outdegree > 0, "The outdegree must be at least one.");

    let mut afa = Afa::with_states(num_of_states);
    afa.add_initial(0);

    let mut rng = rand::thread_rng();

    for state in 0..num_of_states {
        if rng.gen_ratio(1, 4) {
            afa.add_final(state);
        }

        for _ in 0..rng.gen_range(0..outdegree) {
            let symbol = rng.gen_range(0..num_of_symbols);

            let mut destinations = Nodes::new();
            for _ in 0..rng.gen_range(1..3) {
                let mut node = Node::new();
                for _ in 0..rng.gen_range(1..3) {
                    node.insert(rng.gen_range(0..num_of_states));
                }
                destinations.insert(node);
            }

            afa.add_trans(state, symbol, destinations.clone());
            afa.add_inverse_trans(state, symbol, &destinations);
        }
    }

    afa
}
