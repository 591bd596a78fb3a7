use ahash::AHashSet;
use log::debug;
use log::trace;

use crate::Afa;
use crate::Direction;
use crate::Node;
use crate::Result;
use crate::StateClosedSet;

/// Decides language emptiness with the forward antichain fixed point,
/// recomputing the one-step image of the whole reachable set every round.
///
/// The reachable set grows monotonically and the antichains over a finite
/// state set form a well-quasi-order, so the iteration stabilises. The
/// automaton is non-empty as soon as the reachable set escapes the goal
/// region of nodes containing a non-final state.
pub fn forward_emptiness_closure(aut: &Afa) -> Result<bool> {
    let goal = aut.get_non_final_nodes();
    let (minimum, maximum) = aut.domain();
    let mut current = StateClosedSet::new(Direction::Upward, minimum, maximum);
    let mut next = aut.get_initial_nodes();

    while current != next {
        current = next;
        next = current.union(&aut.post(&current)?);
        debug!("Reachable antichain has {} nodes", next.antichain().len());

        if !next.is_included_in(&goal) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Decides language emptiness in the forward direction, processing one
/// reachable node at a time instead of closing the whole set every round.
pub fn forward_emptiness_worklist(aut: &Afa) -> Result<bool> {
    let goal = aut.get_non_final_nodes();
    let mut result = aut.get_initial_nodes();

    let mut processed: AHashSet<Node> = AHashSet::new();
    let mut worklist: Vec<Node> = result.antichain().iter().cloned().collect();

    if !result.is_included_in(&goal) {
        return Ok(false);
    }

    while let Some(current) = worklist.pop() {
        trace!("Processing node {current:?}");

        let post_current = aut.post_node_all(&current)?;
        result = result.union(&post_current);

        for node in post_current.antichain() {
            if !goal.contains(node) {
                return Ok(false);
            }
            if !processed.contains(node) {
                worklist.push(node.clone());
            }
        }

        processed.insert(current);
    }

    Ok(true)
}

/// Decides language emptiness with the backward antichain fixed point: the
/// mirror of [forward_emptiness_closure] that grows the terminating set
/// with the backward transformer and checks it against the goal region of
/// nodes avoiding every initial state.
pub fn backward_emptiness_closure(aut: &Afa) -> Result<bool> {
    let goal = aut.get_non_initial_nodes();
    let (minimum, maximum) = aut.domain();
    let mut current = StateClosedSet::new(Direction::Downward, minimum, maximum);
    let mut next = aut.get_final_nodes();

    while current != next {
        current = next;
        next = current.union(&aut.pre(&current)?);
        debug!("Terminating antichain has {} nodes", next.antichain().len());

        if !next.is_included_in(&goal) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Decides language emptiness in the backward direction, processing one
/// terminating node at a time.
pub fn backward_emptiness_worklist(aut: &Afa) -> Result<bool> {
    let goal = aut.get_non_initial_nodes();
    let mut result = aut.get_final_nodes();

    let mut processed: AHashSet<Node> = AHashSet::new();
    let mut worklist: Vec<Node> = result.antichain().iter().cloned().collect();

    if !result.is_included_in(&goal) {
        return Ok(false);
    }

    while let Some(current) = worklist.pop() {
        trace!("Processing node {current:?}");

        let pre_current = aut.pre_node_all(&current)?;
        result = result.union(&pre_current);

        for node in pre_current.antichain() {
            if !goal.contains(node) {
                return Ok(false);
            }
            if !processed.contains(node) {
                worklist.push(node.clone());
            }
        }

        processed.insert(current);
    }

    Ok(true)
}
