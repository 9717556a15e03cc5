use super::{StateSet, NFA};
use log::trace;
use std::fmt;

/// Computes the epsilon closure of a set of NFA states.
///
/// The result is the smallest superset of `states` that is closed under epsilon
/// transitions. Every state is pushed onto the work stack at most once.
pub fn epsilon_closure<S, I>(nfa: &NFA<S, I>, states: &StateSet<S>) -> StateSet<S>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	let mut closure = states.clone();
	let mut stack: Vec<&S> = states.iter().collect();

	while let Some(state) = stack.pop() {
		if let Some(targets) = nfa.epsilon_targets(state) {
			for next in targets {
				if closure.insert(next.clone()) {
					stack.push(next);
				}
			}
		}
	}

	trace!("Epsilon closure of {:?} is {:?}", states, closure);
	closure
}

/// Computes the set of NFA states reachable from `states` by consuming exactly one `symbol`.
/// Epsilon transitions are not followed; the result may be empty.
pub fn move_on_symbol<S, I>(nfa: &NFA<S, I>, states: &StateSet<S>, symbol: &I) -> StateSet<S>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	states
		.iter()
		.filter_map(|state| nfa.targets(state, symbol))
		.flatten()
		.cloned()
		.collect()
}
