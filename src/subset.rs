use super::{closure, dfa, Automaton, StateSet, DFA, NFA};
use log::{debug, trace};
use std::{
	collections::{BTreeMap, BTreeSet},
	convert::TryFrom,
	fmt,
};

/// Converts an NFA into an equivalent DFA using the powerset construction.
///
/// Each DFA state is the canonical set of NFA states it stands for, starting
/// at the epsilon closure of the NFA start state. Only subsets reachable from
/// the start are discovered. A symbol whose target set is empty gets no
/// transition, so the resulting transition function is partial.
///
/// Symbols are visited in alphabet order and the work stack is owned by this
/// function, so the same NFA always yields the same DFA.
pub fn subset_construction<S, I>(nfa: &NFA<S, I>) -> DFA<StateSet<S>, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	// at most 2^n subsets of n states
	let bound = u32::try_from(nfa.num_states())
		.ok()
		.and_then(|n| 1usize.checked_shl(n))
		.unwrap_or(usize::MAX);

	let start = closure::epsilon_closure(nfa, &StateSet::singleton(nfa.start().clone()));
	let mut states = BTreeMap::new();
	let mut visited = BTreeSet::new();
	let mut worklist = vec![start.clone()];
	visited.insert(start.clone());

	while let Some(current) = worklist.pop() {
		let mut transitions = BTreeMap::new();
		for symbol in nfa.alphabet() {
			let target =
				closure::epsilon_closure(nfa, &closure::move_on_symbol(nfa, &current, symbol));
			if target.is_empty() {
				continue;
			}
			if visited.insert(target.clone()) {
				trace!("Discovered DFA state {:?}", target);
				assert!(
					visited.len() <= bound,
					"subset construction discovered more than 2^{} states",
					nfa.num_states()
				);
				worklist.push(target.clone());
			}
			transitions.insert(symbol.clone(), target);
		}
		let accepts = current.any(|state| nfa.is_accepting(state));
		states.insert(current, dfa::State::new(accepts, transitions));
	}

	debug!(
		"Subset construction turned {} NFA states into {} DFA states",
		nfa.num_states(),
		states.len()
	);
	DFA::assemble(start, nfa.alphabet().clone(), states)
}
