use super::{closure, Automaton, StateSet, DFA, NFA};
use log::trace;
use std::fmt;

/// Runs an NFA on a sequence of inputs.
///
/// Tracks the full set of active states, following epsilon transitions after
/// every step. Rejects as soon as the active set becomes empty.
pub fn simulate_nfa<'a, S, I, V>(nfa: &NFA<S, I>, inputs: V) -> bool
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug + 'a,
	V: IntoIterator<Item = &'a I>,
{
	let mut current = closure::epsilon_closure(nfa, &StateSet::singleton(nfa.start().clone()));
	for input in inputs {
		current = closure::epsilon_closure(nfa, &closure::move_on_symbol(nfa, &current, input));
		if current.is_empty() {
			trace!("NFA has no active state after {:?}", input);
			return false;
		}
	}
	current.any(|state| nfa.is_accepting(state))
}

/// Runs a DFA on a sequence of inputs.
///
/// Rejects as soon as a symbol is outside of the alphabet or the current state
/// has no transition on it.
pub fn run_dfa<'a, S, I, V>(dfa: &DFA<S, I>, inputs: V) -> bool
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug + 'a,
	V: IntoIterator<Item = &'a I>,
{
	let mut current = dfa.start();
	for input in inputs {
		if !dfa.alphabet().contains(input) {
			trace!("Symbol {:?} is not part of the alphabet", input);
			return false;
		}
		match dfa.transition(current, input) {
			Some(next) => current = next,
			None => {
				trace!("DFA state {:?} has no transition on {:?}", current, input);
				return false;
			}
		}
	}
	dfa.is_accepting(current)
}
