// Property-based tests for subset construction and minimization.
//
// Random epsilon NFAs over {a, b} are checked against the DFAs built from
// them. Inputs may contain `c`, which is outside every alphabet used here.

use determinize::{minimize, run_dfa, simulate_nfa, subset_construction, Automaton, Label, NFA};
use proptest::prelude::*;

// ============================================================================
// GENERATORS
// ============================================================================

/// Generate NFAs with up to 6 states, epsilon moves included.
fn arb_nfa() -> impl Strategy<Value = NFA<u8, char>> {
	(1u8..=6)
		.prop_flat_map(|n| {
			let label = prop_oneof![
				1 => Just(Label::Epsilon),
				2 => Just(Label::Symbol('a')),
				2 => Just(Label::Symbol('b')),
			];
			(
				Just(n),
				prop::collection::vec((0..n, label, 0..n), 0..16),
				prop::collection::vec(0..n, 0..4),
			)
		})
		.prop_map(|(n, transitions, accepting)| {
			NFA::from_parts(0..n, vec!['a', 'b'], transitions, 0, accepting)
				.expect("generated NFA is well formed")
		})
}

/// Generate input words, occasionally with a symbol outside the alphabet.
fn arb_input() -> impl Strategy<Value = Vec<char>> {
	prop::collection::vec(
		prop_oneof![
			8 => Just('a'),
			8 => Just('b'),
			1 => Just('c'),
		],
		0..10,
	)
}

// ============================================================================
// LANGUAGE EQUIVALENCE
// ============================================================================

proptest! {
	#[test]
	fn subset_construction_preserves_language(nfa in arb_nfa(), inputs in prop::collection::vec(arb_input(), 1..16)) {
		let dfa = subset_construction(&nfa);
		for input in &inputs {
			prop_assert_eq!(simulate_nfa(&nfa, input), run_dfa(&dfa, input), "input {:?}", input);
		}
	}

	#[test]
	fn minimization_preserves_language(nfa in arb_nfa(), inputs in prop::collection::vec(arb_input(), 1..16)) {
		let dfa = subset_construction(&nfa);
		let minimal = minimize(&dfa);
		for input in &inputs {
			prop_assert_eq!(run_dfa(&dfa, input), run_dfa(&minimal, input), "input {:?}", input);
		}
	}
}

// ============================================================================
// STRUCTURE
// ============================================================================

proptest! {
	#[test]
	fn minimization_is_idempotent(nfa in arb_nfa()) {
		let once = minimize(&subset_construction(&nfa));
		let twice = minimize(&once);
		prop_assert_eq!(once.num_states(), twice.num_states());
	}

	#[test]
	fn minimization_never_grows(nfa in arb_nfa()) {
		let dfa = subset_construction(&nfa);
		let minimal = minimize(&dfa);
		prop_assert!(minimal.num_states() <= dfa.reachable_states().len());
		prop_assert_eq!(dfa.is_empty(), minimal.is_empty());
	}

	#[test]
	fn construction_is_deterministic(nfa in arb_nfa()) {
		let first = subset_construction(&nfa);
		let second = subset_construction(&nfa);
		prop_assert_eq!(&first, &second);
		prop_assert_eq!(minimize(&first), minimize(&second));
	}

	#[test]
	fn dfa_states_are_closed_subsets(nfa in arb_nfa()) {
		let dfa = subset_construction(&nfa);
		prop_assert_eq!(dfa.num_states(), dfa.reachable_states().len(), "unreachable subset built");
		for state in dfa.states() {
			prop_assert!(!state.is_empty());
			prop_assert_eq!(state, &nfa.epsilon_closure(state), "subset not epsilon closed");
			let accepts = state.any(|s| nfa.is_accepting(s));
			prop_assert_eq!(accepts, dfa.is_accepting(state));
		}
	}
}
