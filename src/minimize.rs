//! DFA minimization by partition refinement.
//!
//! States that cannot be reached from the start are dropped first. The
//! remaining states start out split into accepting and non-accepting blocks;
//! each round then regroups states by their signature, which is their current
//! block together with the block each alphabet symbol leads to (or the lack of
//! a transition). Rounds repeat until the number of blocks stops growing.

use super::{dfa, Automaton, StateSet, DFA};
use log::{debug, trace};
use std::{collections::BTreeMap, fmt};

/// Index of a block in the current partition.
type Block = usize;

/// Block of a state followed by the destination block for every alphabet symbol.
type Signature = (Block, Vec<Option<Block>>);

/// Computes the minimal DFA accepting the same language as `dfa`.
///
/// Every state of the result is the set of equivalent reachable states it
/// replaces. The input is left untouched.
pub fn minimize<S, I>(dfa: &DFA<S, I>) -> DFA<StateSet<S>, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	let states: Vec<&S> = dfa.reachable_states().into_iter().collect();
	let index: BTreeMap<&S, usize> = states.iter().enumerate().map(|(i, &s)| (s, i)).collect();
	trace!(
		"Pruned {} unreachable states",
		dfa.num_states() - states.len()
	);

	// successor index per state and alphabet symbol
	let successors: Vec<Vec<Option<usize>>> = states
		.iter()
		.map(|&state| {
			dfa.alphabet()
				.iter()
				.map(|symbol| dfa.transition(state, symbol).map(|next| index[next]))
				.collect()
		})
		.collect();

	let (mut partition, mut blocks) = renumber(
		states
			.iter()
			.map(|&state| (Block::from(dfa.is_accepting(state)), Vec::new())),
	);
	trace!("Initial partition has {} blocks", blocks);

	let mut rounds = 0;
	loop {
		rounds += 1;
		assert!(
			rounds <= states.len() + 1,
			"partition refinement did not converge within {} rounds",
			states.len()
		);

		let signatures = partition.iter().zip(&successors).map(|(&block, next)| {
			let targets: Vec<Option<Block>> =
				next.iter().map(|n| n.map(|n| partition[n])).collect();
			(block, targets)
		});
		let (refined, count) = renumber(signatures);
		trace!("Refinement round {} split {} blocks into {}", rounds, blocks, count);

		partition = refined;
		if count == blocks {
			break;
		}
		blocks = count;
	}

	let start = index[dfa.start()];
	quotient(dfa, &states, start, &successors, &partition, blocks)
}

/// Gives every distinct signature a block number, in order of first appearance.
fn renumber<T>(signatures: T) -> (Vec<Block>, usize)
where
	T: IntoIterator<Item = Signature>,
{
	let mut ids = BTreeMap::new();
	let partition = signatures
		.into_iter()
		.map(|signature| {
			let next = ids.len();
			*ids.entry(signature).or_insert(next)
		})
		.collect();
	(partition, ids.len())
}

/// Builds the DFA whose states are the blocks of `partition`.
fn quotient<S, I>(
	dfa: &DFA<S, I>,
	states: &[&S],
	start: usize,
	successors: &[Vec<Option<usize>>],
	partition: &[Block],
	blocks: usize,
) -> DFA<StateSet<S>, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	let mut members = vec![StateSet::new(); blocks];
	let mut representatives = vec![None; blocks];
	for (i, (&state, &block)) in states.iter().zip(partition).enumerate() {
		members[block].insert(state.clone());
		representatives[block].get_or_insert(i);
	}

	let mut result = BTreeMap::new();
	for (block, representative) in representatives.into_iter().enumerate() {
		let representative = match representative {
			Some(i) => i,
			None => continue,
		};
		let transitions = dfa
			.alphabet()
			.iter()
			.zip(&successors[representative])
			.filter_map(|(symbol, next)| {
				next.map(|next| (symbol.clone(), members[partition[next]].clone()))
			})
			.collect();
		let accepts = members[block].any(|state| dfa.is_accepting(state));
		result.insert(members[block].clone(), dfa::State::new(accepts, transitions));
	}

	let start = members[partition[start]].clone();
	debug!(
		"Minimized DFA from {} to {} states",
		dfa.num_states(),
		result.len()
	);
	DFA::assemble(start, dfa.alphabet().clone(), result)
}
