use super::{minimize, simulate, Alphabet, Automaton, AutomatonError, StateSet};
use serde::Deserialize;
use std::{
	collections::{btree_map::Entry, BTreeMap, BTreeSet},
	convert::TryFrom,
	fmt,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
	default,
	deny_unknown_fields,
	bound(deserialize = "S: Deserialize<'de>, I: Deserialize<'de> + Ord")
)]
pub(crate) struct State<S, I>
where
	I: Ord,
{
	accepts: bool,
	transitions: BTreeMap<I, S>,
}

impl<S, I> State<S, I>
where
	I: Ord,
{
	pub(crate) fn new(accepts: bool, transitions: BTreeMap<I, S>) -> Self {
		Self {
			accepts,
			transitions,
		}
	}
}

impl<S, I> Default for State<S, I>
where
	I: Ord,
{
	fn default() -> Self {
		Self::new(false, BTreeMap::new())
	}
}

/// Raw automaton definition, validated before it becomes a [`DFA`].
#[derive(Deserialize)]
#[serde(
	deny_unknown_fields,
	bound(deserialize = "S: Deserialize<'de> + Ord, I: Deserialize<'de> + Ord")
)]
struct Definition<S, I>
where
	S: Ord,
	I: Ord,
{
	start: S,
	alphabet: Alphabet<I>,
	states: BTreeMap<S, State<S, I>>,
}

/// A deterministic finite state automaton.
///
/// The transition function may be partial: a missing transition rejects the
/// input. States, accepting states and transitions are iterated in ascending
/// order, which is the order rendering and tabular views receive them in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
	try_from = "Definition<S, I>",
	bound(
		deserialize = "S: Deserialize<'de> + Clone + Ord + fmt::Debug, I: Deserialize<'de> + Clone + Ord + fmt::Debug"
	)
)]
pub struct DFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	start: S,
	alphabet: Alphabet<I>,
	states: BTreeMap<S, State<S, I>>,
}

impl<S, I> DFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	/// Creates a new DFA from its components.
	///
	/// Returns an error if the start state, an accepting state or a transition
	/// endpoint is not part of `states`, if a transition symbol is not part of
	/// `alphabet`, or if a state has two different destinations on one symbol.
	pub fn from_parts<V, A, T, F>(
		states: V,
		alphabet: A,
		transitions: T,
		start: S,
		accepting: F,
	) -> Result<Self, AutomatonError<S, I>>
	where
		V: IntoIterator<Item = S>,
		A: IntoIterator<Item = I>,
		T: IntoIterator<Item = (S, I, S)>,
		F: IntoIterator<Item = S>,
	{
		let mut builder = Builder::new();
		for id in states {
			builder.add_state(id, false);
		}
		for symbol in alphabet {
			builder.add_symbol(symbol);
		}
		for id in accepting {
			match builder.states.get_mut(&id) {
				Some(state) => state.accepts = true,
				None => return Err(AutomatonError::UndeclaredAccepting(id)),
			}
		}
		let alphabet = builder.alphabet.clone();
		for (prev, input, next) in transitions {
			if !alphabet.contains(&input) {
				return Err(AutomatonError::UnknownSymbol(input));
			}
			builder.add_transition(prev, input, next)?;
		}
		builder.build(start)
	}

	fn checked(
		start: S,
		alphabet: Alphabet<I>,
		states: BTreeMap<S, State<S, I>>,
	) -> Result<Self, AutomatonError<S, I>> {
		if !states.contains_key(&start) {
			return Err(AutomatonError::UndeclaredStart(start));
		}
		for state in states.values() {
			for (symbol, next) in &state.transitions {
				if !alphabet.contains(symbol) {
					return Err(AutomatonError::UnknownSymbol(symbol.clone()));
				}
				if !states.contains_key(next) {
					return Err(AutomatonError::InexistentState(next.clone()));
				}
			}
		}
		Ok(Self {
			start,
			alphabet,
			states,
		})
	}

	/// Creates a DFA from parts that are valid by construction.
	pub(crate) fn assemble(
		start: S,
		alphabet: Alphabet<I>,
		states: BTreeMap<S, State<S, I>>,
	) -> Self {
		let dfa = Self {
			start,
			alphabet,
			states,
		};
		debug_assert!(
			Self::checked(dfa.start.clone(), dfa.alphabet.clone(), dfa.states.clone()).is_ok(),
			"assembled DFA is malformed"
		);
		dfa
	}

	/// Iterates over all states in ascending order.
	pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
		self.states.keys()
	}

	/// Iterates over the accepting states in ascending order.
	pub fn accepting_states(&self) -> impl Iterator<Item = &S> + '_ {
		self.states
			.iter()
			.filter(|(_, state)| state.accepts)
			.map(|(id, _)| id)
	}

	/// Returns the destination of a state on a symbol.
	/// Returns None if the state is inexistent or has no such transition.
	pub fn transition(&self, id: &S, symbol: &I) -> Option<&S> {
		self.states.get(id)?.transitions.get(symbol)
	}

	/// Iterates over the outgoing transitions of a state ordered by symbol.
	pub fn transitions_from<'a>(&'a self, id: &S) -> impl Iterator<Item = (&'a I, &'a S)> + 'a {
		self.states
			.get(id)
			.into_iter()
			.flat_map(|state| state.transitions.iter())
	}

	/// Iterates over all transitions as `(from, symbol, to)`, ordered by source then symbol.
	pub fn transitions(&self) -> impl Iterator<Item = (&S, &I, &S)> + '_ {
		self.states.iter().flat_map(|(from, state)| {
			state
				.transitions
				.iter()
				.map(move |(symbol, to)| (from, symbol, to))
		})
	}

	/// Returns the set of states reachable from the start state.
	pub fn reachable_states(&self) -> BTreeSet<&S> {
		let mut reachable = BTreeSet::new();
		let mut stack = vec![&self.start];
		reachable.insert(&self.start);

		while let Some(id) = stack.pop() {
			for (_, next) in self.transitions_from(id) {
				if reachable.insert(next) {
					stack.push(next);
				}
			}
		}
		reachable
	}

	/// Checks whether the DFA accepts no input at all.
	pub fn is_empty(&self) -> bool {
		!self
			.reachable_states()
			.into_iter()
			.any(|id| self.is_accepting(id))
	}

	/// Computes the minimal DFA accepting the same language.
	/// See [`crate::minimize`].
	pub fn minimize(&self) -> DFA<StateSet<S>, I> {
		minimize::minimize(self)
	}
}

impl<S, I> TryFrom<Definition<S, I>> for DFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	type Error = AutomatonError<S, I>;

	fn try_from(definition: Definition<S, I>) -> Result<Self, Self::Error> {
		Self::checked(definition.start, definition.alphabet, definition.states)
	}
}

impl<S, I> Automaton<S, I> for DFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	fn start(&self) -> &S {
		&self.start
	}

	fn alphabet(&self) -> &Alphabet<I> {
		&self.alphabet
	}

	fn has_state(&self, id: &S) -> bool {
		self.states.contains_key(id)
	}

	fn is_accepting(&self, id: &S) -> bool {
		self.states.get(id).map_or(false, |state| state.accepts)
	}

	fn num_states(&self) -> usize {
		self.states.len()
	}

	fn accepts<'a, V>(&self, inputs: V) -> bool
	where
		V: IntoIterator<Item = &'a I>,
		I: 'a,
	{
		simulate::run_dfa(self, inputs)
	}
}

/// Incremental builder for a [`DFA`].
#[derive(Debug, Clone)]
pub struct Builder<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	alphabet: Alphabet<I>,
	states: BTreeMap<S, State<S, I>>,
}

impl<S, I> Builder<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	/// Creates a new empty builder.
	pub fn new() -> Self {
		Self {
			alphabet: Alphabet::new(),
			states: BTreeMap::new(),
		}
	}

	/// Checks whether a state was already added.
	pub fn has_state(&self, id: &S) -> bool {
		self.states.contains_key(id)
	}

	/// Adds a new state.
	/// Adding an existing state again only updates whether it accepts.
	pub fn add_state(&mut self, id: S, accept: bool) -> &mut Self {
		self.states.entry(id).or_default().accepts = accept;
		self
	}

	/// Adds a symbol to the alphabet.
	/// Symbols used by transitions are added implicitly.
	pub fn add_symbol(&mut self, symbol: I) -> &mut Self {
		self.alphabet.insert(symbol);
		self
	}

	/// Adds a new transition.
	/// Returns an `AutomatonError::InexistentState` error if one of the states is inexistent,
	/// or an `AutomatonError::Nondeterministic` error if `prev` already moves elsewhere on `input`.
	pub fn add_transition(
		&mut self,
		prev: S,
		input: I,
		next: S,
	) -> Result<&mut Self, AutomatonError<S, I>> {
		if !self.has_state(&next) {
			return Err(AutomatonError::InexistentState(next));
		}
		let state = self
			.states
			.get_mut(&prev)
			.ok_or_else(|| AutomatonError::InexistentState(prev.clone()))?;
		match state.transitions.entry(input) {
			Entry::Vacant(entry) => {
				self.alphabet.insert(entry.key().clone());
				entry.insert(next);
			}
			Entry::Occupied(entry) if *entry.get() == next => {}
			Entry::Occupied(entry) => {
				return Err(AutomatonError::Nondeterministic {
					state: prev,
					symbol: entry.key().clone(),
				})
			}
		}
		Ok(self)
	}

	/// Finishes the DFA with the given start state.
	/// Returns an `AutomatonError::UndeclaredStart` error if the start state is inexistent.
	pub fn build(self, start: S) -> Result<DFA<S, I>, AutomatonError<S, I>> {
		DFA::checked(start, self.alphabet, self.states)
	}
}

impl<S, I> Default for Builder<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	fn default() -> Self {
		Self::new()
	}
}
