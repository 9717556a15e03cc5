use super::{
	closure, simulate, subset, Alphabet, Automaton, AutomatonError, Label, StateSet, DFA,
};
use serde::Deserialize;
use std::{
	collections::{BTreeMap, BTreeSet},
	convert::TryFrom,
	fmt,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
	default,
	deny_unknown_fields,
	bound(deserialize = "S: Deserialize<'de> + Ord, I: Deserialize<'de> + Ord")
)]
struct State<S, I>
where
	S: Ord,
	I: Ord,
{
	accepts: bool,
	transitions: BTreeMap<I, BTreeSet<S>>,
	epsilon: BTreeSet<S>,
}

impl<S, I> State<S, I>
where
	S: Ord,
	I: Ord,
{
	fn new(accepts: bool) -> Self {
		Self {
			accepts,
			transitions: BTreeMap::new(),
			epsilon: BTreeSet::new(),
		}
	}

	fn add(&mut self, input: Label<I>, next: S) {
		match input {
			Label::Epsilon => {
				self.epsilon.insert(next);
			}
			Label::Symbol(symbol) => {
				self.transitions.entry(symbol).or_default().insert(next);
			}
		}
	}
}

impl<S, I> Default for State<S, I>
where
	S: Ord,
	I: Ord,
{
	fn default() -> Self {
		Self::new(false)
	}
}

/// Raw automaton definition, validated before it becomes an [`NFA`].
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

/// A nondeterministic finite state automaton with epsilon transitions.
///
/// An `NFA` is validated on construction: its start state, accepting states and
/// every transition endpoint are declared states, and every transition symbol
/// belongs to the alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(
	try_from = "Definition<S, I>",
	bound(
		deserialize = "S: Deserialize<'de> + Clone + Ord + fmt::Debug, I: Deserialize<'de> + Clone + Ord + fmt::Debug"
	)
)]
pub struct NFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	start: S,
	alphabet: Alphabet<I>,
	states: BTreeMap<S, State<S, I>>,
}

impl<S, I> NFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	/// Creates a new NFA from its components.
	///
	/// Returns an error if the start state, an accepting state or a transition
	/// endpoint is not part of `states`, or if a transition symbol is not part of
	/// `alphabet`.
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
		T: IntoIterator<Item = (S, Label<I>, S)>,
		F: IntoIterator<Item = S>,
	{
		let mut states: BTreeMap<_, _> = states
			.into_iter()
			.map(|id| (id, State::default()))
			.collect();
		for id in accepting {
			match states.get_mut(&id) {
				Some(state) => state.accepts = true,
				None => return Err(AutomatonError::UndeclaredAccepting(id)),
			}
		}
		for (prev, input, next) in transitions {
			match states.get_mut(&prev) {
				Some(state) => state.add(input, next),
				None => return Err(AutomatonError::InexistentState(prev)),
			}
		}
		Self::checked(start, alphabet.into_iter().collect(), states)
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
			for (symbol, targets) in &state.transitions {
				if !alphabet.contains(symbol) {
					return Err(AutomatonError::UnknownSymbol(symbol.clone()));
				}
				if let Some(next) = targets.iter().find(|next| !states.contains_key(*next)) {
					return Err(AutomatonError::InexistentState(next.clone()));
				}
			}
			if let Some(next) = state.epsilon.iter().find(|next| !states.contains_key(*next)) {
				return Err(AutomatonError::InexistentState(next.clone()));
			}
		}
		Ok(Self {
			start,
			alphabet,
			states,
		})
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

	/// Returns the destinations of a state on a symbol, if it has any.
	pub fn targets(&self, id: &S, symbol: &I) -> Option<&BTreeSet<S>> {
		self.states.get(id)?.transitions.get(symbol)
	}

	/// Returns the epsilon destinations of a state.
	/// Returns None if the state is inexistent.
	pub fn epsilon_targets(&self, id: &S) -> Option<&BTreeSet<S>> {
		self.states.get(id).map(|state| &state.epsilon)
	}

	/// See [`closure::epsilon_closure`].
	pub fn epsilon_closure(&self, states: &StateSet<S>) -> StateSet<S> {
		closure::epsilon_closure(self, states)
	}

	/// See [`closure::move_on_symbol`].
	pub fn move_on_symbol(&self, states: &StateSet<S>, symbol: &I) -> StateSet<S> {
		closure::move_on_symbol(self, states, symbol)
	}

	/// Converts the NFA into an equivalent DFA using subset construction.
	pub fn to_dfa(&self) -> DFA<StateSet<S>, I> {
		subset::subset_construction(self)
	}
}

impl<S, I> TryFrom<Definition<S, I>> for NFA<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	type Error = AutomatonError<S, I>;

	fn try_from(definition: Definition<S, I>) -> Result<Self, Self::Error> {
		Self::checked(definition.start, definition.alphabet, definition.states)
	}
}

impl<S, I> Automaton<S, I> for NFA<S, I>
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
		simulate::simulate_nfa(self, inputs)
	}
}

/// Incremental builder for an [`NFA`].
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

	/// Adds a new transition consuming `input`.
	/// Returns an `AutomatonError::InexistentState` error if one of the states is inexistent.
	pub fn add_transition(
		&mut self,
		prev: S,
		input: I,
		next: S,
	) -> Result<&mut Self, AutomatonError<S, I>> {
		self.alphabet.insert(input.clone());
		self.add(prev, Label::Symbol(input), next)
	}

	/// Adds a new epsilon transition.
	/// Returns an `AutomatonError::InexistentState` error if one of the states is inexistent.
	pub fn add_epsilon_transition(
		&mut self,
		prev: S,
		next: S,
	) -> Result<&mut Self, AutomatonError<S, I>> {
		self.add(prev, Label::Epsilon, next)
	}

	fn add(
		&mut self,
		prev: S,
		input: Label<I>,
		next: S,
	) -> Result<&mut Self, AutomatonError<S, I>> {
		if !self.has_state(&next) {
			return Err(AutomatonError::InexistentState(next));
		}
		let state = self
			.states
			.get_mut(&prev)
			.ok_or_else(|| AutomatonError::InexistentState(prev))?;
		state.add(input, next);
		Ok(self)
	}

	/// Finishes the NFA with the given start state.
	/// Returns an `AutomatonError::UndeclaredStart` error if the start state is inexistent.
	pub fn build(self, start: S) -> Result<NFA<S, I>, AutomatonError<S, I>> {
		NFA::checked(start, self.alphabet, self.states)
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

#[cfg(test)]
mod tests {
	use super::*;
	use maplit::btreeset;

	fn chars(input: &str) -> Vec<char> {
		input.chars().collect()
	}

	#[test]
	fn construct() {
		let mut builder = Builder::<u32, char>::new();
		builder.add_state(0, false).add_state(1, true);
		builder.add_transition(0, 'a', 0).unwrap();
		builder.add_transition(0, 'a', 1).unwrap();
		builder.add_epsilon_transition(1, 0).unwrap();
		let nfa = builder.build(0).unwrap();

		assert!(nfa.has_state(&0), "Initially added state missing");
		assert!(nfa.has_state(&1), "Later added state missing");
		assert!(!nfa.is_accepting(&0), "Initial state incorrectly accepting");
		assert!(nfa.is_accepting(&1), "Accepting state not accepting");
		assert_eq!(&0, nfa.start(), "Initial state not set correctly");
		assert_eq!(&btreeset!['a'], nfa.alphabet(), "Alphabet not collected");
		assert_eq!(Some(&btreeset![0, 1]), nfa.targets(&0, &'a'));
		assert_eq!(None, nfa.targets(&1, &'a'));
		assert_eq!(Some(&btreeset![0]), nfa.epsilon_targets(&1));
	}

	#[test]
	fn builder_rejects_inexistent_states() {
		let mut builder = Builder::<u32, char>::new();
		builder.add_state(0, false);
		assert_eq!(
			Err(AutomatonError::InexistentState(7)),
			builder.add_transition(0, 'a', 7).map(|_| ()),
			"Transition into an undeclared state accepted"
		);
		assert_eq!(
			Err(AutomatonError::InexistentState(7)),
			builder.add_epsilon_transition(7, 0).map(|_| ()),
			"Transition out of an undeclared state accepted"
		);
		assert_eq!(
			Err(AutomatonError::UndeclaredStart(3)),
			builder.build(3),
			"Undeclared start state accepted"
		);
	}

	#[test]
	fn from_parts_validates() {
		let nfa = NFA::from_parts(
			vec![0u8, 1],
			vec!['a'],
			vec![(0, Label::Symbol('a'), 1), (1, Label::Epsilon, 0)],
			0,
			vec![1],
		)
		.unwrap();
		assert_eq!(2, nfa.num_states());
		assert_eq!(vec![&1], nfa.accepting_states().collect::<Vec<_>>());

		assert_eq!(
			Err(AutomatonError::UndeclaredAccepting(2)),
			NFA::<u8, char>::from_parts(vec![0, 1], vec![], vec![], 0, vec![2])
		);
		assert_eq!(
			Err(AutomatonError::UndeclaredStart(5)),
			NFA::<u8, char>::from_parts(vec![0, 1], vec![], vec![], 5, vec![])
		);
		assert_eq!(
			Err(AutomatonError::InexistentState(9)),
			NFA::from_parts(vec![0u8], vec!['a'], vec![(0, 'a'.into(), 9)], 0, vec![])
		);
		assert_eq!(
			Err(AutomatonError::InexistentState(9)),
			NFA::from_parts(vec![0u8], vec!['a'], vec![(9, 'a'.into(), 0)], 0, vec![])
		);
		assert_eq!(
			Err(AutomatonError::InexistentState(9)),
			NFA::<u8, char>::from_parts(vec![0], vec![], vec![(0, Label::Epsilon, 9)], 0, vec![]),
			"Epsilon transition into undeclared state accepted"
		);
		assert_eq!(
			Err(AutomatonError::UnknownSymbol('b')),
			NFA::from_parts(vec![0u8], vec!['a'], vec![(0, 'b'.into(), 0)], 0, vec![])
		);
	}

	#[test]
	fn run() {
		let mut builder = Builder::<u8, char>::new();
		builder.add_state(0, false).add_state(1, false).add_state(2, true);
		builder.add_transition(0, 'a', 1).unwrap();
		builder.add_transition(0, 'a', 2).unwrap();
		builder.add_transition(1, 'b', 1).unwrap();
		builder.add_epsilon_transition(1, 2).unwrap();
		let nfa = builder.build(0).unwrap();

		assert!(nfa.accepts(&chars("a")), "Incorrect result on accepting run");
		assert!(nfa.accepts(&chars("abbb")), "Incorrect result on epsilon run");
		assert!(!nfa.accepts(&chars("")), "Empty input incorrectly accepted");
		assert!(!nfa.accepts(&chars("ba")), "Incorrect result on rejecting run");
		assert!(!nfa.accepts(&chars("ax")), "Symbol outside alphabet accepted");
	}

	#[test]
	fn deserialize() {
		let yaml = r"{start: 0, alphabet: [a, b], states: {0: {transitions: {a: [0, 1], b: [1]}}, 1: {accepts: true, epsilon: [0]}}}";
		let nfa: NFA<u8, char> = serde_yaml::from_str(yaml).unwrap();
		assert!(nfa.has_state(&0), "Deserialized NFA is missing state 0");
		assert!(nfa.accepts(&chars("aaa")), "Incorrect result after run");
		assert!(nfa.accepts(&chars("bab")), "Incorrect result after run");
	}

	#[test]
	fn deserialize_validates() {
		let yaml = r"{start: 0, alphabet: [a], states: {0: {transitions: {a: [4]}}}}";
		let err = serde_yaml::from_str::<NFA<u8, char>>(yaml).unwrap_err();
		assert!(
			err.to_string().contains("Inexistent State ID \"4\""),
			"Unexpected error: {}",
			err
		);

		let yaml = r"{start: 0, alphabet: [a], states: {0: {transitions: {b: [0]}}}}";
		assert!(serde_yaml::from_str::<NFA<u8, char>>(yaml).is_err());

		let yaml = r"{start: 0, alphabet: [a], states: {0: {accept: true}}}";
		assert!(
			serde_yaml::from_str::<NFA<u8, char>>(yaml).is_err(),
			"Unknown field accepted"
		);
	}
}
