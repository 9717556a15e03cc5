use std::{collections::BTreeSet, fmt};
use thiserror::Error;

/// Ordered set of input symbols.
pub type Alphabet<I> = BTreeSet<I>;

/// Trait representing an abstract finite automaton.
///
/// Implementors are immutable once constructed, so every query is read-only.
pub trait Automaton<S, I>
where
	S: Clone + Ord + fmt::Debug,
	I: Clone + Ord + fmt::Debug,
{
	/// Returns the start state.
	fn start(&self) -> &S;

	/// Returns the input alphabet.
	fn alphabet(&self) -> &Alphabet<I>;

	/// Checks whether the states of the automaton includes a state.
	fn has_state(&self, id: &S) -> bool;

	/// Checks whether a state is accepting.
	/// Returns false for states the automaton does not have.
	fn is_accepting(&self, id: &S) -> bool;

	/// Returns the number of states.
	fn num_states(&self) -> usize;

	/// Runs the automaton on a sequence of inputs.
	/// Symbols outside of the alphabet reject the input.
	fn accepts<'a, V>(&self, inputs: V) -> bool
	where
		V: IntoIterator<Item = &'a I>,
		I: 'a;
}

/// Label of an NFA transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label<I> {
	/// Transition taken without consuming input.
	Epsilon,
	/// Transition consuming a single input symbol.
	Symbol(I),
}

impl<I> From<I> for Label<I> {
	fn from(symbol: I) -> Self {
		Self::Symbol(symbol)
	}
}

/// Enum representing a construction error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError<S, I>
where
	S: fmt::Debug,
	I: fmt::Debug,
{
	#[error("Inexistent State ID \"{0:?}\"")]
	InexistentState(S),

	#[error("Start state \"{0:?}\" is not declared")]
	UndeclaredStart(S),

	#[error("Accepting state \"{0:?}\" is not declared")]
	UndeclaredAccepting(S),

	#[error("Symbol \"{0:?}\" is not part of the alphabet")]
	UnknownSymbol(I),

	#[error("State \"{state:?}\" has more than one transition on \"{symbol:?}\"")]
	Nondeterministic { state: S, symbol: I },
}
