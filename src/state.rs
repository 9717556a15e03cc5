use std::{
	collections::{btree_set, BTreeSet},
	fmt,
	iter::FromIterator,
};

/// A canonical set of states.
///
/// Elements are kept sorted, so two sets compare, order and hash equal exactly
/// when they hold the same members. Subset construction uses it as the identity
/// of a DFA state, minimization as the identity of a block.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet<S>(BTreeSet<S>)
where
	S: Ord;

impl<S> StateSet<S>
where
	S: Ord,
{
	/// Creates a new empty set.
	pub fn new() -> Self {
		Self(BTreeSet::new())
	}

	/// Creates a set containing a single state.
	pub fn singleton(state: S) -> Self {
		let mut set = Self::new();
		set.insert(state);
		set
	}

	/// Inserts a state, returning whether it was newly added.
	pub fn insert(&mut self, state: S) -> bool {
		self.0.insert(state)
	}

	pub fn contains(&self, state: &S) -> bool {
		self.0.contains(state)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Iterates over the states in ascending order.
	pub fn iter(&self) -> btree_set::Iter<'_, S> {
		self.0.iter()
	}

	/// Returns the smallest state of the set.
	pub fn first(&self) -> Option<&S> {
		self.0.iter().next()
	}

	/// Checks whether any state of this set satisfies the predicate.
	pub fn any<F>(&self, f: F) -> bool
	where
		F: FnMut(&S) -> bool,
	{
		self.0.iter().any(f)
	}

	/// Returns the underlying sorted set.
	pub fn as_set(&self) -> &BTreeSet<S> {
		&self.0
	}
}

impl<S> Default for StateSet<S>
where
	S: Ord,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<S> From<BTreeSet<S>> for StateSet<S>
where
	S: Ord,
{
	fn from(set: BTreeSet<S>) -> Self {
		Self(set)
	}
}

impl<S> FromIterator<S> for StateSet<S>
where
	S: Ord,
{
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<S> Extend<S> for StateSet<S>
where
	S: Ord,
{
	fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
		self.0.extend(iter)
	}
}

impl<S> IntoIterator for StateSet<S>
where
	S: Ord,
{
	type Item = S;
	type IntoIter = btree_set::IntoIter<S>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a, S> IntoIterator for &'a StateSet<S>
where
	S: Ord,
{
	type Item = &'a S;
	type IntoIter = btree_set::Iter<'a, S>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl<S> fmt::Debug for StateSet<S>
where
	S: Ord + fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.0.iter()).finish()
	}
}

impl<S> fmt::Display for StateSet<S>
where
	S: Ord + fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{{")?;
		for (i, state) in self.0.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}", state)?;
		}
		write!(f, "}}")
	}
}
