//! Finite automata construction and minimization.
//!
//! An [`NFA`] with epsilon transitions is turned into an equivalent [`DFA`] by
//! [`subset_construction`], and a DFA is reduced to its minimal form by
//! [`minimize`]. Both automata can be run on input through [`Automaton::accepts`].

mod automaton;
pub mod closure;
pub mod dfa;
mod minimize;
pub mod nfa;
mod simulate;
mod state;
mod subset;

pub use automaton::{Alphabet, Automaton, AutomatonError, Label};
pub use dfa::DFA;
pub use minimize::minimize;
pub use nfa::NFA;
pub use simulate::{run_dfa, simulate_nfa};
pub use state::StateSet;
pub use subset::subset_construction;
