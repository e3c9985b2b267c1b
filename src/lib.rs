//! Three classical-AI exercises sharing one crate:
//!
//! * [`solver`] — exhaustive backtracking enumeration of course timetables
//!   (the core, with [`data`], [`calendar`] and [`io`] around it);
//! * [`hmm`] — a letter-sequence hidden Markov model with Viterbi decoding;
//! * [`mdp`] — a finite-state fishery MDP solved by value iteration.

pub mod calendar;
pub mod data;
pub mod hmm;
pub mod io;
pub mod mdp;
pub mod solver;
