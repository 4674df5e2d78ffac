//! Driven adapters: infrastructure implementations of the domain ports.

pub mod persistence;
