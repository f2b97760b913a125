//! Unit tests for the engines component

mod batch_test;
mod raw_context_test;
mod signal_test;
