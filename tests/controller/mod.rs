//! Invocation controller tests.

mod submit_test;
