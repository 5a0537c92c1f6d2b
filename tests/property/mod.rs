//! Property-based tests

pub mod normalizer_proptest;
