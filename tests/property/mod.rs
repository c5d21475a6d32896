//! Property-based tests for dispatch ordering

mod ordering;
