//! Script-level tests: build scripts evaluated end to end.

mod common;
mod conda_tests;
mod ordering_tests;
mod scripts_tests;
