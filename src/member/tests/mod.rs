//! Unit tests for the member module.

mod service_tests;
