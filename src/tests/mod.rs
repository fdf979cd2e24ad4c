//! Monitor tests.

mod console;
mod support;
