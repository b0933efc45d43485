//! Runtime detection
//!
//! Generated projects build with their own wrapper scripts, which still need
//! a Java installation on the machine.

pub mod check;

pub use check::{check_java, parse_java_version, RuntimeInfo};
