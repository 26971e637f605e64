//! Terminal I/O

mod console;

pub use console::Console;
