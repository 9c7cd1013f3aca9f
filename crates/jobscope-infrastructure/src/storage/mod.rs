//! Durable storage primitives.

mod atomic_file;

pub use atomic_file::AtomicFile;
