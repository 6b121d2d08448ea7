// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing job postings
// and verdicts. No burn types, no file I/O.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Feature vectors, column order and CSV rows
pub mod posting;

// Everything found in posting text, per red flag
pub mod signals;

// Model-free points table over those signals
pub mod heuristic;

// Three-way verdict derived from a probability
pub mod verdict;

// Core abstractions (traits) that other layers implement
pub mod traits;
