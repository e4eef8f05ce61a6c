//! Integration tests for the PBR Neutral crates.
//!
//! End-to-end checks on the shipping 57^3 LUT: what lands on disk, how it
//! decodes, and what the round-trip report says about the inverse.

#[cfg(test)]
mod golden;
