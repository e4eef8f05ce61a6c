//! Hash tests for the written LUT.
//!
//! The .cube file is the artifact an OCIO config consumes, so two bakes must
//! produce byte-identical files. Comparing SHA256 digests of whole files
//! catches any nondeterminism in sampling order or number formatting.

use neutral_color::bake_lut;
use neutral_lut::{LogGrid, cube};
use sha2::{Digest, Sha256};
use std::path::Path;
use tempfile::tempdir;

/// SHA256 of a file's bytes, lowercase hex.
fn file_digest(path: &Path) -> String {
    let bytes = std::fs::read(path).unwrap();
    format!("{:x}", Sha256::digest(&bytes))
}

#[test]
fn test_bake_is_deterministic() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.cube");
    let second = dir.path().join("second.cube");

    cube::write_3d(&first, &bake_lut(&LogGrid::PBR_NEUTRAL).lut).unwrap();
    cube::write_3d(&second, &bake_lut(&LogGrid::PBR_NEUTRAL).lut).unwrap();

    let a = file_digest(&first);
    let b = file_digest(&second);
    assert_eq!(a.len(), 64);
    assert_eq!(a, b);
}

#[test]
fn test_overwrite_matches_fresh_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("neutral.cube");
    let fresh = dir.path().join("fresh.cube");

    // A larger stale file must be fully replaced
    std::fs::write(&path, "x".repeat(16 * 1024 * 1024)).unwrap();
    let lut = bake_lut(&LogGrid::PBR_NEUTRAL).lut;
    cube::write_3d(&path, &lut).unwrap();
    cube::write_3d(&fresh, &lut).unwrap();

    assert_eq!(file_digest(&path), file_digest(&fresh));
}

#[test]
fn test_digest_tracks_content() {
    let dir = tempdir().unwrap();
    let full = dir.path().join("full.cube");
    let small = dir.path().join("small.cube");

    cube::write_3d(&full, &bake_lut(&LogGrid::PBR_NEUTRAL).lut).unwrap();
    let grid = LogGrid::new(17, -9.0, 10.0).unwrap();
    cube::write_3d(&small, &bake_lut(&grid).lut).unwrap();

    assert_ne!(file_digest(&full), file_digest(&small));
}
