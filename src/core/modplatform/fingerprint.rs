// ─── File Fingerprints ───
// CurseForge identifies files by a MurmurHash2 of their contents with
// whitespace removed. SHA-1 is used to check downloads against the hash
// published on a file entry.

use std::path::Path;

use sha1::{Digest, Sha1};

use crate::core::error::{PackError, PackResult};

const MURMUR_SEED: u32 = 1;
const MURMUR_M: u32 = 0x5bd1_e995;
const MURMUR_R: u32 = 24;

fn is_fingerprint_whitespace(b: u8) -> bool {
    matches!(b, 9 | 10 | 13 | 32)
}

fn murmur2(data: &[u8], seed: u32) -> u32 {
    let mut h = seed ^ data.len() as u32;

    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        k = k.wrapping_mul(MURMUR_M);
        k ^= k >> MURMUR_R;
        k = k.wrapping_mul(MURMUR_M);
        h = h.wrapping_mul(MURMUR_M);
        h ^= k;
    }

    let tail = chunks.remainder();
    if tail.len() == 3 {
        h ^= u32::from(tail[2]) << 16;
    }
    if tail.len() >= 2 {
        h ^= u32::from(tail[1]) << 8;
    }
    if !tail.is_empty() {
        h ^= u32::from(tail[0]);
        h = h.wrapping_mul(MURMUR_M);
    }

    h ^= h >> 13;
    h = h.wrapping_mul(MURMUR_M);
    h ^= h >> 15;
    h
}

/// CurseForge fingerprint of a file's contents.
pub fn flame_fingerprint(bytes: &[u8]) -> u32 {
    let normalized: Vec<u8> = bytes
        .iter()
        .copied()
        .filter(|b| !is_fingerprint_whitespace(*b))
        .collect();
    murmur2(&normalized, MURMUR_SEED)
}

pub async fn fingerprint_file(path: &Path) -> PackResult<u32> {
    let bytes = tokio::fs::read(path).await.map_err(|e| PackError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(flame_fingerprint(&bytes))
}

/// Validate an existing file's SHA-1 against a published hash.
pub async fn validate_sha1(path: &Path, expected: &str) -> PackResult<bool> {
    let bytes = tokio::fs::read(path).await.map_err(|e| PackError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut hasher = Sha1::new();
    hasher.update(&bytes);
    let actual = hex::encode(hasher.finalize());
    Ok(actual.eq_ignore_ascii_case(expected))
}
