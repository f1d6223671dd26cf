//! Canonical cache keys and content hashes for dungeon grids.

use sha2::{Digest, Sha256};

use crate::{Error, Grid};

/// Encode a grid as its canonical cache key.
///
/// The key is the compact JSON array form (`[[1,-3,3],[0,-2,0]]`): row order
/// and column order are preserved and no whitespace is emitted.
pub fn canonical_key(grid: &Grid) -> Result<String, Error> {
    serde_json::to_string(grid.as_rows()).map_err(Error::from)
}

/// Compute the content hash of a canonical key.
pub fn compute_run_hash(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Check that `hash` looks like a run hash (64 lowercase hex digits).
pub fn is_valid_run_hash(hash: &str) -> bool {
    hash.len() == 64 && hash.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: Vec<Vec<i32>>) -> Grid {
        Grid::new(cells).unwrap()
    }

    #[test]
    fn test_canonical_key_format() {
        let key = canonical_key(&grid(vec![vec![1, -3, 3], vec![0, -2, 0]])).unwrap();
        assert_eq!(key, "[[1,-3,3],[0,-2,0]]");
    }

    #[test]
    fn test_equal_grids_share_key() {
        let a = canonical_key(&grid(vec![vec![5, -4], vec![1, 0]])).unwrap();
        let b = canonical_key(&grid(vec![vec![5, -4], vec![1, 0]])).unwrap();
        assert_eq!(a, b);
        assert_eq!(compute_run_hash(&a), compute_run_hash(&b));
    }

    #[test]
    fn test_shape_changes_key() {
        let wide = canonical_key(&grid(vec![vec![1, 2, 3, 4]])).unwrap();
        let square = canonical_key(&grid(vec![vec![1, 2], vec![3, 4]])).unwrap();
        assert_ne!(wide, square);
    }

    #[test]
    fn test_hash_format() {
        let hash = compute_run_hash("[[0]]");
        assert_eq!(hash.len(), 64);
        assert!(is_valid_run_hash(&hash));
    }

    #[test]
    fn test_invalid_hashes() {
        assert!(!is_valid_run_hash(""));
        assert!(!is_valid_run_hash("abc123"));
        assert!(!is_valid_run_hash(&"G".repeat(64)));
        assert!(!is_valid_run_hash(&"A".repeat(64)));
    }
}
