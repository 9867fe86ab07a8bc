/// Fold a digest into an integer by reading its bytes as a big-endian number.
///
/// Digests longer than 8 bytes keep only their trailing 8 bytes.
#[inline]
pub fn fold_digest(digest: &[u8]) -> u64 {
    digest
        .iter()
        .fold(0_u64, |acc, &byte| (acc << 8) | byte as u64)
}

/// Reduce a folded digest to an index within `[0, num_buckets)`.
#[inline]
pub fn bucket_index(hash: u64, num_buckets: usize) -> usize {
    debug_assert!(num_buckets > 0, r#""num_buckets" must be greater than 0"#);

    (hash % num_buckets as u64) as usize
}
