use sha2::{Digest, Sha256};

/// Maps a seed string onto an index into a catalog of `catalog_size` images.
///
/// The seed is hashed with SHA-256 and the first eight bytes, read big-endian,
/// are reduced modulo the catalog size. The result only stays stable while the
/// catalog size does; adding or removing images reshuffles seeds. Changing the
/// hash invalidates every seed redirect that downstream caches have stored.
///
/// Returns `None` for an empty catalog.
pub fn seed_index(seed: &str, catalog_size: usize) -> Option<usize> {
    if catalog_size == 0 {
        return None;
    }

    let digest = Sha256::digest(seed.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let hash = u64::from_be_bytes(prefix);

    Some((hash % catalog_size as u64) as usize)
}
