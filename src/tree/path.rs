//! Output path derivation for generation entries

use crate::run::{NamingPolicy, RunDefinition};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Normalize a key for use as a path segment.
///
/// Keys are normalized to NFC so the same declared key always produces the
/// same bytes on disk regardless of how the source config encoded it.
pub fn normalize_key(key: &str) -> String {
    key.nfc().collect()
}

/// Derive the output file path for one entry.
///
/// `key_path` is the ordered root-to-node key sequence, inclusive; it is
/// never empty. The result is computed once at merge time and cached on the
/// entry, never recomputed during rendering or writing.
pub fn resolve_entry_path(
    source_root: &Path,
    key_path: &[String],
    run: &RunDefinition,
) -> PathBuf {
    let keys: Vec<String> = key_path.iter().map(|k| normalize_key(k)).collect();

    let fold_last_key = match run.naming {
        NamingPolicy::AllKeysAsDirs => false,
        // A lone key keeps its directory so single-key runs from different
        // roots cannot collide on the same file name in the source root.
        NamingPolicy::PrependLastKey => keys.len() > 1,
        NamingPolicy::PrependLastKeyIfSingleEntry => run.leaf_count() == 1,
    };

    let (dirs, file_name) = match (fold_last_key, keys.split_last()) {
        (true, Some((last, dirs))) => (dirs, format!("{}_{}.{}", last, run.name, run.suffix)),
        _ => (&keys[..], format!("{}.{}", run.name, run.suffix)),
    };

    let mut path = source_root.to_path_buf();
    if let Some(base_dir) = &run.base_dir {
        path.push(base_dir);
    }
    for dir in dirs {
        path.push(dir);
    }
    path.push(file_name);
    path
}
