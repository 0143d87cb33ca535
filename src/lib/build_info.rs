pub fn git_commit_hash() -> &'static str {
    match option_env!("SHEETFORGE_WEB_GIT_SHA") {
        Some(value) if !value.is_empty() => value,
        _ => "unknown",
    }
}

/// Short form for the footer badge.
pub fn short_commit_hash() -> &'static str {
    let hash = git_commit_hash();
    if hash.len() >= 8 { &hash[..8] } else { hash }
}

#[cfg(test)]
mod tests {
    use super::short_commit_hash;

    #[test]
    fn short_commit_hash_never_panics() {
        // "unknown" in test builds; the slice bound must hold either way.
        let short = short_commit_hash();
        assert!(!short.is_empty());
        assert!(short.len() <= 8);
    }
}
