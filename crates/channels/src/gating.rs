/// Check if an author may use the relay.
///
/// An empty allowlist means everyone is allowed (open policy).
/// Entries are matched case-insensitively and support `*` wildcards.
pub fn is_allowed(peer: &str, allowlist: &[String]) -> bool {
    allowlist.is_empty() || is_listed(peer, allowlist)
}

/// Check if a peer is explicitly listed. An empty list matches nobody.
pub fn is_listed(peer: &str, list: &[String]) -> bool {
    let peer = peer.to_lowercase();
    list.iter().any(|pattern| {
        let pattern = pattern.trim().to_lowercase();
        if pattern.contains('*') {
            glob_match(&pattern, &peer)
        } else {
            pattern == peer
        }
    })
}

/// Glob matching where `*` stands for any (possibly empty) sequence.
fn glob_match(pattern: &str, text: &str) -> bool {
    let mut segments = pattern.split('*');
    // `split` always yields at least one item.
    let first = segments.next().unwrap_or("");
    let Some(mut rest) = text.strip_prefix(first) else {
        return false;
    };

    let segments: Vec<&str> = segments.collect();
    let Some((last, middle)) = segments.split_last() else {
        return rest.is_empty();
    };

    for segment in middle.iter().filter(|s| !s.is_empty()) {
        match rest.find(segment) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_allowlist_allows_everyone() {
        assert!(is_allowed("anyone", &[]));
        assert!(!is_listed("anyone", &[]));
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let l = list(&["alice", "1234"]);
        assert!(is_allowed("Alice", &l));
        assert!(is_allowed("1234", &l));
        assert!(!is_allowed("bob", &l));
    }

    #[rstest]
    #[case("admin_*", "admin_alice", true)]
    #[case("admin_*", "user_bob", false)]
    #[case("*@example.com", "user@example.com", true)]
    #[case("*@example.com", "user@other.com", false)]
    #[case("user_*_admin", "user_123_admin", true)]
    #[case("user_*_admin", "user_123_mod", false)]
    #[case("a*b*c", "abc", true)]
    #[case("a*b*c", "axxbyyc", true)]
    #[case("a*b*c", "acb", false)]
    #[case("*", "", true)]
    #[case("ab*ba", "aba", false)]
    fn glob_patterns(#[case] pattern: &str, #[case] peer: &str, #[case] expected: bool) {
        assert_eq!(is_listed(peer, &list(&[pattern])), expected);
    }
}
