use std::time::{SystemTime, UNIX_EPOCH};

/// Builds the deterministic conversation key for a buyer–seller pair.
///
/// The ordering is fixed (seller first), so both sides of the pair derive the same key no
/// matter who opens the thread.
pub fn conversation_key(seller_id: i64, buyer_id: i64) -> String {
    format!("{seller_id}:{buyer_id}")
}

/// A receipt label for the gateway, derived from the wall clock and the buyer id.
pub fn receipt_label(buyer_id: i64) -> String {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis()).unwrap_or_default();
    format!("rcpt_{}_{buyer_id}", millis % 100_000_000)
}

/// Shortens untrusted or sensitive material for log lines.
pub fn truncated(s: &str) -> String {
    if s.chars().count() <= 12 {
        s.to_string()
    } else {
        let head: String = s.chars().take(12).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn conversation_keys_are_stable() {
        assert_eq!(conversation_key(7, 12), "7:12");
        assert_eq!(conversation_key(7, 12), conversation_key(7, 12));
        assert_ne!(conversation_key(7, 12), conversation_key(12, 7));
    }

    #[test]
    fn receipt_labels_carry_the_buyer() {
        let label = receipt_label(42);
        assert!(label.starts_with("rcpt_"));
        assert!(label.ends_with("_42"));
    }

    #[test]
    fn truncation() {
        assert_eq!(truncated("short"), "short");
        assert_eq!(truncated("abcdefghijklmnopqrstuvwxyz"), "abcdefghijkl…");
    }
}
