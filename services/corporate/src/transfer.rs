/// Input for a fund transfer.
///
/// Free-text and identifier fields are normalized (all whitespace stripped,
/// lowercased) before the body is built, since the remote recomputes the
/// signature over its own normalized rendering.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Transfer amount, e.g. `"100000.00"`. Sent as given.
    pub amount: String,
    /// Account credited by the transfer.
    pub beneficiary_account_number: String,
    /// Caller-chosen reference, echoed back in statements.
    pub reference_id: String,
    /// First remark line.
    pub remark1: String,
    /// Second remark line.
    pub remark2: String,
    /// Account debited by the transfer.
    pub source_account_number: String,
    /// Unique transaction identifier for idempotency at the remote.
    pub transaction_id: String,
}

/// Strip all whitespace and lowercase, e.g. `"  ABC Corp "` -> `"abccorp"`.
pub(crate) fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_and_lowercases() {
        assert_eq!(normalize("  ABC Corp "), "abccorp");
        assert_eq!(normalize("Transfer Online"), "transferonline");
        assert_eq!(normalize("0201245680"), "0201245680");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_handles_inner_tabs_and_newlines() {
        assert_eq!(normalize("A\tB\nC"), "abc");
    }
}
