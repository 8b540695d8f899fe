/// Largest page a listing search may request.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Largest offset the SQL layer can bind; it takes signed 64-bit integers.
pub const MAX_PAGE_OFFSET: u64 = i64::MAX as u64;

/// Normalizes offset/limit query values: `limit` falls back to `default_limit`
/// and is clamped to `1..=MAX_PAGE_LIMIT`, `offset` to `MAX_PAGE_OFFSET`.
pub fn validate_pagination(offset: Option<u64>, limit: Option<u64>, default_limit: u64) -> (u64, u64) {
    let offset = offset.unwrap_or(0).min(MAX_PAGE_OFFSET);
    let limit = limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_LIMIT);
    (offset, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_absent() {
        assert_eq!(validate_pagination(None, None, 10), (0, 10));
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(validate_pagination(Some(5), Some(0), 10), (5, 1));
        assert_eq!(validate_pagination(Some(5), Some(1000), 10), (5, MAX_PAGE_LIMIT));
    }

    #[test]
    fn offset_beyond_signed_range_is_clamped() {
        assert_eq!(
            validate_pagination(Some(u64::MAX), None, 10),
            (MAX_PAGE_OFFSET, 10)
        );
        assert_eq!(
            validate_pagination(Some(MAX_PAGE_OFFSET + 1), Some(5), 10).0,
            MAX_PAGE_OFFSET
        );
    }
}
