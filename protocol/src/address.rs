//! Wallet address helpers.

#[cfg(test)]
#[path = "address_test.rs"]
mod address_test;

/// Whether `address` is `0x` followed by exactly 40 hex digits.
#[must_use]
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Case-insensitive address comparison.
#[must_use]
pub fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Display form `0x1234...abcd`: the first six and last four characters.
///
/// Strings too short to abbreviate are returned unchanged.
#[must_use]
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
