//! # Shared Utility Functions
//!
//! Common utility functions used by the client core and its front-ends.
//!
//! ## Address Formatting
//!
//! Functions for formatting account addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x52908400098527886E0F7030069857D2E4169EE7";
//! let formatted = format_address(address, 6, 4);
//! assert_eq!(formatted, "0x5290...9EE7");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Arguments
///
/// * `address` - The wallet address to format
/// * `prefix_len` - Number of characters to show at the start (default: 4)
/// * `suffix_len` - Number of characters to show at the end (default: 4)
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x52908400098527886E0F7030069857D2E4169EE7";
/// assert_eq!(format_address(addr, 4, 4), "0x52...9EE7");
/// assert_eq!(format_address(addr, 6, 4), "0x5290...9EE7");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    // Hex and base58 addresses are ASCII, but labels from connectors may not be
    let (Some(prefix), Some(suffix)) = (
        address.get(..prefix_len),
        address.get(address_len - suffix_len..),
    ) else {
        return address.to_string();
    };

    format!("{}...{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    #[test]
    fn test_format_address() {
        assert_eq!(format_address(ADDR, 4, 4), "0x52...9EE7");
        assert_eq!(format_address(ADDR, 6, 4), "0x5290...9EE7");
        assert_eq!(format_address(ADDR, 2, 2), "0x...E7");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("short", 4, 4), "short");
        assert_eq!(format_address("abc", 4, 4), "abc");
    }

    #[test]
    fn test_format_address_non_ascii_boundary() {
        // 'é' is two bytes; a prefix ending inside it must not panic
        let label = "aéaaaaaaaaaa";
        assert_eq!(format_address(label, 2, 2), label);
    }
}
