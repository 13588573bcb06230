//! VM naming convention
//!
//! Registry names follow `lcp{env}{location}-{sequence}`, e.g. `lcpdevuks-0001`.
//! The location is never stored by the registry; it is recovered from the name.

/// Length of the fixed name prefix (`lcp`)
const NAME_PREFIX_LEN: usize = 3;

/// Environment codes embedded in registry names, in match order
pub const ENVIRONMENT_CODES: [&str; 4] = ["dev", "prd", "ppd", "dvt"];

/// Derive the location code from a VM name.
///
/// Returns an empty string when the name does not carry a recognizable
/// location: no `-` separator, a first segment no longer than the prefix,
/// or an unknown environment code.
///
/// # Examples
///
/// ```
/// use vmname_registry_client::derive_location;
///
/// assert_eq!(derive_location("lcpdevuks-0001"), "uks");
/// assert_eq!(derive_location("lcp-0001"), "");
/// ```
pub fn derive_location(vm_name: &str) -> String {
    let Some((prefix, _sequence)) = vm_name.split_once('-') else {
        return String::new();
    };
    if prefix.len() <= NAME_PREFIX_LEN {
        return String::new();
    }

    // Non-ASCII prefixes can put byte 3 inside a character
    let Some(rest) = prefix.get(NAME_PREFIX_LEN..) else {
        return String::new();
    };

    ENVIRONMENT_CODES
        .iter()
        .find_map(|code| rest.strip_prefix(code))
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_location_known_environments() {
        assert_eq!(derive_location("lcpdevuks-0001"), "uks");
        assert_eq!(derive_location("lcpprduks-0002"), "uks");
        assert_eq!(derive_location("lcpppdukw-0010"), "ukw");
        assert_eq!(derive_location("lcpdvtneu-9999"), "neu");
    }

    #[test]
    fn test_derive_location_not_derivable() {
        assert_eq!(derive_location("lcp-0001"), "");
        assert_eq!(derive_location("foobar-0001"), "");
        assert_eq!(derive_location("lcpdevuks"), "");
        assert_eq!(derive_location(""), "");
        assert_eq!(derive_location("lcpqauks-0001"), "");
    }

    #[test]
    fn test_derive_location_uses_first_segment_only() {
        assert_eq!(derive_location("lcpdevuks-0001-extra"), "uks");
    }

    #[test]
    fn test_derive_location_env_without_location() {
        assert_eq!(derive_location("lcpdev-0001"), "");
    }

    #[test]
    fn test_derive_location_non_ascii_prefix() {
        assert_eq!(derive_location("\u{e9}\u{e9}devuks-0001"), "");
    }
}
