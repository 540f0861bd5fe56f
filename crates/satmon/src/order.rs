//! Natural ordering for episode-style names.
//!
//! A trailing run of digits is zero-padded so that plain string comparison
//! puts "Season 2" before "Season 10". Digit runs of [`PAD_WIDTH`] or more
//! characters are left as they are.

/// Width trailing digit runs are padded to.
pub const PAD_WIDTH: usize = 6;

/// Derive the sort key for an entry name.
pub fn sort_key(name: &str) -> String {
    let prefix = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &name[prefix.len()..];
    if digits.is_empty() {
        return name.to_string();
    }
    format!("{prefix}{digits:0>width$}", width = PAD_WIDTH)
}

/// Sort names in natural order, ties broken by raw name.
pub fn sort_natural(names: &mut [String]) {
    names.sort_by_cached_key(|name| (sort_key(name), name.clone()));
}
