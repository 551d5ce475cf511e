//! String utility functions.

/// Capitalizes the first character of a string.
///
/// # Examples
///
/// ```
/// use formsmith_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("checkbox"), "Checkbox");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Splits a comma-separated list, trimming each item and dropping empty ones.
///
/// # Examples
///
/// ```
/// use formsmith_core::utils::text::split_comma_list;
///
/// assert_eq!(split_comma_list(" Red, Green,, Blue "), vec!["Red", "Green", "Blue"]);
/// assert!(split_comma_list(" , ").is_empty());
/// ```
pub fn split_comma_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
