//! Common utility functions shared across the codebase.

/// Converts a CamelCase name to snake_case for file names.
///
/// Every uppercase letter except a leading one gets a `_` in front of it and
/// is lowercased. Runs of capitals are not grouped.
///
/// # Examples
///
/// ```
/// use stubgen::utils::underscore_name;
///
/// assert_eq!(underscore_name("UserService"), "user_service");
/// assert_eq!(underscore_name("userService"), "user_service");
/// assert_eq!(underscore_name("HTTPApi"), "h_t_t_p_api");
/// ```
pub fn underscore_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
