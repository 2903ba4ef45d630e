//! Test-name normalization.

/// Normalize a user-supplied test name to `fully.qualified.Class.method`.
///
/// Accepts the JUnit display form `method(fully.qualified.Class)` as well
/// as the `Class#method` and `Class::method` spellings.
pub fn sanitize_test_name(name: &str) -> String {
    let name = name.trim();

    if let (Some(open), Some(close)) = (name.find('('), name.rfind(')')) {
        if close > open {
            let method = name[..open].trim();
            let class = name[open + 1..close].trim();
            if !method.is_empty() && !class.is_empty() {
                return format!("{class}.{method}");
            }
        }
    }

    name.replace("::", ".").replace('#', ".")
}
