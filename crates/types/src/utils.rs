//! Utility functions and helpers

/// Strip every trailing `/` from a string
///
/// A string made only of slashes becomes empty.
pub fn trim_trailing_slashes(s: &str) -> &str {
    s.trim_end_matches('/')
}

/// Join a root URL and a route with exactly one `/` between them
///
/// Leading slashes on the route are dropped. An empty route yields the root.
pub fn join_route(root: &str, route: &str) -> String {
    let route = route.trim_start_matches('/');
    if route.is_empty() {
        return root.to_string();
    }
    format!("{}/{}", root, route)
}
