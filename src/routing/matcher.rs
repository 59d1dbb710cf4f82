//! Route matching module
//!
//! Implements path and header matching for handler routes.

use crate::config::{HandlerRoute, HeaderMatcher, RouteMatch};
use hyper::HeaderMap;

/// Find the first matching route for a given path and headers
pub fn match_route<'a>(
    path: &str,
    headers: &HeaderMap,
    routes: &'a [HandlerRoute],
) -> Option<&'a HandlerRoute> {
    routes
        .iter()
        .find(|route| matches_route_rule(&route.match_rule, path, headers))
}

/// Handler name assigned to a request, if any route matches
///
/// The name is returned exactly as configured.
pub fn resolve_handler<'a>(
    path: &str,
    headers: &HeaderMap,
    routes: &'a [HandlerRoute],
) -> Option<&'a str> {
    match_route(path, headers, routes).map(|route| route.handler.as_str())
}

/// Check if a path matches a route rule
pub fn match_path(rule: &RouteMatch, path: &str) -> bool {
    // Exact path match takes priority
    if let Some(exact) = &rule.path {
        return path == exact;
    }

    if let Some(prefix) = &rule.prefix {
        return path.starts_with(prefix);
    }

    // No path rule means match all
    true
}

/// Check if request matches a route rule (path + headers)
fn matches_route_rule(rule: &RouteMatch, path: &str, headers: &HeaderMap) -> bool {
    if !match_path(rule, path) {
        return false;
    }

    rule.headers
        .as_ref()
        .map_or(true, |matchers| match_headers(matchers, headers))
}

/// Check if headers match all header matchers
fn match_headers(matchers: &[HeaderMatcher], headers: &HeaderMap) -> bool {
    matchers.iter().all(|m| match_single_header(m, headers))
}

/// Check if a single header matcher is satisfied
fn match_single_header(matcher: &HeaderMatcher, headers: &HeaderMap) -> bool {
    // HeaderMap lookups are case-insensitive
    let header_value = headers
        .get(matcher.name.as_str())
        .and_then(|v| v.to_str().ok());

    if let Some(should_present) = matcher.present {
        if header_value.is_some() != should_present {
            return false;
        }
        // If we only check presence, we're done
        if matcher.exact.is_none() && matcher.prefix.is_none() {
            return true;
        }
    }

    let Some(value) = header_value else {
        return false;
    };

    if let Some(exact) = &matcher.exact {
        return value == exact;
    }

    if let Some(prefix) = &matcher.prefix {
        return value.starts_with(prefix);
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn make_route(prefix: Option<&str>, path: Option<&str>, handler: &str) -> HandlerRoute {
        HandlerRoute {
            name: None,
            match_rule: RouteMatch {
                prefix: prefix.map(String::from),
                path: path.map(String::from),
                headers: None,
            },
            handler: handler.to_string(),
        }
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_match_path_exact() {
        let rule = RouteMatch {
            path: Some("/about".to_string()),
            prefix: None,
            headers: None,
        };
        assert!(match_path(&rule, "/about"));
        assert!(!match_path(&rule, "/about/"));
        assert!(!match_path(&rule, "/about/team"));
    }

    #[test]
    fn test_match_path_prefix() {
        let rule = RouteMatch {
            path: None,
            prefix: Some("/foo".to_string()),
            headers: None,
        };
        assert!(match_path(&rule, "/foo"));
        assert!(match_path(&rule, "/foo/bar"));
        assert!(!match_path(&rule, "/bar"));
    }

    #[test]
    fn test_match_path_no_rule() {
        assert!(match_path(&RouteMatch::default(), "/anything"));
    }

    #[test]
    fn test_resolve_handler_first_match_wins() {
        let routes = vec![
            make_route(Some("/foo/admin"), None, "admin_handler"),
            make_route(Some("/foo"), None, "foo_handler"),
            make_route(None, None, "catch_all"),
        ];
        let empty = HeaderMap::new();

        assert_eq!(resolve_handler("/foo/admin/x", &empty, &routes), Some("admin_handler"));
        assert_eq!(resolve_handler("/foo/x", &empty, &routes), Some("foo_handler"));
        assert_eq!(resolve_handler("/other", &empty, &routes), Some("catch_all"));
    }

    #[test]
    fn test_resolve_handler_none() {
        let routes = vec![make_route(Some("/foo"), None, "foo_handler")];
        assert_eq!(resolve_handler("/bar", &HeaderMap::new(), &routes), None);
    }

    #[test]
    fn test_resolve_handler_keeps_configured_spelling() {
        let routes = vec![make_route(None, Some("/x"), "Foo_Handler")];
        assert_eq!(resolve_handler("/x", &HeaderMap::new(), &routes), Some("Foo_Handler"));
    }

    #[test]
    fn test_match_headers_exact() {
        let matchers = vec![HeaderMatcher {
            name: "X-Api-Key".to_string(),
            exact: Some("secret".to_string()),
            prefix: None,
            present: None,
        }];

        assert!(match_headers(&matchers, &headers(&[("x-api-key", "secret")])));
        assert!(!match_headers(&matchers, &headers(&[("x-api-key", "wrong")])));
        assert!(!match_headers(&matchers, &HeaderMap::new()));
    }

    #[test]
    fn test_match_header_present() {
        let matchers = vec![HeaderMatcher {
            name: "Authorization".to_string(),
            exact: None,
            prefix: None,
            present: Some(true),
        }];

        assert!(match_headers(&matchers, &headers(&[("authorization", "Bearer token")])));
        assert!(!match_headers(&matchers, &HeaderMap::new()));
    }

    #[test]
    fn test_match_header_absent() {
        let matchers = vec![HeaderMatcher {
            name: "X-Internal".to_string(),
            exact: None,
            prefix: None,
            present: Some(false),
        }];

        assert!(match_headers(&matchers, &HeaderMap::new()));
        assert!(match_headers(&matchers, &headers(&[("accept", "text/html")])));
        assert!(!match_headers(&matchers, &headers(&[("x-internal", "1")])));
    }

    #[test]
    fn test_match_header_prefix_routes_request() {
        let mut route = make_route(Some("/"), None, "foo_handler");
        route.match_rule.headers = Some(vec![HeaderMatcher {
            name: "accept".to_string(),
            exact: None,
            prefix: Some("text/".to_string()),
            present: None,
        }]);
        let routes = vec![route];

        assert_eq!(
            resolve_handler("/", &headers(&[("accept", "text/html")]), &routes),
            Some("foo_handler")
        );
        assert_eq!(
            resolve_handler("/", &headers(&[("accept", "application/json")]), &routes),
            None
        );
    }
}
