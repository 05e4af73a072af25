//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Define the closed set of routes the proxy serves
//! - Resolve a (method, path) pair to exactly one route
//! - Describe capabilities for the root directory and 404 bodies
//!
//! # Design Decisions
//! - Exhaustive match, no fallthrough: unknown paths resolve to `Route::NotFound`
//! - Path matching is exact and case-sensitive
//! - Method-agnostic except for OPTIONS, which always resolves to preflight

use axum::http::Method;

/// One logical capability backed by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    RandomImages,
    Breeds,
    Search,
    Vote,
}

impl Capability {
    /// Every capability, in directory order.
    pub const ALL: [Capability; 4] = [
        Capability::RandomImages,
        Capability::Breeds,
        Capability::Search,
        Capability::Vote,
    ];

    /// Public path the capability is served on.
    pub fn path(self) -> &'static str {
        match self {
            Capability::RandomImages => "/cats/random",
            Capability::Breeds => "/cats/breeds",
            Capability::Search => "/cats/search",
            Capability::Vote => "/cats/vote",
        }
    }

    /// One-line description shown in the root directory.
    pub fn description(self) -> &'static str {
        match self {
            Capability::RandomImages => "Get random cat images (params: limit, breed_ids)",
            Capability::Breeds => "Get all cat breeds",
            Capability::Search => "Search cat images (params: limit, breed_ids, category_ids)",
            Capability::Vote => "Vote on a cat image (POST JSON body: image_id, value)",
        }
    }

    /// Message used in the error envelope when the upstream call fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Capability::RandomImages => "Failed to fetch random cats",
            Capability::Breeds => "Failed to fetch breeds",
            Capability::Search => "Failed to search cats",
            Capability::Vote => "Failed to submit vote",
        }
    }

    /// Whether the capability changes upstream state.
    pub fn is_write(self) -> bool {
        matches!(self, Capability::Vote)
    }

    /// Short label for logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Capability::RandomImages => "random",
            Capability::Breeds => "breeds",
            Capability::Search => "search",
            Capability::Vote => "vote",
        }
    }
}

/// Result of resolving a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight, answered locally.
    Preflight,
    /// Root directory of available routes.
    Index,
    /// A capability handler.
    Capability(Capability),
    /// No route matched.
    NotFound,
}

impl Route {
    /// Short label for logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Route::Preflight => "preflight",
            Route::Index => "index",
            Route::Capability(capability) => capability.label(),
            Route::NotFound => "not_found",
        }
    }
}

/// Resolve a method and path to a route.
pub fn resolve(method: &Method, path: &str) -> Route {
    if method == Method::OPTIONS {
        return Route::Preflight;
    }

    match path {
        "/" => Route::Index,
        "/cats/random" => Route::Capability(Capability::RandomImages),
        "/cats/breeds" => Route::Capability(Capability::Breeds),
        "/cats/search" => Route::Capability(Capability::Search),
        "/cats/vote" => Route::Capability(Capability::Vote),
        _ => Route::NotFound,
    }
}

/// Paths of every capability, as listed in 404 bodies.
pub fn available_routes() -> Vec<&'static str> {
    Capability::ALL.iter().map(|c| c.path()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_is_always_preflight() {
        assert_eq!(resolve(&Method::OPTIONS, "/cats/vote"), Route::Preflight);
        assert_eq!(resolve(&Method::OPTIONS, "/nowhere"), Route::Preflight);
        assert_eq!(resolve(&Method::OPTIONS, "/"), Route::Preflight);
    }

    #[test]
    fn test_capability_paths_round_trip() {
        for capability in Capability::ALL {
            assert_eq!(
                resolve(&Method::GET, capability.path()),
                Route::Capability(capability)
            );
        }
    }

    #[test]
    fn test_routing_ignores_method() {
        assert_eq!(
            resolve(&Method::DELETE, "/cats/breeds"),
            Route::Capability(Capability::Breeds)
        );
        assert_eq!(
            resolve(&Method::GET, "/cats/vote"),
            Route::Capability(Capability::Vote)
        );
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(resolve(&Method::GET, "/unknown-route"), Route::NotFound);
        assert_eq!(resolve(&Method::GET, "/cats"), Route::NotFound);
        assert_eq!(resolve(&Method::GET, "/cats/random/"), Route::NotFound);
        assert_eq!(resolve(&Method::GET, "/CATS/RANDOM"), Route::NotFound);
    }

    #[test]
    fn test_available_routes() {
        assert_eq!(
            available_routes(),
            vec!["/cats/random", "/cats/breeds", "/cats/search", "/cats/vote"]
        );
    }
}
