use crate::content::AppConfig;
use crate::views;

/// A navigable location and the view that renders it
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    /// Menu label
    pub label: &'static str,
    pub render: fn(&AppConfig) -> String,
    /// Mount the contact gate after rendering
    pub mounts_gate: bool,
}

/// The fixed route table. The first entry is the fallback for unknown paths.
pub const ROUTES: [Route; 4] = [
    Route {
        path: "/",
        label: "HOME",
        render: views::home,
        mounts_gate: false,
    },
    Route {
        path: "/projects",
        label: "CASE_FILES",
        render: views::projects,
        mounts_gate: false,
    },
    Route {
        path: "/skills",
        label: "VITALS",
        render: views::skills,
        mounts_gate: false,
    },
    Route {
        path: "/profile",
        label: "PROFILE",
        render: views::profile,
        mounts_gate: true,
    },
];

/// Exact-match lookup, falling back to the first route
pub fn resolve<'a>(routes: &'a [Route], path: &str) -> &'a Route {
    routes
        .iter()
        .find(|route| route.path == path)
        .unwrap_or(&routes[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        for route in &ROUTES {
            assert_eq!(resolve(&ROUTES, route.path).path, route.path);
        }
    }

    #[test]
    fn test_unknown_paths_fall_back() {
        for path in ["/nope", "", "/projects/", "/PROFILE", "projects", "/skills?x=1"] {
            assert_eq!(resolve(&ROUTES, path).path, "/");
        }
    }

    #[test]
    fn test_only_profile_mounts_gate() {
        let gated: Vec<_> = ROUTES.iter().filter(|r| r.mounts_gate).map(|r| r.path).collect();
        assert_eq!(gated, vec!["/profile"]);
    }
}
