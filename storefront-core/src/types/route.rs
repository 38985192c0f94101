use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::Location;

/// 页面路由
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "camelCase")]
pub enum Route {
    /// `/` - category grid
    Home,
    /// `/all-products` - full listing or search results
    AllProducts,
    /// `/category/{id}`
    CategoryProducts { category_id: String },
    Login,
    Signup,
}

impl Route {
    /// Match a location path. Unknown paths yield `None`.
    pub fn parse(location: &Location) -> Option<Self> {
        match location.segments().as_slice() {
            [] => Some(Self::Home),
            ["all-products"] => Some(Self::AllProducts),
            // 路径段仍是百分号编码形式
            ["category", id] => Some(Self::CategoryProducts {
                category_id: urlencoding::decode(id)
                    .map_or_else(|_| (*id).to_string(), Cow::into_owned),
            }),
            ["login"] => Some(Self::Login),
            ["signup"] => Some(Self::Signup),
            _ => None,
        }
    }

    /// Listing routes require a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::Signup)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::AllProducts => "/all-products".to_string(),
            Self::CategoryProducts { category_id } => {
                format!("/category/{}", urlencoding::encode(category_id))
            }
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.path())
    }
}

/// Result of matching a location against the route table and the auth guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    /// Replace the current history entry with this location.
    Redirect(Location),
}

/// Match `location` and apply the auth guard.
pub fn resolve_route(location: &Location, authenticated: bool) -> RouteDecision {
    match Route::parse(location) {
        None => RouteDecision::Redirect(Route::Home.location()),
        Some(route) if route.is_protected() && !authenticated => {
            RouteDecision::Redirect(Route::Login.location())
        }
        Some(route) => RouteDecision::Render(route),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(link: &str) -> Location {
        Location::parse(link).unwrap()
    }

    #[test]
    fn known_paths() {
        assert_eq!(Route::parse(&loc("/")), Some(Route::Home));
        assert_eq!(Route::parse(&loc("/all-products?q=x")), Some(Route::AllProducts));
        assert_eq!(
            Route::parse(&loc("/category/7?name=Books")),
            Some(Route::CategoryProducts {
                category_id: "7".to_string()
            })
        );
        assert_eq!(Route::parse(&loc("/login")), Some(Route::Login));
        assert_eq!(Route::parse(&loc("/signup/")), Some(Route::Signup));
    }

    #[test]
    fn unknown_paths() {
        for link in ["/cart", "/category", "/category/1/reviews", "/all-products/2"] {
            assert_eq!(Route::parse(&loc(link)), None, "link = {link}");
        }
    }

    #[test]
    fn unknown_path_redirects_home() {
        assert_eq!(
            resolve_route(&loc("/nope"), true),
            RouteDecision::Redirect(Location::new("/"))
        );
    }

    #[test]
    fn guard_redirects_anonymous_users_to_login() {
        for link in ["/", "/all-products", "/category/2"] {
            assert_eq!(
                resolve_route(&loc(link), false),
                RouteDecision::Redirect(Location::new("/login")),
                "link = {link}"
            );
        }
    }

    #[test]
    fn public_routes_render_without_session() {
        assert_eq!(resolve_route(&loc("/login"), false), RouteDecision::Render(Route::Login));
        assert_eq!(resolve_route(&loc("/signup"), false), RouteDecision::Render(Route::Signup));
    }

    #[test]
    fn path_round_trip() {
        let route = Route::CategoryProducts {
            category_id: "12".to_string(),
        };
        assert_eq!(Route::parse(&route.location()), Some(route));
    }

    #[test]
    fn category_id_is_decoded_once() {
        let route = Route::parse(&loc("/category/a%20b?name=Books")).unwrap();
        assert_eq!(
            route,
            Route::CategoryProducts {
                category_id: "a b".to_string()
            }
        );
        assert_eq!(route.path(), "/category/a%20b");
        assert_eq!(Route::parse(&route.location()), Some(route));
    }
}
