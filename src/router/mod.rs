//! Route table and the navigation guard.
//!
//! ARCHITECTURE
//! ============
//! `evaluate` is the pure decision over a destination and an authentication
//! flag. `RouteGuard` adds the one side effect the guard is allowed: lazily
//! restoring the session before the first decision. The Leptos component in
//! `components::route_gate` runs the guard on every navigation.


use crate::config::CALLBACK_PATH;
use crate::state::session::SessionStore;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const ABOUT_PATH: &str = "/about";
/// Query parameter carrying the originally requested path.
pub const REDIRECT_PARAM: &str = "redirect";

/// Static route metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    pub path: &'static str,
    pub requires_auth: bool,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef { name: "home", path: HOME_PATH, requires_auth: true },
    RouteDef { name: "login", path: LOGIN_PATH, requires_auth: false },
    RouteDef { name: "auth-callback", path: CALLBACK_PATH, requires_auth: false },
    RouteDef { name: "about", path: ABOUT_PATH, requires_auth: false },
];

/// Look up the route registered for `path`, ignoring a trailing slash.
#[must_use]
pub fn find_route(path: &str) -> Option<&'static RouteDef> {
    let path = normalize_path(path);
    ROUTES.iter().find(|r| r.path == path)
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { HOME_PATH } else { trimmed }
}

/// A navigation target split into path and decoded query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub path: String,
    pub query: Vec<(String, String)>,
    full_path: String,
}

impl Destination {
    /// Parse a router-relative path such as `/login?redirect=%2Fabout`.
    #[must_use]
    pub fn parse(full_path: &str) -> Self {
        let full_path = if full_path.starts_with('/') { full_path.to_owned() } else { format!("/{full_path}") };
        match url::Url::parse(&format!("http://localhost{full_path}")) {
            Ok(url) => Self {
                path: url.path().to_owned(),
                query: url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect(),
                full_path,
            },
            Err(_) => Self { path: full_path.clone(), query: Vec::new(), full_path },
        }
    }

    /// The path as originally requested, query included.
    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn requires_auth(&self) -> bool {
        find_route(&self.path).is_some_and(|r| r.requires_auth)
    }

    #[must_use]
    pub fn is_login(&self) -> bool {
        normalize_path(&self.path) == LOGIN_PATH
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Decide what to do with a navigation to `dest`.
#[must_use]
pub fn evaluate(dest: &Destination, authenticated: bool) -> GuardDecision {
    if dest.requires_auth() && !authenticated {
        return GuardDecision::Redirect(login_redirect(dest.full_path()));
    }
    if dest.is_login() && authenticated {
        return GuardDecision::Redirect(safe_redirect_target(dest.query_value(REDIRECT_PARAM)));
    }
    GuardDecision::Allow
}

/// `/login?redirect=…` preserving `full_path`.
#[must_use]
pub fn login_redirect(full_path: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(REDIRECT_PARAM, full_path)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Where to send a user after sign-in. Only same-origin absolute paths are
/// honored; anything else falls back to home.
#[must_use]
pub fn safe_redirect_target(raw: Option<&str>) -> String {
    match raw {
        Some(target) if target.starts_with('/') && !target.starts_with("//") && !target.contains('\\') => {
            target.to_owned()
        }
        _ => HOME_PATH.to_owned(),
    }
}

/// Runs before every navigation.
#[derive(Clone)]
pub struct RouteGuard {
    session: SessionStore,
}

impl RouteGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// Restore the session if no access token is held, then decide.
    pub async fn before_each(&self, full_path: &str) -> GuardDecision {
        if !self.session.has_access_token() {
            self.session.initialize_auth().await;
        }
        let dest = Destination::parse(full_path);
        let decision = evaluate(&dest, self.session.is_authenticated());
        if let GuardDecision::Redirect(to) = &decision {
            log::debug!("guard: {} -> {to}", dest.full_path());
        }
        decision
    }
}
