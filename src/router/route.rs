// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Static route table

use super::location::Location;
use crate::error::{Error, Result};

/// Redirect hops followed before a resolution is considered a loop
const MAX_REDIRECTS: usize = 10;

/// View a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Login form
    Login,
    /// Exam list
    ExamList,
    /// Exam-taking screen
    ExamTaking,
    /// Result screen
    ExamResult,
}

/// One entry of the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Path pattern: literal segments, `:name` parameters, or `*` for
    /// anything
    pub pattern: String,
    /// View rendered, `None` for pure redirects
    pub view: Option<View>,
    /// Static redirect target
    pub redirect: Option<String>,
    /// Whether the guard requires a session
    pub requires_auth: bool,
    /// Display title
    pub title: Option<String>,
}

impl Route {
    /// Route rendering `view`
    pub fn view(pattern: impl Into<String>, view: View) -> Self {
        Self {
            pattern: pattern.into(),
            view: Some(view),
            redirect: None,
            requires_auth: false,
            title: None,
        }
    }

    /// Route redirecting to `target`
    pub fn redirect(pattern: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            view: None,
            redirect: Some(target.into()),
            requires_auth: false,
            title: None,
        }
    }

    /// Require a session
    pub fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Set the display title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Match `location`; returns the captured parameters on success
    ///
    /// Literal segments compare ASCII case-insensitively. Captured
    /// parameters keep the case they were written in.
    pub fn matches(&self, location: &Location) -> Option<Vec<(String, String)>> {
        if self.pattern == "*" {
            return Some(Vec::new());
        }

        let pattern: Vec<&str> = self.pattern.split('/').filter(|s| !s.is_empty()).collect();
        let segments = location.segments();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (p, s) in pattern.iter().zip(segments.iter()) {
            if let Some(name) = p.strip_prefix(':') {
                params.push((name.to_string(), s.to_string()));
            } else if !p.eq_ignore_ascii_case(s) {
                return None;
            }
        }
        Some(params)
    }
}

/// A location matched against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The matched (non-redirect) route
    pub route: Route,
    /// The final location, parameters filled in
    pub location: Location,
    /// Locations passed through on static redirects
    pub redirected_from: Vec<Location>,
}

/// Ordered route table; first match wins
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Routes of the exam application
    pub fn exam_app() -> Self {
        Self::new()
            .route(Route::redirect("/", "/exams").requires_auth(true))
            .route(Route::view("/login", View::Login).title("登录"))
            .route(
                Route::view("/exams", View::ExamList)
                    .requires_auth(true)
                    .title("考试列表"),
            )
            .route(
                Route::view("/take/:id", View::ExamTaking)
                    .requires_auth(true)
                    .title("参加考试"),
            )
            .route(
                Route::view("/result/:id", View::ExamResult)
                    .requires_auth(true)
                    .title("考试结果"),
            )
            .route(Route::redirect("*", "/login"))
    }

    /// All routes in match order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve `location`, following static redirects
    ///
    /// The query of the original location is carried over a redirect whose
    /// target has none.
    pub fn resolve(&self, location: &Location) -> Result<Resolved> {
        let mut current = location.clone();
        let mut redirected_from = Vec::new();

        for _ in 0..=MAX_REDIRECTS {
            let (route, params) = self
                .routes
                .iter()
                .find_map(|r| r.matches(&current).map(|p| (r, p)))
                .ok_or_else(|| Error::navigation(format!("no route matches {}", current)))?;

            match route.redirect {
                Some(ref target) => {
                    let mut next = Location::parse(target);
                    if next.query.is_empty() {
                        next.query = current.query.clone();
                    }
                    redirected_from.push(current);
                    current = next;
                }
                None => {
                    current.params = params.into_iter().collect();
                    return Ok(Resolved {
                        route: route.clone(),
                        location: current,
                        redirected_from,
                    });
                }
            }
        }

        Err(Error::navigation(format!(
            "too many redirects resolving {}",
            location
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(path: &str) -> Resolved {
        RouteTable::exam_app().resolve(&Location::parse(path)).unwrap()
    }

    #[test]
    fn test_params() {
        let r = resolve("/take/12");
        assert_eq!(r.route.view, Some(View::ExamTaking));
        assert_eq!(r.location.param("id"), Some("12"));
        assert!(r.route.requires_auth);
    }

    #[test]
    fn test_root_redirects_to_exams() {
        let r = resolve("/");
        assert_eq!(r.location.path, "/exams");
        assert_eq!(r.route.view, Some(View::ExamList));
        assert_eq!(r.redirected_from, vec![Location::new("/")]);
    }

    #[test]
    fn test_unknown_path_falls_through_to_login() {
        let r = resolve("/nope/deeper?x=1");
        assert_eq!(r.location.path, "/login");
        assert_eq!(r.location.query_value("x"), Some("1"));
        assert!(!r.route.requires_auth);

        // too many segments for /take/:id
        assert_eq!(resolve("/take/1/2").location.path, "/login");
    }

    #[test]
    fn test_literal_segments_ignore_case() {
        let r = resolve("/Exams");
        assert_eq!(r.route.view, Some(View::ExamList));
        assert!(r.route.requires_auth);

        let r = resolve("/TAKE/Ab3");
        assert_eq!(r.route.view, Some(View::ExamTaking));
        assert_eq!(r.location.param("id"), Some("Ab3"));
    }

    #[test]
    fn test_trailing_slash() {
        assert_eq!(resolve("/exams/").route.view, Some(View::ExamList));
    }

    #[test]
    fn test_redirect_loop_is_error() {
        let table = RouteTable::new()
            .route(Route::redirect("/a", "/b"))
            .route(Route::redirect("/b", "/a"));
        let err = table.resolve(&Location::new("/a")).unwrap_err();
        assert!(matches!(err, Error::Navigation(_)));
    }

    #[test]
    fn test_no_match_is_error() {
        let table = RouteTable::new().route(Route::view("/login", View::Login));
        assert!(table.resolve(&Location::new("/exams")).is_err());
    }
}
