//! Client-side route model and the fail-closed navigation guard.

/// Admin area pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPage {
    Dashboard,
    Students,
    Alumni,
}

/// Navigable routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Assessment,
    Profile,
    Admin(AdminPage),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Assessment => "/assessment",
            Route::Profile => "/profile",
            Route::Admin(AdminPage::Dashboard) => "/admin/dashboard",
            Route::Admin(AdminPage::Students) => "/admin/students",
            Route::Admin(AdminPage::Alumni) => "/admin/alumni",
        }
    }

    /// Everything except the login view requires an authenticated session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

/// Outcome of resolving a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

/// Resolves a requested path against the authentication state.
///
/// Unauthenticated access to a protected route redirects to login, and so
/// does any unknown path. Denying by default means a typo can never land
/// on a protected view.
pub fn resolve(path: &str, authenticated: bool) -> Resolution {
    let normalized = path.trim_end_matches('/');
    let normalized = if normalized.is_empty() {
        "/"
    } else {
        normalized
    };

    let route = match normalized {
        "/" if authenticated => return Resolution::Redirect(Route::Dashboard),
        "/login" => Route::Login,
        "/dashboard" => Route::Dashboard,
        "/assessment" => Route::Assessment,
        "/profile" => Route::Profile,
        "/admin" if authenticated => {
            return Resolution::Redirect(Route::Admin(AdminPage::Dashboard));
        }
        "/admin/dashboard" => Route::Admin(AdminPage::Dashboard),
        "/admin/students" => Route::Admin(AdminPage::Students),
        "/admin/alumni" => Route::Admin(AdminPage::Alumni),
        _ => return Resolution::Redirect(Route::Login),
    };

    if route.is_protected() && !authenticated {
        Resolution::Redirect(Route::Login)
    } else {
        Resolution::Render(route)
    }
}

/// Landing route after a successful login.
///
/// Students who have not completed the assessment land on the wizard;
/// everyone else lands on the dashboard.
pub fn post_login_route(is_student: bool, assessment_completed: bool) -> Route {
    if is_student && !assessment_completed {
        Route::Assessment
    } else {
        Route::Dashboard
    }
}
