//! What the user sees after a store action: a notice and/or a page change.
//!
//! Kept apart from the store so the store stays free of presentation
//! concerns. A front end calls `Feedback::of` with the action and the error
//! (if any), then shows the notice and follows the route.

use std::fmt;

use crate::store::ActionError;

/// Fallback text when a failure carries no server message
pub const GENERIC_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Login,
    Logout,
    AddCart,
    UpdateCart,
    Checkout,
    GetUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Orders,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Orders => "/order",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub text: String,
}

impl Notice {
    fn success(text: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success",
            text: text.to_string(),
        }
    }

    fn error(text: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Failed",
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub notice: Option<Notice>,
    pub navigate: Option<Route>,
}

impl Feedback {
    fn show(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            navigate: None,
        }
    }

    fn then(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }

    pub fn of(action: Action, error: Option<&ActionError>) -> Self {
        match (action, error) {
            // The sign-out notice replaces whatever the action would have said
            (_, Some(e)) if e.logged_out() => Self::of(Action::Logout, None),

            (Action::Login, None) => Self::show(Notice::success("Logged in")).then(Route::Home),
            (Action::Login, Some(e)) => {
                Self::show(Notice::error(e.server_message().unwrap_or(GENERIC_ERROR)))
            }

            (Action::Logout, None) => Self::show(Notice::success("Logged out")).then(Route::Home),
            // Logout failures are not the user's problem; the session is gone either way
            (Action::Logout, Some(_)) => Self::default(),

            (Action::AddCart, None) => Self::show(Notice::success("Added to cart")),
            (Action::AddCart, Some(ActionError::NotLoggedIn)) => {
                Self::show(Notice::error("Please log in first")).then(Route::Login)
            }
            (Action::AddCart, Some(ActionError::InvalidQuantity(_))) => {
                Self::show(Notice::error("Quantity must be greater than 0"))
            }
            (Action::AddCart, Some(_)) => Self::show(Notice::error("Failed to add to cart")),

            (Action::UpdateCart, None) => Self::default(),
            (Action::UpdateCart, Some(_)) => Self::show(Notice::error("Failed to update cart")),

            (Action::Checkout, None) => {
                Self::show(Notice::success("Checkout complete")).then(Route::Orders)
            }
            (Action::Checkout, Some(_)) => Self::show(Notice::error("Checkout failed")),

            (Action::GetUser, None) => Self::default(),
            (Action::GetUser, Some(_)) => Self::default(),
        }
    }

    /// Convenience for callers holding the action's result
    pub fn for_result<T>(action: Action, result: &Result<T, ActionError>) -> Self {
        Self::of(action, result.as_ref().err())
    }
}
