//! Backend paths, relative to the configured base URL.

/// Credential login (plain client)
pub const LOGIN: &str = "/users/login";

/// Session termination
pub const LOGOUT: &str = "/users/logout";

/// Exchange the current token for a fresh one
pub const EXTEND: &str = "/users/extend";

/// Current user's profile
pub const PROFILE: &str = "/users";

/// Cart add (POST) and update (PATCH)
pub const CART: &str = "/users/cart";

/// Order creation from the current cart
pub const ORDERS: &str = "/orders";
