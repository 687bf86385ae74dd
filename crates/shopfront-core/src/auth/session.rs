use crate::models::{LoginResult, Profile};

/// Avatar service; the account name is appended to build a per-user image URL.
const AVATAR_BASE_URL: &str = "https://source.boringavatars.com/beam/120/";

/// Role flag carried by administrator accounts
pub const ADMIN_ROLE: i32 = 1;

/// The signed-in user's credential and profile summary.
///
/// An empty token means the session is anonymous, and then every other field
/// holds its zero value. Mutation goes through the crate-internal methods
/// below, which keep that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Session {
    token: String,
    account: String,
    role: i32,
    cart: i64,
}

impl Session {
    /// Anonymous session except for a persisted token.
    /// Profile fields are filled in by the next profile fetch.
    pub(crate) fn restored(token: String) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn role(&self) -> i32 {
        self.role
    }

    pub fn cart(&self) -> i64 {
        self.cart
    }

    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    pub fn avatar_url(&self) -> String {
        format!("{}{}", AVATAR_BASE_URL, self.account)
    }

    pub(crate) fn sign_in(&mut self, login: LoginResult) {
        if login.token.is_empty() {
            self.clear();
            return;
        }
        self.token = login.token;
        self.account = login.account;
        self.role = login.role;
        self.cart = login.cart;
    }

    /// Refresh the profile fields; ignored while anonymous.
    pub(crate) fn apply_profile(&mut self, profile: Profile) {
        if !self.is_logged_in() {
            return;
        }
        self.account = profile.account;
        self.role = profile.role;
        self.cart = profile.cart;
    }

    /// Swap in a renewed credential. An empty token is not a renewal, so it
    /// ends the session instead.
    pub(crate) fn renew_token(&mut self, token: String) {
        if token.is_empty() {
            self.clear();
        } else {
            self.token = token;
        }
    }

    pub(crate) fn set_cart(&mut self, cart: i64) {
        if self.is_logged_in() {
            self.cart = cart;
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> Session {
        let mut session = Session::default();
        session.sign_in(LoginResult {
            token: "T1".into(),
            account: "alice".into(),
            role: 1,
            cart: 3,
        });
        session
    }

    #[test]
    fn test_default_is_anonymous() {
        let session = Session::default();
        assert!(!session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(session.token(), "");
        assert_eq!(session.cart(), 0);
    }

    #[test]
    fn test_sign_in_and_derived_fields() {
        let session = signed_in();
        assert!(session.is_logged_in());
        assert!(session.is_admin());
        assert_eq!(session.account(), "alice");
        assert_eq!(session.cart(), 3);
        assert_eq!(
            session.avatar_url(),
            "https://source.boringavatars.com/beam/120/alice"
        );
    }

    #[test]
    fn test_sign_in_with_empty_token_stays_anonymous() {
        let mut session = signed_in();
        session.sign_in(LoginResult {
            token: String::new(),
            account: "mallory".into(),
            role: 1,
            cart: 9,
        });
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_renew_token_keeps_profile() {
        let mut session = signed_in();
        session.renew_token("T2".into());
        assert_eq!(session.token(), "T2");
        assert_eq!(session.account(), "alice");

        session.renew_token(String::new());
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_anonymous_session_ignores_profile_and_cart() {
        let mut session = Session::default();
        session.apply_profile(Profile {
            account: "alice".into(),
            role: 1,
            cart: 5,
        });
        session.set_cart(5);
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_restored_keeps_only_token() {
        let session = Session::restored("T1".into());
        assert!(session.is_logged_in());
        assert_eq!(session.account(), "");
        assert_eq!(session.role(), 0);
        assert_eq!(session.cart(), 0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = signed_in();
        session.clear();
        assert_eq!(session, Session::default());
    }
}
