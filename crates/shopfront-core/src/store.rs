//! Session store: the storefront's login, logout, cart and checkout actions.
//!
//! The store owns the `Session` and is the only writer of it. Each action
//! returns a typed result; turning that into a notice or a page change is
//! left to [`crate::feedback`].

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{endpoints, ApiClient, ApiError, ApiRequest, ApiResponse, HttpTransport, Transport};
use crate::auth::{Session, TokenStore};
use crate::models::{CartItem, LoginForm, LoginResult, Profile};

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Quantity must be greater than 0 (got {0})")]
    InvalidQuantity(i64),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request failed in a way that ended the session, and the store
    /// signed out. `logout_error` is set when the logout request itself
    /// failed; the local session is cleared either way.
    #[error("{source} (signed out)")]
    SessionEnded {
        source: ApiError,
        logout_error: Option<ApiError>,
    },
}

impl ActionError {
    /// Server-supplied explanation, if the failure carried one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ActionError::Api(e) => e.server_message(),
            ActionError::SessionEnded { source, .. } => source.server_message(),
            _ => None,
        }
    }

    /// Whether the store signed out as part of this failure and the logout
    /// request went through
    pub fn logged_out(&self) -> bool {
        matches!(
            self,
            ActionError::SessionEnded {
                logout_error: None,
                ..
            }
        )
    }
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;

pub struct SessionStore<T = HttpTransport> {
    api: ApiClient<T>,
    session: Session,
    storage: Box<dyn TokenStore + Send + Sync>,
    /// Token as last written to storage
    persisted: String,
}

impl<T: Transport> SessionStore<T> {
    /// Create the store, restoring a persisted token if there is one
    pub fn new(api: ApiClient<T>, storage: Box<dyn TokenStore + Send + Sync>) -> Self {
        let token = match storage.load() {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to load saved session, discarding it");
                if let Err(e) = storage.clear() {
                    warn!(error = %e, "Failed to discard saved session");
                }
                String::new()
            }
        };
        if !token.is_empty() {
            debug!("Restored saved session token");
        }

        Self {
            api,
            session: Session::restored(token.clone()),
            storage,
            persisted: token,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    /// Sign in with account and password through the plain client
    pub async fn login(&mut self, form: &LoginForm) -> ActionResult<()> {
        let result = self.try_login(form).await;
        match result {
            Ok(()) => info!(account = %self.session.account(), "Login successful"),
            Err(ref e) => warn!(error = %e, "Login failed"),
        }
        self.persist();
        result
    }

    async fn try_login(&mut self, form: &LoginForm) -> ActionResult<()> {
        let response = self.api.post(endpoints::LOGIN, form).await?;
        let login: LoginResult = response.result()?;
        if login.token.is_empty() {
            return Err(ApiError::InvalidResponse("Login returned an empty token".to_string()).into());
        }
        self.session.sign_in(login);
        Ok(())
    }

    /// End the session. The local session is cleared whatever the server says;
    /// the returned error only reports that the server call itself failed.
    pub async fn logout(&mut self) -> ActionResult<()> {
        self.sign_out().await.map_err(ActionError::from)
    }

    async fn sign_out(&mut self) -> Result<(), ApiError> {
        let result = self
            .api
            .authenticated(&mut self.session)
            .delete(endpoints::LOGOUT)
            .await;
        if let Err(ref e) = result {
            debug!(error = %e, "Logout request failed, clearing session anyway");
        }

        self.session.clear();
        self.persist();
        info!("Logged out");
        result.map(|_| ())
    }

    /// Send through the authenticated client. When the token cannot be
    /// extended the store signs out, and the error says so.
    async fn send_authenticated(&mut self, request: ApiRequest) -> ActionResult<ApiResponse> {
        let (result, revoked) = {
            let mut client = self.api.authenticated(&mut self.session);
            let result = client.send(request).await;
            (result, client.is_revoked())
        };

        match result {
            Err(source) if revoked => {
                warn!(error = %source, "Session expired, logging out");
                let logout_error = self.sign_out().await.err();
                Err(ActionError::SessionEnded {
                    source,
                    logout_error,
                })
            }
            result => Ok(result?),
        }
    }

    /// Add an item to the cart, returning the new cart count.
    /// Requires a session and a positive quantity; neither failure touches
    /// the network.
    pub async fn add_cart(&mut self, item: &CartItem) -> ActionResult<i64> {
        if !self.session.is_logged_in() {
            return Err(ActionError::NotLoggedIn);
        }
        if item.quantity <= 0 {
            return Err(ActionError::InvalidQuantity(item.quantity));
        }

        let result = self.try_add_cart(item).await;
        self.persist();
        result
    }

    async fn try_add_cart(&mut self, item: &CartItem) -> ActionResult<i64> {
        let request = ApiRequest::post(endpoints::CART).json(item)?;
        let response = self.send_authenticated(request).await?;
        let cart: i64 = response.result()?;
        self.session.set_cart(cart);
        debug!(cart, "Cart updated");
        Ok(cart)
    }

    /// Change a cart line. The session's cart count is left alone; callers
    /// re-read the cart themselves.
    pub async fn update_cart(&mut self, item: &CartItem) -> ActionResult<()> {
        let request = ApiRequest::patch(endpoints::CART).json(item)?;
        let result = self.send_authenticated(request).await;
        self.persist();
        result?;
        Ok(())
    }

    /// Turn the cart into an order
    pub async fn checkout(&mut self) -> ActionResult<()> {
        let result = self
            .send_authenticated(ApiRequest::post(endpoints::ORDERS))
            .await;
        if result.is_ok() {
            self.session.set_cart(0);
            info!("Order placed");
        }
        self.persist();
        result?;
        Ok(())
    }

    /// Re-read account, role and cart for the current token. Does nothing
    /// when signed out; any failure ends the session.
    pub async fn get_user(&mut self) -> ActionResult<()> {
        if !self.session.is_logged_in() {
            return Ok(());
        }

        match self.try_get_user().await {
            Ok(()) => {
                self.persist();
                Ok(())
            }
            // Already signed out by a failed refresh
            Err(e @ ActionError::SessionEnded { .. }) => Err(e),
            Err(e) => {
                warn!(error = %e, "Failed to fetch profile, logging out");
                let logout_error = self.sign_out().await.err();
                match e {
                    ActionError::Api(source) => Err(ActionError::SessionEnded {
                        source,
                        logout_error,
                    }),
                    other => Err(other),
                }
            }
        }
    }

    async fn try_get_user(&mut self) -> ActionResult<()> {
        let response = self
            .send_authenticated(ApiRequest::get(endpoints::PROFILE))
            .await?;
        let profile: Profile = response.result()?;
        self.session.apply_profile(profile);
        Ok(())
    }

    /// Write the token to storage if it changed since the last write
    fn persist(&mut self) {
        if self.session.token() == self.persisted {
            return;
        }

        let saved = if self.session.is_logged_in() {
            self.storage.save(self.session.token())
        } else {
            self.storage.clear()
        };
        match saved {
            Ok(()) => self.persisted = self.session.token().to_string(),
            Err(e) => warn!(error = %e, "Failed to save session"),
        }
    }
}
