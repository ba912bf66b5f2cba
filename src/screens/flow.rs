//! ScreenFlow: ties the navigator to per-screen state and encodes the
//! onboarding, auth, registration and home transitions.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::auth::{NewUserDetails, SignInForm, SignUpForm};
use crate::catalog::{Catalog, HomeFeed};
use crate::config::FlowConfig;
use crate::error::NavigationError;
use crate::geo::{GeolocationProvider, Region};
use crate::location::{LocationCaptureController, LocationCommit};
use crate::navigation::{Frame, Navigator, Route, RouteName, UserType};

/// How a sign-in attempt resolved. OTP checking itself is stubbed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// First visit: collect details, then the delivery location.
    NewUser,
    /// Known account: straight to the tabs.
    Returning,
}

/// Local state owned by one frame.
enum ScreenState {
    SignIn(SignInForm),
    SignUp(SignUpForm),
    NewUser(NewUserDetails),
    Location(Box<LocationCaptureController>),
    Home(HomeFeed),
}

/// The app's screen flow.
///
/// Holds the route stack plus the local state of each frame on it. State is
/// created when a frame is pushed and dropped when the frame is popped or
/// replaced, so a screen never sees state left behind by the one above it.
pub struct ScreenFlow {
    config: FlowConfig,
    geo: Arc<dyn GeolocationProvider>,
    catalog: Arc<dyn Catalog>,
    navigator: Navigator,
    screens: HashMap<Uuid, ScreenState>,
}

impl ScreenFlow {
    /// Start at the onboarding screen.
    pub fn new(
        config: FlowConfig,
        geo: Arc<dyn GeolocationProvider>,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        Self::with_entry(Route::Onboarding, config, geo, catalog)
    }

    pub fn with_entry(
        entry: Route,
        config: FlowConfig,
        geo: Arc<dyn GeolocationProvider>,
        catalog: Arc<dyn Catalog>,
    ) -> Self {
        let mut flow = Self {
            config,
            geo,
            catalog,
            navigator: Navigator::new(entry),
            screens: HashMap::new(),
        };
        let entry = flow.navigator.current().clone();
        flow.attach_state(&entry);
        flow
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn current(&self) -> &Frame {
        self.navigator.current()
    }

    pub fn current_name(&self) -> RouteName {
        self.navigator.current().name()
    }

    // ── Generic transitions ─────────────────────────────────────────

    /// Push any route. Screens without special wiring (reviews, wallet,
    /// checkout...) are reached this way.
    pub fn open(&mut self, route: Route) -> &Frame {
        self.push(route)
    }

    /// Back navigation. With only the entry frame left this is a no-op and
    /// returns `false`.
    pub fn back(&mut self) -> bool {
        match self.navigator.go_back() {
            Ok(popped) => {
                self.screens.remove(&popped.id);
                true
            }
            Err(e) => {
                debug!(error = %e, "Back ignored");
                false
            }
        }
    }

    fn push(&mut self, route: Route) -> &Frame {
        let frame = self.navigator.navigate(route).clone();
        self.attach_state(&frame);
        self.navigator.current()
    }

    fn swap(&mut self, route: Route) -> &Frame {
        let replaced = self.navigator.replace(route);
        self.screens.remove(&replaced.id);
        let frame = self.navigator.current().clone();
        self.attach_state(&frame);
        self.navigator.current()
    }

    fn attach_state(&mut self, frame: &Frame) {
        let state = match &frame.route {
            Route::SignIn => ScreenState::SignIn(SignInForm::default()),
            Route::SignUp => ScreenState::SignUp(SignUpForm::new()),
            Route::NewUserScreen => ScreenState::NewUser(NewUserDetails::default()),
            Route::LocationScreen => ScreenState::Location(Box::new(
                LocationCaptureController::new(Arc::clone(&self.geo), &self.config),
            )),
            Route::Home { .. } | Route::TabNavigator => ScreenState::Home(HomeFeed::default()),
            _ => return,
        };
        self.screens.insert(frame.id, state);
    }

    fn ensure_on(&self, expected: &[RouteName]) -> Result<(), NavigationError> {
        let actual = self.current_name();
        if expected.contains(&actual) {
            Ok(())
        } else {
            Err(wrong_screen(expected, actual))
        }
    }

    fn state_mut(&mut self) -> Option<&mut ScreenState> {
        let id = self.navigator.current().id;
        self.screens.get_mut(&id)
    }

    fn state(&self) -> Option<&ScreenState> {
        self.screens.get(&self.navigator.current().id)
    }

    // ── Onboarding ──────────────────────────────────────────────────

    pub fn onboarding_get_started(&mut self) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::Onboarding])?;
        Ok(self.push(Route::TabNavigator))
    }

    pub fn onboarding_sign_in(&mut self) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::Onboarding])?;
        Ok(self.push(Route::SignIn))
    }

    // ── Sign in ─────────────────────────────────────────────────────

    pub fn sign_in_form(&mut self) -> Result<&mut SignInForm, NavigationError> {
        let actual = self.current_name();
        match self.state_mut() {
            Some(ScreenState::SignIn(form)) => Ok(form),
            _ => Err(wrong_screen(&[RouteName::SignIn], actual)),
        }
    }

    /// "Proceed" on the sign-in screen.
    pub fn sign_in_proceed(
        &mut self,
        outcome: SignInOutcome,
    ) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::SignIn])?;
        let remember_me = self.sign_in_form()?.remember_me;
        info!(?outcome, remember_me, "Sign-in proceeding");
        let next = match outcome {
            SignInOutcome::NewUser => Route::NewUserScreen,
            SignInOutcome::Returning => Route::TabNavigator,
        };
        Ok(self.push(next))
    }

    pub fn sign_in_sign_up(&mut self) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::SignIn])?;
        Ok(self.push(Route::SignUp))
    }

    pub fn sign_in_forgot_password(&mut self) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::SignIn])?;
        Ok(self.push(Route::ForgotPassword))
    }

    // ── Sign up ─────────────────────────────────────────────────────

    pub fn sign_up_form(&mut self) -> Result<&mut SignUpForm, NavigationError> {
        let actual = self.current_name();
        match self.state_mut() {
            Some(ScreenState::SignUp(form)) => Ok(form),
            _ => Err(wrong_screen(&[RouteName::SignUp], actual)),
        }
    }

    /// "Sign up": carry the selected tab to phone verification.
    pub fn sign_up_submit(&mut self) -> Result<&Frame, NavigationError> {
        let user_type = self.sign_up_form()?.user_type();
        info!(%user_type, "Sign-up submitted");
        Ok(self.push(Route::VerifyYourPhoneNumber { user_type }))
    }

    /// "Already have an account? Sign in." Sign-up is not kept in history.
    pub fn sign_up_switch_to_sign_in(&mut self) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::SignUp])?;
        Ok(self.swap(Route::SignIn))
    }

    // ── Phone verification ──────────────────────────────────────────

    /// The `userType` param this verification screen was opened with.
    pub fn verify_phone_user_type(&self) -> Result<UserType, NavigationError> {
        match &self.current().route {
            Route::VerifyYourPhoneNumber { user_type } => Ok(*user_type),
            other => Err(wrong_screen(&[RouteName::VerifyYourPhoneNumber], other.name())),
        }
    }

    /// Confirm the phone code. The code is not checked.
    pub fn verify_phone_confirm(&mut self, code: &str) -> Result<&Frame, NavigationError> {
        let user_type = self.verify_phone_user_type()?;
        info!(%user_type, code_len = code.len(), "Phone verification accepted");
        Ok(self.push(Route::SignUpaccountCreated))
    }

    pub fn account_created_continue(&mut self) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::SignUpaccountCreated])?;
        Ok(self.push(Route::home()))
    }

    // ── New user details ────────────────────────────────────────────

    pub fn new_user_details(&mut self) -> Result<&mut NewUserDetails, NavigationError> {
        let actual = self.current_name();
        match self.state_mut() {
            Some(ScreenState::NewUser(details)) => Ok(details),
            _ => Err(wrong_screen(&[RouteName::NewUserScreen], actual)),
        }
    }

    /// "Save Details": details stay local, then on to the location picker.
    ///
    /// The new `LocationScreen` starts `Unresolved`; the caller follows up
    /// with [`location_start`](Self::location_start) to run its entry hook.
    pub fn new_user_save_details(&mut self) -> Result<&Frame, NavigationError> {
        let details = self.new_user_details()?.clone();
        info!(
            name = %details.name,
            email = %details.email,
            has_referral = !details.referral_code.is_empty(),
            "User details saved"
        );
        Ok(self.push(Route::LocationScreen))
    }

    // ── Location ────────────────────────────────────────────────────

    pub fn location(&self) -> Result<&LocationCaptureController, NavigationError> {
        match self.state() {
            Some(ScreenState::Location(ctl)) => Ok(&**ctl),
            _ => Err(wrong_screen(&[RouteName::LocationScreen], self.current_name())),
        }
    }

    pub fn location_mut(
        &mut self,
    ) -> Result<&mut LocationCaptureController, NavigationError> {
        let actual = self.current_name();
        match self.state_mut() {
            Some(ScreenState::Location(ctl)) => Ok(&mut **ctl),
            _ => Err(wrong_screen(&[RouteName::LocationScreen], actual)),
        }
    }

    /// Entry hook of the location screen: resolve the device position.
    ///
    /// Navigation is synchronous, so entering `LocationScreen` does not
    /// resolve anything by itself. Drivers call this once right after the
    /// screen becomes active, and again only when the user retries after a
    /// failure.
    pub async fn location_start(&mut self) -> crate::error::Result<Option<Region>> {
        let ctl = self.location_mut()?;
        Ok(ctl.start().await?)
    }

    /// "Save Location": commit the session and go to Home with the snapshot.
    pub fn save_location(&mut self) -> Result<LocationCommit, NavigationError> {
        let commit = self.location()?.commit();
        self.push(Route::Home {
            delivery: Some(commit.clone()),
        });
        Ok(commit)
    }

    // ── Home ────────────────────────────────────────────────────────

    /// Delivery location handed to the active Home frame, if any.
    pub fn delivery(&self) -> Option<&LocationCommit> {
        match &self.current().route {
            Route::Home { delivery } => delivery.as_ref(),
            _ => None,
        }
    }

    /// Load the product feed for the active Home frame.
    pub async fn home_load_feed(&mut self) -> Result<&HomeFeed, NavigationError> {
        self.ensure_on(&[RouteName::Home, RouteName::TabNavigator])?;
        let feed = HomeFeed::load(self.catalog.as_ref()).await;
        let actual = self.current_name();
        match self.state_mut() {
            Some(ScreenState::Home(slot)) => {
                *slot = feed;
                Ok(&*slot)
            }
            _ => Err(wrong_screen(&[RouteName::Home, RouteName::TabNavigator], actual)),
        }
    }

    pub fn home_feed(&self) -> Option<&HomeFeed> {
        match self.state() {
            Some(ScreenState::Home(feed)) => Some(feed),
            _ => None,
        }
    }

    /// Tap on a category tile.
    pub fn open_category(
        &mut self,
        category: impl Into<String>,
    ) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::Home, RouteName::TabNavigator])?;
        Ok(self.push(Route::Menulist {
            category: category.into(),
        }))
    }

    pub fn open_reviews(&mut self) -> Result<&Frame, NavigationError> {
        self.ensure_on(&[RouteName::Home, RouteName::TabNavigator])?;
        Ok(self.push(Route::Reviews))
    }

    #[cfg(test)]
    fn has_state(&self, frame_id: Uuid) -> bool {
        self.screens.contains_key(&frame_id)
    }
}

fn wrong_screen(expected: &[RouteName], actual: RouteName) -> NavigationError {
    NavigationError::WrongScreen {
        expected: expected
            .iter()
            .map(RouteName::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        actual: actual.to_string(),
    }
}
