//! Authentication route handlers.
//!
//! Login, signup and logout against the store API. Each POST builds a fresh
//! form controller from the posted fields, submits it once, and either
//! redirects or re-renders the page from the controller's state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::forms::{FormController, LoginForm, SignupForm, Submission};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::SessionUser;
use crate::routes::Nav;
use crate::state::AppState;

/// Raw posted fields, in document order.
pub type PostedFields = Vec<(String, String)>;

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub form: LoginForm,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub nav: Nav,
    pub form: SignupForm,
}

/// Status for a re-rendered form: 422 when nothing was sent upstream.
pub(crate) const fn rerender_status<T>(outcome: &Submission<T>) -> StatusCode {
    match outcome {
        Submission::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
        Submission::InFlight | Submission::Failed | Submission::Accepted(_) => StatusCode::OK,
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    LoginTemplate {
        nav: Nav::new(user.as_ref(), "/"),
        form: LoginForm::default(),
    }
}

/// Handle login form submission.
///
/// On success the identity and token go into the session and the visitor is
/// sent to the admin dashboard or the catalog depending on role.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(current): OptionalAuth,
    Form(fields): Form<PostedFields>,
) -> Result<Response> {
    let mut form = LoginForm::default();
    form.apply(fields);

    match form.submit(state.api()).await {
        Submission::Accepted(success) => {
            if success.token.is_none() {
                tracing::debug!("Login response carried no token");
            }

            let user = SessionUser {
                email: success.email,
                role: success.role,
            };
            set_current_user(&session, &user, success.token.as_ref()).await?;
            set_sentry_user(user.email.as_str(), user.role.as_str());
            add_breadcrumb("auth", "Logged in", Some(&[("role", user.role.as_str())]));

            Ok(Redirect::to(user.landing_path()).into_response())
        }
        outcome => {
            let status = rerender_status(&outcome);
            let page = LoginTemplate {
                nav: Nav::new(current.as_ref(), "/"),
                form,
            };
            Ok((status, page).into_response())
        }
    }
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    SignupTemplate {
        nav: Nav::new(user.as_ref(), "/signup"),
        form: SignupForm::default(),
    }
}

/// Handle signup form submission.
///
/// Success and failure both re-render the page with the controller's notice.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Form(fields): Form<PostedFields>,
) -> Response {
    let mut form = SignupForm::default();
    form.apply(fields);

    let outcome = form.submit(state.api()).await;
    if outcome.is_accepted() {
        add_breadcrumb("auth", "Signed up", Some(&[("role", form.role())]));
    }

    let page = SignupTemplate {
        nav: Nav::new(user.as_ref(), "/signup"),
        form,
    };
    (rerender_status(&outcome), page).into_response()
}

// =============================================================================
// Logout
// =============================================================================

/// Handle logout: drop the session and return to the login page.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    add_breadcrumb("auth", "Logged out", None);

    Ok(Redirect::to("/"))
}
