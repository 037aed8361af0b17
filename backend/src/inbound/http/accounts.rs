//! Account handlers: registration, login, logout, and the session view.
//!
//! ```text
//! GET  /register   pending notices for the registration form
//! POST /register   form fields: first_name, last_name, username, password,
//!                  confirm-password, email
//! GET  /login      pending notices for the login form
//! POST /login      form fields: username, password
//! GET  /logout     tear down the session
//! GET  /session    the authenticated account
//! ```
//!
//! Form flows follow the notice-and-redirect contract: recoverable failures
//! queue a flash notice and answer `303 See Other` back to the form, success
//! redirects onward. Only genuine store failures surface as the JSON error
//! envelope.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{AccountsQuery as _, LoginService as _, Registration as _};
use crate::domain::ports::RegistrationError;
use crate::domain::{
    Error, ErrorCode, LoginCredentials, RegistrationRequest, UserAccount,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Flash notices pending for a form page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageNotices {
    /// User-visible messages queued by a previous request, drained here.
    pub notices: Vec<String>,
}

/// Login form body for `POST /login`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginForm {
    /// Login name.
    pub username: String,
    /// Plaintext password; verified against the stored hash, never stored.
    pub password: String,
}

/// Registration form body for `POST /register`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterForm {
    /// Optional first name.
    #[serde(default)]
    pub first_name: String,
    /// Optional last name.
    #[serde(default)]
    pub last_name: String,
    /// Requested login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Confirmation copy of the password; the field name matches the HTML
    /// form control.
    #[serde(rename = "confirm-password")]
    pub confirm_password: String,
    /// Contact address.
    pub email: String,
}

/// The authenticated account, as exposed to the view layer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Stable account identifier.
    #[schema(value_type = String, example = "7d8f1a2e-4c6b-4b0a-9a3d-2f5e8c1b7d90")]
    pub id: String,
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Optional first name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Optional last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Administrative access flag.
    pub is_superuser: bool,
}

impl From<UserAccount> for AccountSummary {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id().to_string(),
            username: account.username().to_string(),
            email: account.email().to_string(),
            first_name: account.first_name().map(|name| name.as_ref().to_owned()),
            last_name: account.last_name().map(|name| name.as_ref().to_owned()),
            is_superuser: account.is_superuser(),
        }
    }
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn notice_redirect(session: &SessionContext, notice: &str, location: &str) -> ApiResult<HttpResponse> {
    session.push_notice(notice)?;
    Ok(see_other(location))
}

/// Pending notices for the login form.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login page payload", body = PageNotices),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "loginPage"
)]
#[get("/login")]
pub async fn login_page(session: SessionContext) -> ApiResult<web::Json<PageNotices>> {
    Ok(web::Json(PageNotices {
        notices: session.take_notices()?,
    }))
}

/// Authenticate a submitted username/password pair.
///
/// Success binds the account to the session and redirects to the catalog;
/// any credential failure queues the generic notice and redirects back, so
/// the response never reveals whether the username exists.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect: to / on success, back to /login with a notice on failure"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = match LoginCredentials::try_from_parts(&form.username, &form.password) {
        Ok(credentials) => credentials,
        Err(_) => return notice_redirect(&session, "invalid credentials", "/login"),
    };

    match state.login.authenticate(&credentials).await {
        Ok(user_id) => {
            session.persist_user(&user_id)?;
            Ok(see_other("/"))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            notice_redirect(&session, "invalid credentials", "/login")
        }
        Err(err) => Err(err),
    }
}

/// Pending notices for the registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Registration page payload", body = PageNotices),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "registerPage"
)]
#[get("/register")]
pub async fn register_page(session: SessionContext) -> ApiResult<web::Json<PageNotices>> {
    Ok(web::Json(PageNotices {
        notices: session.take_notices()?,
    }))
}

/// Create an account from the registration form.
///
/// Each rejection queues a notice naming the specific reason (mismatched
/// passwords, taken username, taken email, malformed field) and redirects
/// back to the form; success redirects to the login form.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect: to /login on success, back to /register with a notice on failure"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let request = match RegistrationRequest::try_from_parts(
        &form.first_name,
        &form.last_name,
        &form.username,
        &form.password,
        &form.confirm_password,
        &form.email,
    ) {
        Ok(request) => request,
        Err(err) => return notice_redirect(&session, &err.to_string(), "/register"),
    };

    match state.registration.register(request).await {
        Ok(_) => Ok(see_other("/login")),
        Err(RegistrationError::UsernameTaken) => {
            notice_redirect(&session, "username taken", "/register")
        }
        Err(RegistrationError::EmailTaken) => {
            notice_redirect(&session, "email taken", "/register")
        }
        Err(RegistrationError::Internal(err)) => Err(err),
    }
}

/// Tear down the current session and return to the catalog.
///
/// Always succeeds, with or without an active session.
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Redirect to /")
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    see_other("/")
}

/// The account bound to the current session.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Authenticated account", body = AccountSummary),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountSummary>> {
    let user_id = session.require_user_id()?;
    let account = state
        .accounts
        .find_account(&user_id)
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    Ok(web::Json(account.into()))
}

#[cfg(test)]
mod tests {
    //! End-to-end handler coverage over fixture ports.
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;

    use super::*;
    use crate::inbound::http::test_utils::test_session_middleware;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(HttpState::fixture()))
            .service(login_page)
            .service(login)
            .service(register_page)
            .service(register)
            .service(logout)
            .service(current_session)
    }

    fn location<B>(response: &actix_web::dev::ServiceResponse<B>) -> &str {
        response
            .headers()
            .get(actix_web::http::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("redirect location present")
    }

    fn session_cookie<B>(
        response: &actix_web::dev::ServiceResponse<B>,
    ) -> actix_web::cookie::Cookie<'static> {
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    async fn drain_notices<S, B>(
        app: &S,
        path: &str,
        cookie: actix_web::cookie::Cookie<'static>,
    ) -> Vec<String>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
        B::Error: std::fmt::Debug,
    {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::get()
                .uri(path)
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let payload: PageNotices = actix_test::read_body_json(response).await;
        payload.notices
    }

    #[actix_web::test]
    async fn successful_login_binds_session_and_redirects_home() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form([("username", "admin"), ("password", "password")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        let cookie = session_cookie(&response);

        let session_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(session_res.status(), StatusCode::OK);
        let summary: AccountSummary = actix_test::read_body_json(session_res).await;
        assert_eq!(summary.username, "admin");
        assert!(summary.is_superuser);
    }

    #[rstest]
    #[case("admin", "wrong-password")]
    #[case("ghost", "password")]
    #[case("", "password")]
    #[actix_web::test]
    async fn failed_login_redirects_back_with_generic_notice(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form([("username", username), ("password", password)])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        let cookie = session_cookie(&response);

        let notices = drain_notices(&app, "/login", cookie).await;
        assert_eq!(notices, ["invalid credentials"]);
    }

    #[actix_web::test]
    async fn failed_login_does_not_establish_a_session() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form([("username", "admin"), ("password", "wrong")])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&response);

        let session_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/session")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(session_res.status(), StatusCode::UNAUTHORIZED);
    }

    fn register_form(
        username: &str,
        password: &str,
        confirm: &str,
        email: &str,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("first_name", "Ada".to_owned()),
            ("last_name", "Lovelace".to_owned()),
            ("username", username.to_owned()),
            ("password", password.to_owned()),
            ("confirm-password", confirm.to_owned()),
            ("email", email.to_owned()),
        ]
    }

    #[actix_web::test]
    async fn successful_registration_redirects_to_login() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_form(register_form("ada", "secret", "secret", "ada@example.com"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
    }

    #[rstest]
    #[case("ada", "secret", "different", "ada@example.com", "passwords do not match")]
    #[case("admin", "secret", "secret", "ada@example.com", "username taken")]
    #[case("ada", "secret", "secret", "admin@example.com", "email taken")]
    #[case("ada", "secret", "secret", "not-an-email", "email must be a valid address")]
    #[actix_web::test]
    async fn rejected_registration_queues_the_specific_notice(
        #[case] username: &str,
        #[case] password: &str,
        #[case] confirm: &str,
        #[case] email: &str,
        #[case] expected_notice: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/register")
                .set_form(register_form(username, password, confirm, email))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/register");
        let cookie = session_cookie(&response);

        let notices = drain_notices(&app, "/register", cookie).await;
        assert_eq!(notices, [expected_notice]);
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let app = actix_test::init_service(test_app()).await;

        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/login")
                .set_form([("username", "admin"), ("password", "password")])
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&login_res);

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&logout_res), "/");
        let cleared_cookie = session_cookie(&logout_res);

        let session_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/session")
                .cookie(cleared_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(session_res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_without_a_session_still_redirects_home() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/logout").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
    }

    #[actix_web::test]
    async fn session_view_requires_authentication() {
        let app = actix_test::init_service(test_app()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/session").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
