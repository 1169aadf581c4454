use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    routing::get,
    Extension, Router,
};
use clipper_api::middleware::{admin_gate_middleware, AdminIdentity};
use clipper_api::{app, auth, AppState, SessionSettings};
use clipper_core::{
    BoxError, InMemoryMailer, InMemorySink, MailRoute, Mailer, OutboundMail, RecordLog, SingleAccountVerifier,
};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// Drives the router like a browser would: one cookie jar, one request at a time.
struct Browser {
    app: Router,
    sink: Arc<InMemorySink>,
    mailer: Arc<InMemoryMailer>,
    cookie: Option<String>,
}

struct Page {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

fn test_state(sink: Arc<InMemorySink>, mailer: Arc<dyn Mailer>) -> AppState {
    AppState::new(
        sink,
        Arc::new(SingleAccountVerifier::default()),
        mailer,
        MailRoute {
            from: "website@clipper.test".to_string(),
            to: "bookings@clipper.test".to_string(),
        },
        SessionSettings {
            cookie_name: "clipper_session".to_string(),
            secure: false,
        },
    )
}

impl Browser {
    fn new() -> Self {
        let sink = Arc::new(InMemorySink::new());
        let mailer = Arc::new(InMemoryMailer::new());
        let app = app(test_state(sink.clone(), mailer.clone()));
        Self::over(app, sink, mailer)
    }

    fn over(app: Router, sink: Arc<InMemorySink>, mailer: Arc<InMemoryMailer>) -> Self {
        Self {
            app,
            sink,
            mailer,
            cookie: None,
        }
    }

    async fn send(&mut self, mut req: Request<Body>) -> Page {
        if let Some(cookie) = &self.cookie {
            req.headers_mut().insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.app.clone().oneshot(req).await.unwrap();
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Page {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn get(&mut self, path: &str) -> Page {
        self.send(Request::get(path).body(Body::empty()).unwrap()).await
    }

    async fn post_form(&mut self, path: &str, form: &str) -> Page {
        let req = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(req).await
    }
}

const FULL_APPOINTMENT: &str =
    "customer_name=Alice&customer_phone=555-1234&appointment_date=2024-01-01&appointment_time=10%3A00&barber=Bob";

fn assert_shows_login(page: &Page) {
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("action=\"/login/attempt\""));
    assert!(!page.body.contains("admin-welcome"));
}

#[tokio::test]
async fn test_static_pages_greet_strangers() {
    let mut browser = Browser::new();

    for path in ["/", "/about", "/contacts", "/contacts/messages", "/lorem", "/login/form", "/color_picker_form"] {
        let page = browser.get(path).await;
        assert_eq!(page.status, StatusCode::OK, "{}", path);
        assert!(page.body.contains("Hello stranger"), "{}", path);
    }
}

#[tokio::test]
async fn test_anonymous_admin_visit_renders_login_with_warning() {
    let mut browser = Browser::new();

    let page = browser.get("/admin").await;
    assert_shows_login(&page);
    assert!(page.body.contains("you must log in"));
    assert!(page.body.contains("bg-warning"));
    assert!(browser.cookie.is_some());
}

// "/admin" is also the default landing page; the test below uses a second
// gated path to show the blocked path itself is remembered.
#[tokio::test]
async fn test_login_after_blocked_visit_returns_to_admin() {
    let mut browser = Browser::new();
    browser.get("/admin").await;

    let page = browser.post_form("/login/attempt", "username=admin&password=admin").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.headers.get(header::LOCATION).unwrap(), "/admin");

    let page = browser.get("/admin").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Welcome back, admin."));
}

#[tokio::test]
async fn test_login_returns_to_the_gated_path_that_was_blocked() {
    let sink = Arc::new(InMemorySink::new());
    let mailer = Arc::new(InMemoryMailer::new());
    let state = test_state(sink.clone(), mailer.clone());
    let reports = Router::new()
        .route(
            "/admin/reports",
            get(|Extension(AdminIdentity(identity)): Extension<AdminIdentity>| async move {
                format!("Reports for {}", identity)
            }),
        )
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), admin_gate_middleware))
        .merge(auth::routes())
        .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
        .with_state(state);
    let mut browser = Browser::over(reports, sink, mailer);

    assert_shows_login(&browser.get("/admin/reports").await);

    let page = browser.post_form("/login/attempt", "username=admin&password=admin").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.headers.get(header::LOCATION).unwrap(), "/admin/reports");

    let page = browser.get("/admin/reports").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body, "Reports for admin");
}

#[tokio::test]
async fn test_wrong_credentials_keep_visitor_out() {
    let mut browser = Browser::new();
    browser.get("/admin").await;

    for form in ["username=admin&password=nope", "username=root&password=admin", "username=&password="] {
        let page = browser.post_form("/login/attempt", form).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Wrong username or password"));
        assert!(page.body.contains("bg-danger"));
    }

    assert_shows_login(&browser.get("/admin").await);

    // The remembered destination survives failed attempts
    let page = browser.post_form("/login/attempt", "username=admin&password=admin").await;
    assert_eq!(page.headers.get(header::LOCATION).unwrap(), "/admin");
}

#[tokio::test]
async fn test_logout_blocks_admin_again() {
    let mut browser = Browser::new();
    browser.post_form("/login/attempt", "username=admin&password=admin").await;
    assert!(browser.get("/").await.body.contains(">admin<"));

    let page = browser.get("/logout").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Hello stranger"));

    assert_shows_login(&browser.get("/admin").await);
}

#[tokio::test]
async fn test_appointment_is_appended_to_customers_log() {
    let mut browser = Browser::new();

    let page = browser.post_form("/appointment/submit", FULL_APPOINTMENT).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Success!"));

    let lines = browser.sink.lines(RecordLog::Customers);
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 1);
    let record = object.values().next().unwrap();
    assert_eq!(record["name"], "Alice");
    assert_eq!(record["phone"], "555-1234");
    assert_eq!(record["date"], "2024-01-01");
    assert_eq!(record["time"], "10:00");
    assert_eq!(record["barber"], "Bob");

    browser.post_form("/appointments/submit", FULL_APPOINTMENT).await;
    assert_eq!(browser.sink.lines(RecordLog::Customers).len(), 2);
}

#[tokio::test]
async fn test_incomplete_validation_form_is_shown_again() {
    let mut browser = Browser::new();

    let page = browser
        .post_form("/serverside_validation_form/submit", "customer_name=Alice&customer_phone=")
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Looks good!"));
    assert!(page.body.contains("Please enter a phone number we can reach you on."));
    assert!(page.body.contains("Please choose a barber."));
    assert!(page.body.contains("value=\"Alice\""));
    assert!(browser.sink.lines(RecordLog::CustomersSvf).is_empty());

    let page = browser.post_form("/serverside_validation_form/submit", FULL_APPOINTMENT).await;
    assert!(page.body.contains("Success!"));
    assert_eq!(browser.sink.lines(RecordLog::CustomersSvf).len(), 1);
    assert!(browser.sink.lines(RecordLog::Customers).is_empty());
}

#[tokio::test]
async fn test_message_is_logged_and_mailed() {
    let mut browser = Browser::new();

    let page = browser
        .post_form("/contacts/messages/submit", "email=carol%40example.com&message=Do+you+take+walk-ins%3F")
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("carol@example.com"));

    let lines = browser.sink.lines(RecordLog::Messages);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Do you take walk-ins?"));

    let outbox = browser.mailer.outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].reply_to.as_deref(), Some("carol@example.com"));
    assert_eq!(outbox[0].to, "bookings@clipper.test");
    assert_eq!(outbox[0].body, "Do you take walk-ins?");
}

struct DownMailer;

#[async_trait]
impl Mailer for DownMailer {
    async fn deliver(&self, _mail: &OutboundMail) -> Result<(), BoxError> {
        Err("relay unreachable".into())
    }
}

#[tokio::test]
async fn test_mail_failure_is_500_after_message_is_logged() {
    let sink = Arc::new(InMemorySink::new());
    let app = app(test_state(sink.clone(), Arc::new(DownMailer)));
    let mut browser = Browser::over(app, sink, Arc::new(InMemoryMailer::new()));

    let page = browser
        .post_form("/contacts/messages/submit", "email=carol%40example.com&message=Still+open%3F")
        .await;
    assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(page.body, "<h1>Internal Server Error</h1>");
    assert!(!page.body.contains("relay unreachable"));

    let lines = browser.sink.lines(RecordLog::Messages);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Still open?"));
}

#[tokio::test]
async fn test_message_with_malformed_email_is_still_accepted() {
    let mut browser = Browser::new();

    let page = browser
        .post_form("/contacts/messages/submit", "email=carol+at+example.com&message=hi")
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(browser.sink.lines(RecordLog::Messages).len(), 1);
    assert_eq!(browser.mailer.outbox().len(), 1);
}

#[tokio::test]
async fn test_color_picker_echoes_choice_without_logging() {
    let mut browser = Browser::new();

    let page = browser.post_form("/color_picker_form/submit", "color=%23ff8800").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("#ff8800"));
    assert!(browser.sink.lines(RecordLog::Customers).is_empty());
    assert!(browser.sink.lines(RecordLog::Messages).is_empty());
}

#[tokio::test]
async fn test_color_picker_refuses_anything_but_hex() {
    let mut browser = Browser::new();

    let page = browser
        .post_form("/color_picker_form/submit", "color=red%3Bbackground-image%3Aurl(x)")
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Please pick a colour in #rrggbb form."));
    assert!(!page.body.contains("background-image"));
    assert!(page.body.contains("action=\"/color_picker_form/submit\""));
}
