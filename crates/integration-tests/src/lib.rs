//! Integration test harness for the flower shop.
//!
//! Each test spawns the real router on an ephemeral port against private
//! in-memory databases, then drives it over HTTP with `reqwest`.
//!
//! ```bash
//! cargo test -p flowershop-integration-tests
//! ```

#![allow(clippy::missing_panics_doc)]

use reqwest::{Client, Response, multipart};

use flowershop_storefront::config::StorefrontConfig;
use flowershop_storefront::db::Database;
use flowershop_storefront::middleware::{create_session_layer, create_session_store};
use flowershop_storefront::routes;
use flowershop_storefront::state::AppState;

/// A running storefront plus a client that keeps cookies between requests.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub db: Database,
}

impl TestApp {
    /// Start a fresh server.
    pub async fn spawn() -> Self {
        let db = Database::in_memory().await.expect("Failed to open test database");
        let session_db = Database::in_memory()
            .await
            .expect("Failed to open session database");
        let store = create_session_store(&session_db)
            .await
            .expect("Failed to create session store");

        let config = StorefrontConfig::from_lookup(|_| None).expect("Default config is valid");
        let session_layer = create_session_layer(store, &config);
        let app = routes::app(AppState::new(config, db.clone()), session_layer);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let addr = listener.local_addr().expect("Listener has an address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: new_client(),
            db,
        }
    }

    /// Absolute URL for a path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second client with its own cookie jar.
    #[must_use]
    pub fn fresh_client(&self) -> Client {
        new_client()
    }

    pub async fn signup(&self, email: &str, full_name: &str, password: &str) -> Response {
        let form = multipart::Form::new()
            .text("email", email.to_owned())
            .text("full_name", full_name.to_owned())
            .text("password", password.to_owned());

        self.client
            .post(self.url("/signup"))
            .multipart(form)
            .send()
            .await
            .expect("Signup request failed")
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(self.url("/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .expect("Login request failed")
    }

    /// Sign up and log in with a throwaway account.
    pub async fn login_as_new_user(&self, email: &str) {
        let resp = self.signup(email, "Test User", "petals-and-thorns").await;
        assert!(resp.status().is_success(), "signup failed: {}", resp.status());
        let resp = self.login(email, "petals-and-thorns").await;
        assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
    }

    /// Create a flower and return its ID.
    pub async fn create_flower(&self, name: &str, quantity: i64, price: &str) -> i64 {
        let quantity = quantity.to_string();
        let resp = self
            .client
            .post(self.url("/flowers"))
            .form(&[("name", name), ("quantity", &quantity), ("price", price)])
            .send()
            .await
            .expect("Create flower request failed");
        assert!(resp.status().is_success(), "create failed: {}", resp.status());

        let body: serde_json::Value = resp.json().await.expect("Create response is JSON");
        body["flower_id"].as_i64().expect("flower_id is an integer")
    }

    pub async fn add_to_cart(&self, flower_id: i64) -> Response {
        self.client
            .post(self.url("/cart/items"))
            .form(&[("flower_id", flower_id.to_string())])
            .send()
            .await
            .expect("Add to cart request failed")
    }

    /// Number of purchase rows stored for a user.
    pub async fn purchase_count(&self, user_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM purchases WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.db.pool())
            .await
            .expect("Count query failed")
    }
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Value of the `name` cookie set by a response, if any.
#[must_use]
pub fn set_cookie_value(resp: &Response, name: &str) -> Option<String> {
    resp.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .filter_map(|h| h.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().to_owned())
}
