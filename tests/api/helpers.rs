use once_cell::sync::Lazy;
use portfolio_contact::email_client::SendEmailRequest;
use portfolio_contact::get_configuration;
use portfolio_contact::startup::Application;
use portfolio_contact::telemetry::{get_subscriber, init_subscriber};
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub recipient: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_contact_raw(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/contact", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// The JSON body of the first email the app tried to send.
    pub async fn first_notification(&self) -> serde_json::Value {
        let requests = self
            .email_server
            .received_requests()
            .await
            .expect("Request recording is disabled");
        let request = requests.first().expect("No email was dispatched");
        let _: SendEmailRequest =
            serde_json::from_slice(&request.body).expect("Invalid email request body");
        serde_json::from_slice(&request.body).unwrap()
    }
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

async fn spawn_app_impl(max_payload_bytes_override: Option<usize>) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = 0;
        c.email_client.base_url = email_server.uri();
        c.email_client.timeout = std::time::Duration::from_millis(500);
        if let Some(limit) = max_payload_bytes_override {
            c.application.max_payload_bytes = limit;
        }
        c
    };
    let recipient = configuration.contact.recipient_email.to_string();

    let application = Application::build(configuration)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        email_server,
        recipient,
        api_client: reqwest::Client::new(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_impl(None).await
}

pub async fn spawn_app_with_payload_limit(max_payload_bytes: usize) -> TestApp {
    spawn_app_impl(Some(max_payload_bytes)).await
}

pub fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Jo",
        "email": "jo@example.com",
        "message": "Hello"
    })
}
