use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::routes::{ContactRecipient, contact, health_check};
use actix_web::dev::Server;
use actix_web::web::{Data, PayloadConfig};
use actix_web::{App, HttpServer};
use anyhow::Context;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = configuration
            .email_client
            .client()
            .context("Failed to build the email client")?;
        let recipient = ContactRecipient(configuration.contact.recipient_email);

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener =
            TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}"))?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            email_client,
            recipient,
            configuration.application.max_payload_bytes,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    recipient: ContactRecipient,
    max_payload_bytes: usize,
) -> Result<Server, std::io::Error> {
    let email_client = Data::new(email_client);
    let recipient = Data::new(recipient);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(PayloadConfig::new(max_payload_bytes))
            .app_data(email_client.clone())
            .app_data(recipient.clone())
            .service(health_check)
            .service(contact)
    })
    .listen(listener)?
    .run();
    Ok(server)
}
