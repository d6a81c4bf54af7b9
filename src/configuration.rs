use crate::domain::EmailAddress;
use crate::email_client::{EmailClient, EmailClientError};
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub contact: ContactSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Largest request body accepted by `POST /api/contact`.
    #[serde(
        default = "default_max_payload_bytes",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub max_payload_bytes: usize,
}

fn default_max_payload_bytes() -> usize {
    4 * 1024 * 1024
}

#[derive(serde::Deserialize, Debug)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: EmailAddress,
    #[serde(default)]
    pub sender_name: String,
    pub authorization_token: SecretString,
    #[serde(
        rename = "timeout_duration_millis",
        deserialize_with = "deserialize_duration_from_millis"
    )]
    pub timeout: Duration,
}

impl EmailClientSettings {
    pub fn client(self) -> Result<EmailClient, EmailClientError> {
        EmailClient::new(
            &self.base_url,
            self.sender_email,
            self.sender_name,
            self.authorization_token,
            self.timeout,
        )
    }
}

/// Where contact notifications are delivered.
#[derive(serde::Deserialize, Debug)]
pub struct ContactSettings {
    pub recipient_email: EmailAddress,
}

fn deserialize_duration_from_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let millis = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(millis))
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!("{} is not a valid environment", other)),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
