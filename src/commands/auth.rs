//! Authentication commands for the MealBuddy CLI.
//!
//! Provides login, logout, and status commands. The bearer token is kept in
//! the `auth.token` key of the config file.

use crate::config::{mask, Config, ConfigSource};
use clap::{Args, Subcommand};
use mealbuddy_core::{ApiError, HttpApi, Operation};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Authentication commands
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Log in with email and password
    ///
    /// The password is read from standard input and is echoed to the
    /// terminal as it is typed. Pipe it in to keep it off the screen.
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Log out (remove token from config)
    Logout,
    /// Show authentication status
    Status,
}

impl AuthCommand {
    pub async fn run(&self, config: &Config) -> Result<(), AuthError> {
        match &self.command {
            AuthSubcommand::Login { email } => login(config, email.clone()).await,
            AuthSubcommand::Logout => logout(config),
            AuthSubcommand::Status => status(config),
        }
    }
}

/// Errors that can occur during authentication
#[derive(Debug)]
pub enum AuthError {
    /// I/O error
    IoError(io::Error),
    /// Login was refused or the server could not be reached
    LoginFailed(String),
    /// Config file error
    ConfigError(String),
    /// No usable token for an authenticated command
    NotLoggedIn,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::IoError(e) => write!(f, "I/O error: {}", e),
            AuthError::LoginFailed(message) => write!(f, "{}", message),
            AuthError::ConfigError(e) => write!(f, "Config error: {}", e),
            AuthError::NotLoggedIn => {
                write!(f, "Not logged in. Run 'mealbuddy auth login' first.")
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl From<io::Error> for AuthError {
    fn from(e: io::Error) -> Self {
        AuthError::IoError(e)
    }
}

const PASSWORD_PROMPT: &str = "Password (input is visible): ";

fn prompt(label: &str) -> Result<String, AuthError> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn login(config: &Config, email: Option<String>) -> Result<(), AuthError> {
    let email = match email {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    let password = prompt(PASSWORD_PROMPT)?;

    if email.is_empty() || password.is_empty() {
        return Err(AuthError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Email and password are required",
        )));
    }

    let api = HttpApi::new(config.server_url.value.clone());
    let token = api
        .login(&email, &password)
        .await
        .map_err(login_failure)?;

    let config_path = config.file_path();
    save_token(&token.access_token, &config_path)?;
    println!("Logged in as {}", email);
    if config.token.source == ConfigSource::Environment {
        println!("Note: MEALBUDDY_TOKEN is set and takes precedence over the saved token.");
    }
    Ok(())
}

fn login_failure(err: ApiError) -> AuthError {
    let message = err
        .user_message(Operation::Login)
        .unwrap_or_else(|| err.to_string());
    AuthError::LoginFailed(message)
}

/// Writes `auth.token`, preserving the rest of the config file.
fn save_token(token: &str, config_path: &Path) -> Result<(), AuthError> {
    let mut config: serde_yaml::Value = if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| AuthError::ConfigError(e.to_string()))?;
        serde_yaml::from_str(&contents).map_err(|e| AuthError::ConfigError(e.to_string()))?
    } else {
        serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
    };

    let mapping = config
        .as_mapping_mut()
        .ok_or_else(|| AuthError::ConfigError("Invalid config format".to_string()))?;

    let auth_key = serde_yaml::Value::String("auth".to_string());
    if !mapping.get(&auth_key).is_some_and(|v| v.is_mapping()) {
        mapping.insert(
            auth_key.clone(),
            serde_yaml::Value::Mapping(serde_yaml::Mapping::new()),
        );
    }

    if let Some(auth_mapping) = mapping.get_mut(&auth_key).and_then(|v| v.as_mapping_mut()) {
        auth_mapping.insert(
            serde_yaml::Value::String("token".to_string()),
            serde_yaml::Value::String(token.to_string()),
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AuthError::ConfigError(e.to_string()))?;
    }

    let yaml = serde_yaml::to_string(&config).map_err(|e| AuthError::ConfigError(e.to_string()))?;
    std::fs::write(config_path, yaml).map_err(|e| AuthError::ConfigError(e.to_string()))?;

    Ok(())
}

/// Removes `auth.token` from the config file. Returns whether one was present.
fn remove_token(config_path: &Path) -> Result<bool, AuthError> {
    let contents =
        std::fs::read_to_string(config_path).map_err(|e| AuthError::ConfigError(e.to_string()))?;
    let mut yaml: serde_yaml::Value =
        serde_yaml::from_str(&contents).map_err(|e| AuthError::ConfigError(e.to_string()))?;

    let removed = yaml
        .as_mapping_mut()
        .and_then(|mapping| mapping.get_mut("auth"))
        .and_then(|auth| auth.as_mapping_mut())
        .and_then(|auth| auth.remove("token"))
        .is_some();

    let yaml_str =
        serde_yaml::to_string(&yaml).map_err(|e| AuthError::ConfigError(e.to_string()))?;
    std::fs::write(config_path, yaml_str).map_err(|e| AuthError::ConfigError(e.to_string()))?;

    Ok(removed)
}

fn logout(config: &Config) -> Result<(), AuthError> {
    let config_path = config.file_path();

    if !config_path.exists() {
        println!("Already logged out (no config file).");
        return Ok(());
    }

    if remove_token(&config_path)? {
        println!("Logged out.");
    } else {
        println!("Already logged out.");
    }
    if config.token.source == ConfigSource::Environment {
        println!("Note: MEALBUDDY_TOKEN is still set in the environment.");
    }
    Ok(())
}

fn status(config: &Config) -> Result<(), AuthError> {
    match &config.token.value {
        Some(token) => println!(
            "Logged in to {} (token: {}, source: {})",
            config.server_url.value,
            mask(token),
            config.token.source
        ),
        None => println!("Not logged in. Run 'mealbuddy auth login' to authenticate."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_token_creates_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.yaml");

        save_token("tok-123", &config_path).unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.token.value.as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_save_token_preserves_other_keys() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "server_url: https://meals.example.com\n").unwrap();

        save_token("tok-123", &config_path).unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.server_url.value, "https://meals.example.com");
        assert_eq!(config.token.value.as_deref(), Some("tok-123"));
    }

    #[test]
    fn test_remove_token() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        save_token("tok-123", &config_path).unwrap();

        assert!(remove_token(&config_path).unwrap());
        assert!(!remove_token(&config_path).unwrap());

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.token.value.is_none());
    }

    #[test]
    fn test_login_help_warns_password_is_echoed() {
        let mut cmd = <AuthCommand as clap::Args>::augment_args(clap::Command::new("auth"));
        let login = cmd
            .find_subcommand_mut("login")
            .expect("login subcommand")
            .render_long_help()
            .to_string();
        assert!(login.contains("echoed"));
        assert!(PASSWORD_PROMPT.contains("visible"));
    }

    #[test]
    fn test_login_failure_uses_detail() {
        let err = login_failure(ApiError::Rejected {
            status: 401,
            detail: Some("Incorrect email or password".to_string()),
        });
        assert_eq!(err.to_string(), "Incorrect email or password");

        let err = login_failure(ApiError::Transport("refused".to_string()));
        assert_eq!(err.to_string(), "An error occurred during login.");
    }
}
