use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{ENV_API_ENDPOINT, ENV_JWT_SECRET, StoredConfig, config_file_path};
use crate::error::AppResult;

const NOT_SET: &str = "<not set>";

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

/// A user-editable setting in [`StoredConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ApiEndpoint,
    JwtSecret,
}

impl Field {
    const ALL: [Field; 2] = [Field::ApiEndpoint, Field::JwtSecret];

    fn label(self) -> &'static str {
        match self {
            Field::ApiEndpoint => "Support API endpoint",
            Field::JwtSecret => "JWT signing secret",
        }
    }

    fn hint(self) -> Option<&'static str> {
        match self {
            Field::ApiEndpoint => Some("e.g., https://support.example.com/api"),
            Field::JwtSecret => None,
        }
    }

    fn env_var(self) -> &'static str {
        match self {
            Field::ApiEndpoint => ENV_API_ENDPOINT,
            Field::JwtSecret => ENV_JWT_SECRET,
        }
    }

    fn is_secret(self) -> bool {
        matches!(self, Field::JwtSecret)
    }

    fn slot(self, cfg: &mut StoredConfig) -> &mut Option<String> {
        match self {
            Field::ApiEndpoint => &mut cfg.api_endpoint,
            Field::JwtSecret => &mut cfg.jwt_secret,
        }
    }

    fn value(self, cfg: &StoredConfig) -> Option<&str> {
        let value = match self {
            Field::ApiEndpoint => cfg.api_endpoint.as_deref(),
            Field::JwtSecret => cfg.jwt_secret.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Value as printed by `config show`; secrets are redacted.
    fn shown(self, cfg: &StoredConfig) -> String {
        match self.value(cfg) {
            None => NOT_SET.to_string(),
            Some(value) if self.is_secret() => redact(value),
            Some(value) => value.to_string(),
        }
    }

    fn question(self, cfg: &StoredConfig) -> String {
        let label = match self.hint() {
            Some(hint) => format!("{} ({hint})", self.label()),
            None => self.label().to_string(),
        };
        match self.value(cfg) {
            None => format!("{label} (Enter to skip): "),
            Some(_) if self.is_secret() => {
                format!("{label} [****] (Enter to keep, '-' to clear): ")
            }
            Some(value) => format!("{label} [{value}] (Enter to keep, '-' to clear): "),
        }
    }
}

/// What the user asked to do with a setting in the wizard.
#[derive(Debug, PartialEq, Eq)]
enum Edit {
    Keep,
    Clear,
    Replace(String),
}

impl Edit {
    fn parse(input: &str) -> Self {
        match input.trim() {
            "" => Edit::Keep,
            "-" => Edit::Clear,
            value => Edit::Replace(value.to_string()),
        }
    }

    fn apply(self, slot: &mut Option<String>) {
        match self {
            Edit::Keep => {}
            Edit::Clear => *slot = None,
            Edit::Replace(value) => *slot = Some(value),
        }
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring ticketdash.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("Secrets are stored in the local config file; protect your filesystem accordingly.");
    println!();

    for field in Field::ALL {
        let edit = ask(&field.question(&cfg))?;
        edit.apply(field.slot(&mut cfg));
    }

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    for field in Field::ALL {
        println!(
            "{}: {}  (override: {})",
            field.label(),
            field.shown(&cfg),
            field.env_var()
        );
    }

    Ok(())
}

fn ask(question: &str) -> AppResult<Edit> {
    let mut stdout = io::stdout();
    write!(stdout, "{question}")?;
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(Edit::parse(&input))
}

fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 6 {
        return "***".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{head}***{tail}")
}
