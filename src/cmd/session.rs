use std::io::{self, Write};

use clap::Args;

use crate::context::AppContext;
use crate::domain::user::{Credentials, Registration};
use crate::error::{AppError, AppResult};
use crate::workflow::session::{current_user, sign_in, sign_out, sign_up};

#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Account email address.
    #[arg(short, long)]
    pub email: Option<String>,
    /// Account password; prompted for when omitted.
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Display name for the new account.
    #[arg(short, long)]
    pub name: Option<String>,
    /// Email address to register.
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password for the new account; prompted for when omitted.
    #[arg(short, long)]
    pub password: Option<String>,
}

pub async fn login(ctx: &AppContext, args: LoginArgs) -> AppResult<()> {
    let credentials = Credentials {
        email: value_or_prompt(args.email, "Email")?,
        password: value_or_prompt(args.password, "Password")?,
    };

    match sign_in(ctx, credentials).await {
        Ok(()) => {
            println!("Login successful");
            Ok(())
        }
        Err(err) => Err(AppError::Auth(format!("Login failed: {err}"))),
    }
}

pub async fn register(ctx: &AppContext, args: RegisterArgs) -> AppResult<()> {
    let registration = Registration {
        name: value_or_prompt(args.name, "Name")?,
        email: value_or_prompt(args.email, "Email")?,
        password: value_or_prompt(args.password, "Password")?,
    };

    match sign_up(ctx, registration).await {
        Ok(()) => {
            println!("Registration successful");
            Ok(())
        }
        Err(err) => Err(AppError::Auth(format!("Registration failed: {err}"))),
    }
}

pub fn logout(ctx: &AppContext) -> AppResult<()> {
    sign_out(ctx)?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> AppResult<()> {
    match current_user(ctx)? {
        Some(user) => println!("{} ({})", user.name, user.role),
        None => println!("Not signed in."),
    }
    Ok(())
}

fn value_or_prompt(value: Option<String>, label: &str) -> AppResult<String> {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(value);
    }

    let mut stdout = io::stdout();
    write!(stdout, "{label}: ")?;
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim_end_matches(['\r', '\n']);
    if trimmed.is_empty() {
        return Err(AppError::Auth(format!(
            "{} must not be empty",
            label.to_lowercase()
        )));
    }
    Ok(trimmed.to_string())
}
