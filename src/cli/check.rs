use std::time::Duration;

use colored::Colorize;
use zeroize::Zeroizing;

use crate::error::{DeskError, Result};
use crate::form::SigninForm;
use crate::roles::Role;
use crate::settings;
use crate::signin::SUBMIT_LABEL_BUSY;

/// Headless sign-in: validate the credentials, run the simulated
/// authentication delay, and print the routed destination page.
pub fn run(
    username: &str,
    role: &str,
    password: Option<String>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let password = match password {
        Some(p) => Zeroizing::new(p),
        None => Zeroizing::new(rpassword::prompt_password("Password: ")?),
    };

    let mut form = SigninForm::new();
    form.username.value = username.to_string();
    form.password.value = (*password).clone();
    form.role.value = role.to_string();

    if !form.validate() {
        for field in [&form.username, &form.password, &form.role] {
            if let Some(error) = &field.error {
                eprintln!("  {} {}", "✗".red(), error.red());
            }
        }
        return Err(DeskError::ValidationFailed);
    }

    let settings = settings::load_settings();
    let delay = delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| settings.submit_delay());

    println!("{}", SUBMIT_LABEL_BUSY.dimmed());
    std::thread::sleep(delay);

    let role: Role = form.role.value.parse()?;
    let destination = role.destination();
    println!(
        "{} Signed in as {} ({}), routing to {}",
        "✓".green(),
        username.trim().bold(),
        role.title(),
        destination.page().bold()
    );
    Ok(())
}
