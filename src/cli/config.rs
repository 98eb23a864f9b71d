use colored::Colorize;

use crate::error::Result;
use crate::settings::{load_settings, save_settings};

/// Show current settings, or update and persist the given ones.
pub fn run(
    submit_delay_ms: Option<u64>,
    banner_ttl_ms: Option<u64>,
    effects: Option<bool>,
) -> Result<()> {
    let mut settings = load_settings();
    let changed = submit_delay_ms.is_some() || banner_ttl_ms.is_some() || effects.is_some();

    if let Some(ms) = submit_delay_ms {
        settings.submit_delay_ms = ms;
    }
    if let Some(ms) = banner_ttl_ms {
        settings.banner_ttl_ms = ms;
    }
    if let Some(on) = effects {
        settings.effects = on;
    }

    if changed {
        save_settings(&settings)?;
        println!("{}", "Settings saved.".green());
    }

    println!("{} {}", "submit-delay-ms:".bold(), settings.submit_delay_ms);
    println!("{} {}", "banner-ttl-ms:".bold(), settings.banner_ttl_ms);
    println!("{} {}", "effects:".bold(), settings.effects);
    Ok(())
}
