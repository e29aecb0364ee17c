use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".safescore.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Safescore Configuration

# Point deductions applied to the baseline score of 100.
[penalties]
alert = 20       # per unresolved alert
emergency = 50
inactive = 20
unverified = 30
stale = 30       # check-in older than stale_hours
late = 15        # check-in older than late_hours
overdue = 5      # check-in older than overdue_hours

# Check-in recency tiers, in hours. Must be strictly descending.
[recency]
stale_hours = 24
late_hours = 12
overdue_hours = 6

# Score floors for category labels. Anything below at_risk is critical.
[categories]
safe = 80
moderate = 60
at_risk = 40

[validate]
min_score = 40

[output]
default_format = "terminal"
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created .safescore.toml configuration file");

    Ok(())
}
