//! Init command: write a starter configuration file.

use anyhow::{bail, Result};
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# modfence configuration
# Groups partition your packages by path pattern; each group's deny/allow
# rules govern what its members may import. `*` matches within one path
# segment, `**` crosses segments.

version = 1

[groups.domain]
paths = "internal/domain/**"

# Domain stays free of infrastructure.
[groups.domain.dependencies.deny]
groups = ["repository"]

[groups.repository]
paths = "internal/repository/**"

[groups.repository.dependencies.allow]
groups = ["domain"]
subPackages = true

[groups.service]
paths = "internal/service/**"

# Allow lists are default-deny: members may import ONLY what is listed
# (a matching deny always wins over a matching allow).
[groups.service.dependencies.allow]
groups = ["domain", "repository"]
patterns = ["internal/shared/**"]
subPackages = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("modfence.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, CONFIG_TEMPLATE)?;

    println!("Created modfence.toml");
    println!();
    println!("Next steps:");
    println!("  1. Edit [groups.*] paths and dependency rules for your project");
    println!("  2. Run: modfence check");

    Ok(())
}
