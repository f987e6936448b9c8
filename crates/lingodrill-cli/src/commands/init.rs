//! The `lingodrill init` command.

use anyhow::Result;

use lingodrill_content::config::SAMPLE_CONFIG;

pub fn execute() -> Result<()> {
    if std::path::Path::new("lingodrill.toml").exists() {
        println!("lingodrill.toml already exists, skipping.");
    } else {
        std::fs::write("lingodrill.toml", SAMPLE_CONFIG)?;
        println!("Created lingodrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point [api] base_url in lingodrill.toml at your Content API");
    println!("  2. Run: lingodrill fetch --out lingodrill-pools");
    println!("  3. Run: lingodrill generate --mode quick-test --out test.json");
    println!("  4. Run: lingodrill take --test test.json");

    Ok(())
}
