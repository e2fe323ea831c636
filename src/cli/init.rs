//! Theme initialization command

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

/// Initialize a new theme
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Theme name / directory
    #[arg(default_value = ".")]
    pub name: String,
}

impl InitCommand {
    pub async fn execute(&self) -> Result<()> {
        let theme_dir = Path::new(&self.name);
        let theme_name = if self.name == "." {
            "my-theme"
        } else {
            self.name.as_str()
        };

        eprintln!(
            "{} Initializing theme {}...\n",
            "→".blue(),
            theme_name.cyan()
        );

        // Create theme directory if needed
        if self.name != "." {
            fs::create_dir_all(theme_dir).context("Failed to create theme directory")?;
        }

        // Generate theme.toml
        fs::write(theme_dir.join("theme.toml"), self.generate_config(theme_name))
            .context("Failed to write theme.toml")?;
        eprintln!("  {} Created {}", "✓".green(), "theme.toml".cyan());

        // Generate base stylesheet with the theme header
        fs::write(theme_dir.join("style.css"), self.generate_base_style(theme_name))
            .context("Failed to write style.css")?;
        eprintln!("  {} Created {}", "✓".green(), "style.css".cyan());

        // Generate asset sources
        let css_dir = theme_dir.join("assets/css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("styles.css"), SOURCE_STYLES)?;
        eprintln!("  {} Created {}", "✓".green(), "assets/css/styles.css".cyan());

        let js_dir = theme_dir.join("assets/js");
        fs::create_dir_all(&js_dir)?;
        fs::write(js_dir.join("scripts.js"), SOURCE_SCRIPTS)?;
        eprintln!("  {} Created {}", "✓".green(), "assets/js/scripts.js".cyan());

        // Generate index.html; the dev server injects resolved asset tags
        fs::write(theme_dir.join("index.html"), self.generate_index_html(theme_name))
            .context("Failed to write index.html")?;
        eprintln!("  {} Created {}", "✓".green(), "index.html".cyan());

        eprintln!("\n{} Theme initialized successfully!\n", "✓".green().bold());

        eprintln!("  Next steps:");
        if self.name != "." {
            eprintln!("    {} cd {}", "→".dimmed(), self.name.cyan());
        }
        eprintln!("    {} thematic dev", "→".dimmed());
        eprintln!();

        Ok(())
    }

    fn generate_config(&self, name: &str) -> String {
        format!(
            r#"# Thematic configuration

[theme]
name = "{name}"
version = "0.1.0"

[assets]
base_url = "/"

[dev]
port = 3000
host = "localhost"
reload = true
"#,
        )
    }

    fn generate_base_style(&self, name: &str) -> String {
        format!(
            r#"/*
 Theme Name: {name}
 Version: 0.1.0
*/

:root {{
  --color-text: #1a1a1a;
  --color-background: #ffffff;
}}

body {{
  margin: 0;
  color: var(--color-text);
  background-color: var(--color-background);
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.5;
}}
"#,
        )
    }

    fn generate_index_html(&self, name: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{name}</title>
  </head>
  <body>
    <main class="site">
      <h1>{name}</h1>
      <p>Edit assets/css/styles.css and assets/js/scripts.js to get started.</p>
    </main>
  </body>
</html>
"#,
        )
    }
}

const SOURCE_STYLES: &str = r#"@tailwind base;
@tailwind components;
@tailwind utilities;

.site {
  max-width: 64rem;
  margin: 0 auto;
  padding: 2rem;
}
"#;

const SOURCE_SCRIPTS: &str = r#"document.addEventListener('DOMContentLoaded', () => {
  console.log('theme scripts loaded');
});
"#;
