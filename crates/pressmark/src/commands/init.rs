//! Scaffold a starter site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files written by `init`, relative to the project root.
const SCAFFOLD: &[(&str, &str)] = &[
    ("config.yml", DEFAULT_CONFIG),
    ("src/pages/index.md", DEFAULT_INDEX),
    ("src/pages/about.md", DEFAULT_ABOUT),
    ("src/templates/main.html", DEFAULT_TEMPLATE),
    ("src/css/index.css", DEFAULT_CSS),
];

/// Run the init command.
pub async fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing pressmark site in {}", root.display());

    for (relative, content) in SCAFFOLD {
        let path = root.join(relative);

        if path.exists() && !yes {
            tracing::warn!("{} already exists. Use --yes to overwrite.", relative);
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", relative))?;
        tracing::info!("Created {}", relative);
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'pressmark build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# pressmark configuration

title: My Static Site

# One entry per page in src/pages. `path` is the page file name without
# extension and the output file name; `renderTemplates` names a template
# in src/templates (without extension).
menu:
  - path: index
    renderTemplates: main
  - path: about
    renderTemplates: main

# Optional locations, shown with their defaults.
build:
  source: src
  output: dist
  template_extension: html
"#;

const DEFAULT_INDEX: &str = r#"# Welcome

This site is built by **pressmark** from Markdown pages.

Edit `src/pages/index.md` and run `pressmark build` again.
"#;

const DEFAULT_ABOUT: &str = r#"# About

Every file in `src/pages` needs a matching `menu` entry in `config.yml`.
"#;

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if page_title %}{{ page_title }} - {% endif %}{{ title }}</title>
  <link rel="stylesheet" href="css/index.css">
</head>
<body>
  <nav>
    <ul>
    {% for item in config.menu %}
      <li{% if item.path == route %} class="active"{% endif %}><a href="{{ item.path }}.html">{{ item.path }}</a></li>
    {% endfor %}
    </ul>
  </nav>
  <main>
    {{ content | safe }}
  </main>
</body>
</html>
"#;

const DEFAULT_CSS: &str = r#"body {
  font-family: system-ui, -apple-system, sans-serif;
  line-height: 1.6;
  max-width: 48rem;
  margin: 0 auto;
  padding: 1rem;
}

nav ul {
  display: flex;
  gap: 1rem;
  list-style: none;
  padding: 0;
}

nav li.active a {
  font-weight: 700;
}
"#;
