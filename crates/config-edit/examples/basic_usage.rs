//! Basic usage example for config-edit

use config_edit::{
    ConfigDocument, EditOptions, InMemorySource, PassthroughFormatter, TextEdit, create, read,
    replace_all, update,
};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    config_edit::logging::init()?;

    // Build and edit a parsed configuration
    let config = create("build.preset", json!("javascript"))?;
    let config = update("edgeApplications[0].name", json!("$APP"), &config)?;
    let config = replace_all("$APP", "my-app", &config);
    println!("Application: {}", read("edgeApplications[0].name", &config)?);

    // Edit the file text itself, keeping comments and layout
    let source = InMemorySource::new(
        "azion.config.js",
        r#"import { defineConfig } from 'azion'

export default defineConfig({
  // Framework preset
  build: { preset: 'javascript' },
  edgeApplications: [{ name: '$APP' }],
})
"#,
    );
    let mut doc = ConfigDocument::load(&source, EditOptions::default())?;

    let outcome = doc.apply(&[
        TextEdit::ReplacePlaceholder {
            placeholder: "$APP".to_string(),
            replacement: "my-app".to_string(),
        },
        TextEdit::SetPath {
            path: "build.preset".to_string(),
            value: "typescript".to_string(),
        },
    ]);
    println!("Applied {} edits", outcome.applied.len());
    for edit in doc.history() {
        println!("  - {:?}: {:?} -> {:?}", edit.kind, edit.old_content, edit.new_content);
    }

    println!("\nFinal document:\n{}", doc.render(&PassthroughFormatter));

    // Roll back the preset change
    doc.undo();
    println!("Modified after undo: {}", doc.is_modified());

    Ok(())
}
