use crate::output;
use anyhow::{Context, Result};
use rusty_forms::{FormDefinition, FormSnapshot};
use std::path::Path;

pub fn execute(path: &Path, json: bool) -> Result<()> {
    let definition = FormDefinition::load(path)?;
    let snapshot =
        initial_state(&definition).with_context(|| format!("Form definition {:?} is invalid", path))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        output::print_snapshot(&definition.form.name, &snapshot);
    }

    Ok(())
}

/// Build the form and return its state before any change
fn initial_state(definition: &FormDefinition) -> rusty_forms::Result<FormSnapshot> {
    Ok(definition.build(|_| {})?.snapshot())
}
