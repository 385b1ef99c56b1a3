use crate::output;
use anyhow::{anyhow, Context, Result};
use rusty_forms::{FieldEvent, FieldValues, FormDefinition, FormSnapshot, SubmitOutcome};
use serde::Serialize;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tracing::debug;

/// JSON shape of a replay
#[derive(Debug, Serialize)]
struct ReplayReport {
    snapshot: FormSnapshot,
    /// Values handed to the submit callback, when a submit went through
    submitted: Option<FieldValues>,
    #[serde(skip)]
    outcome: Option<SubmitOutcome>,
}

pub fn execute(path: &Path, changes: &[String], submit: bool, json: bool) -> Result<()> {
    let events = changes
        .iter()
        .map(|change| parse_change(change))
        .collect::<Result<Vec<_>>>()?;

    let definition = FormDefinition::load(path)?;
    let report = replay(&definition, events, submit)
        .with_context(|| format!("Replay of {:?} failed", path))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_snapshot(&definition.form.name, &report.snapshot);
        if let Some(outcome) = report.outcome {
            output::print_submit(outcome == SubmitOutcome::Submitted, report.submitted.as_ref());
        }
    }

    Ok(())
}

/// Apply the changes in order, then submit when asked
fn replay(definition: &FormDefinition, events: Vec<FieldEvent>, submit: bool) -> Result<ReplayReport> {
    let submitted: Rc<RefCell<Option<FieldValues>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&submitted);
    let mut form = definition
        .build(move |values| *sink.borrow_mut() = Some(values.clone()))
        .context("Form definition is invalid")?;

    for event in events {
        debug!(field = %event.name, "Replaying change");
        form.handle_event(event)?;
    }

    let outcome = submit.then(|| form.handle_submit());
    let submitted = submitted.borrow_mut().take();

    Ok(ReplayReport {
        snapshot: form.snapshot(),
        submitted,
        outcome,
    })
}

/// Parse `name=value`; the value may be empty or contain further `=`
fn parse_change(change: &str) -> Result<FieldEvent> {
    let (name, value) = change
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid change `{}`, expected NAME=VALUE", change))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Invalid change `{}`, field name is empty", change));
    }

    Ok(FieldEvent::new(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rusty_forms::{FieldValue, FormError, REQUIRED_FIELD_ERROR};

    fn signup() -> FormDefinition {
        FormDefinition::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("forms/signup.toml")).unwrap()
    }

    fn events(changes: &[&str]) -> Vec<FieldEvent> {
        changes.iter().map(|change| parse_change(change).unwrap()).collect()
    }

    #[test]
    fn test_parse_change() {
        assert_eq!(
            parse_change("first_name=Bob").unwrap(),
            FieldEvent::new("first_name", "Bob")
        );
        assert_eq!(parse_change("tags=").unwrap(), FieldEvent::new("tags", ""));
        assert_eq!(
            parse_change("query=a=b").unwrap(),
            FieldEvent::new("query", "a=b")
        );
    }

    #[test]
    fn test_parse_change_rejects_malformed() {
        assert!(parse_change("first_name").is_err());
        assert!(parse_change("=Bob").is_err());
    }

    #[test]
    fn test_changes_apply_in_order() {
        let report = replay(
            &signup(),
            events(&["last_name=L33", "last_name=Lee"]),
            false,
        )
        .unwrap();

        assert_eq!(report.snapshot.values["last_name"], FieldValue::from("Lee"));
        assert_eq!(report.snapshot.errors["last_name"], "");
        assert!(report.snapshot.dirty["last_name"]);
        assert!(report.snapshot.form_dirty);
        assert_eq!(report.outcome, None);
        assert_eq!(report.submitted, None);
    }

    #[test]
    fn test_submit_withheld_while_errors_remain() {
        let report = replay(&signup(), events(&["last_name=Lee"]), true).unwrap();

        assert_eq!(report.snapshot.errors["password"], REQUIRED_FIELD_ERROR);
        assert!(report.snapshot.submit_disabled);
        assert_eq!(report.outcome, Some(SubmitOutcome::Withheld));
        assert_eq!(report.submitted, None);
    }

    #[test]
    fn test_submit_after_valid_changes() {
        let report = replay(
            &signup(),
            events(&[
                "last_name=Lee",
                "password=secret",
                "confirm_password=secrex",
                "confirm_password=secret",
            ]),
            true,
        )
        .unwrap();

        assert!(!report.snapshot.submit_disabled);
        assert_eq!(report.outcome, Some(SubmitOutcome::Submitted));

        let submitted = report.submitted.unwrap();
        assert_eq!(submitted, report.snapshot.values);
        assert_eq!(submitted["first_name"], FieldValue::from("Vincent"));
        assert_eq!(submitted["confirm_password"], FieldValue::from("secret"));
    }

    #[test]
    fn test_unknown_field_change_fails() {
        let err = replay(&signup(), events(&["nickname=Vin"]), true).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<FormError>(),
            Some(FormError::UnknownFieldChange { .. })
        ));
    }

    #[test]
    fn test_inconsistent_definition_fails() {
        let definition = FormDefinition::from_toml_str("[fields.a]\nequals_field = \"b\"\n").unwrap();

        let err = replay(&definition, Vec::new(), true).unwrap_err();
        assert!(err
            .downcast_ref::<FormError>()
            .is_some_and(FormError::is_invalid_schema));
    }
}
