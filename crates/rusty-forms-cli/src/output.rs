use colored::Colorize;
use rusty_forms::{FieldValues, FormSnapshot};

pub fn print_snapshot(form_name: &str, snapshot: &FormSnapshot) {
    println!("{} {}", "Form:".bold(), form_name.cyan());
    println!();

    let width = snapshot.values.keys().map(|name| name.len()).max().unwrap_or(0);

    for (name, value) in &snapshot.values {
        let error = snapshot.errors.get(name).map(String::as_str).unwrap_or_default();
        let dirty = snapshot.dirty.get(name).copied().unwrap_or(false);

        let status = if error.is_empty() {
            "ok".green().to_string()
        } else {
            error.red().to_string()
        };
        let marker = if dirty { "*" } else { " " };

        println!(
            "  {}{:<width$}  {:<20}  {}",
            marker.yellow(),
            name.bold(),
            format!("{:?}", value.to_display_string()),
            status,
            width = width
        );
    }

    println!();
    let gate = if snapshot.submit_disabled {
        "locked".red().bold()
    } else {
        "unlocked".green().bold()
    };
    let touched = if snapshot.form_dirty { "touched" } else { "untouched" };
    println!("Submit: {} ({})", gate, touched);
}

pub fn print_submit(submitted: bool, values: Option<&FieldValues>) {
    println!();
    match (submitted, values) {
        (true, Some(values)) => {
            println!("{}", "Submitted".green().bold());
            for (name, value) in values {
                println!("  {} = {}", name, value);
            }
        }
        _ => println!("{}", "Submission withheld: form has errors".yellow()),
    }
}
