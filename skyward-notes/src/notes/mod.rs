mod handlers;
mod model;
mod routes;
mod store;

pub use model::*;
pub use routes::router;
pub use store::NoteStore;

use minijinja::{Environment, HtmlEscape, Value};

pub fn add_templates(env: &mut Environment) -> Result<(), minijinja::Error> {
    env.add_template("base.html", include_str!("../views/base.html"))?;
    env.add_template("notes.html", include_str!("../views/notes.html"))?;

    env.add_filter("note_date", note_date);
    env.add_filter("nl2br", nl2br);

    Ok(())
}

/// `Oct 16, 2026 at 09:30` from a serialized timestamp; anything unparseable passes through.
fn note_date(value: String) -> String {
    chrono::DateTime::parse_from_rfc3339(&value)
        .map(|date| date.format("%b %-d, %Y at %H:%M").to_string())
        .unwrap_or(value)
}

/// HTML-escapes each line and joins them with `<br />`.
fn nl2br(value: String) -> Value {
    let html = value
        .split('\n')
        .map(|line| HtmlEscape(line).to_string())
        .collect::<Vec<_>>()
        .join("<br />\n");

    Value::from_safe_string(html)
}
