//! Minimal CSV rendering for the `text/csv` response variant. The REST
//! surface's JSON shapes are flat records, so a hand-rolled writer (no
//! nesting, no quoting edge cases beyond commas/quotes/newlines) is all
//! that's needed — pulling in a CSV crate for this would be overkill.

pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write_rows(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str(&header.iter().map(|h| escape_field(h)).collect::<Vec<_>>().join(","));
    out.push('\n');
    for row in rows {
        out.push_str(&row.iter().map(|c| escape_field(c)).collect::<Vec<_>>().join(","));
        out.push('\n');
    }
    out
}
