use std::io::Write;

use console::Style;

/// Print a Cargo-style status line: `    Selected era "Default"`
///
/// The `label` is right-padded to 12 characters and printed in bold green,
/// followed by the `message` in the default terminal colour.
pub fn status(label: &str, message: &str) {
    let green_bold = Style::new().green().bold();
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        green_bold.apply_to(label),
    );
}

/// Like [`status`] but uses bold cyan for informational (non-action) messages.
pub fn status_info(label: &str, message: &str) {
    let cyan_bold = Style::new().cyan().bold();
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        cyan_bold.apply_to(label),
    );
}

/// Print a warning-style status line (bold yellow label).
pub fn status_warn(label: &str, message: &str) {
    let yellow_bold = Style::new().yellow().bold();
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        yellow_bold.apply_to(label),
    );
}

/// Render `items` as an indented list, one per line, for prompt bodies.
pub fn item_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\t{item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_list_indents_each_entry() {
        let items = vec!["Alpha".to_string(), "Beta".to_string()];
        assert_eq!(item_list(&items), "\tAlpha\n\tBeta");
    }

    #[test]
    fn item_list_empty() {
        assert_eq!(item_list(&[]), "");
    }
}
