//! Hilfsfunktionen für die kommagetrennten Listen der Dateiformate.

use anyhow::{Context, Result};

/// Parsed eine durch `delimiter` getrennte Liste; leere Einträge werden ignoriert.
pub(crate) fn parse_list<T: std::str::FromStr>(text: &str, delimiter: char) -> Result<Vec<T>>
where
    <T as std::str::FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    text.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<T>().with_context(|| {
                format!("Wert '{}' konnte nicht geparst werden", truncate_for_error(s))
            })
        })
        .collect::<Result<Vec<T>, _>>()
}

/// Kürzt einen String für Fehlermeldungen auf max. 40 Zeichen
fn truncate_for_error(s: &str) -> &str {
    match s.char_indices().nth(40) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_list() {
        let result = parse_list::<f32>("1.5, 2,,3", ',').expect("Liste gueltig");
        assert_eq!(result, vec![1.5, 2.0, 3.0]);
    }

    #[test]
    fn empty_text_is_empty_list() {
        assert!(parse_list::<u32>("", ',').expect("leer").is_empty());
    }

    #[test]
    fn invalid_value_reports_truncated_text() {
        let long = "ä".repeat(60);
        let err = parse_list::<f32>(&long, ',').expect_err("Fehler erwartet");
        let msg = format!("{err:#}");
        assert!(msg.contains(&"ä".repeat(40)));
        assert!(!msg.contains(&"ä".repeat(41)));
    }
}
