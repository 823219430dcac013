//! Stateless helper utilities used by the workbook model, writer, and reader.

use std::collections::BTreeSet;

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_LEN_EXCEL_TABLE_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{SpecAutofitCellsPolicy, SpecCellRange};

////////////////////////////////////////////////////////////////////////////////
// #region CellReferences

/// Convert a zero-based column index to letters (`0 -> A`, `27 -> AB`).
pub fn derive_column_letter(col_idx: usize) -> String {
    let mut n_rest = col_idx + 1;
    let mut l_chars = Vec::new();
    while n_rest > 0 {
        let n_rem = (n_rest - 1) % 26;
        l_chars.push((b'A' + n_rem as u8) as char);
        n_rest = (n_rest - 1) / 26;
    }
    l_chars.iter().rev().collect()
}

/// Render a zero-based cell coordinate as `A1` notation.
pub fn derive_cell_reference(row_idx: usize, col_idx: usize) -> String {
    format!("{}{}", derive_column_letter(col_idx), row_idx + 1)
}

/// Parse an `A1` reference into a zero-based `(row, col)`.
pub fn derive_cell_index(reference: &str) -> Option<(usize, usize)> {
    let c_ref = reference.replace('$', "");
    let n_split = c_ref.find(|chr: char| chr.is_ascii_digit())?;
    let (c_letters, c_digits) = c_ref.split_at(n_split);
    if c_letters.is_empty() || !c_letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    let n_col = c_letters
        .bytes()
        .fold(0_usize, |n_acc, b| n_acc * 26 + (b - b'A' + 1) as usize);
    let n_row = c_digits.parse::<usize>().ok()?;
    Some((n_row.checked_sub(1)?, n_col - 1))
}

/// Render a range as `A1:D28`.
pub fn derive_range_reference(range: &SpecCellRange) -> String {
    format!(
        "{}:{}",
        derive_cell_reference(range.row_start, range.col_start),
        derive_cell_reference(range.row_end, range.col_end)
    )
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Return `name` if free, else the first free `name__2`, `name__3`, ...
///
/// Comparison is case-insensitive, as in Excel.
pub fn derive_unique_sheet_name(name: &str, names_existing: &[String]) -> String {
    let set_names_lower: BTreeSet<String> =
        names_existing.iter().map(|c| c.to_lowercase()).collect();
    if !set_names_lower.contains(&name.to_lowercase()) {
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if !set_names_lower.contains(&candidate.to_lowercase()) {
            return candidate;
        }
        n_idx += 1;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableNames

/// Derive a table name `Table_<sheet>` with invalid characters replaced by `_`.
pub fn derive_table_name(sheet_name: &str) -> String {
    let c_body: String = sheet_name
        .chars()
        .map(|chr| {
            if chr.is_alphanumeric() || chr == '_' || chr == '.' {
                chr
            } else {
                '_'
            }
        })
        .collect();
    format!("Table_{c_body}")
        .chars()
        .take(N_LEN_EXCEL_TABLE_NAME_MAX)
        .collect()
}

/// Validate a table name against Excel naming rules.
pub fn validate_table_name(name: &str) -> Result<(), String> {
    let Some(chr_first) = name.chars().next() else {
        return Err("Table name is empty.".to_string());
    };
    if name.chars().count() > N_LEN_EXCEL_TABLE_NAME_MAX {
        return Err(format!(
            "Table name exceeds {N_LEN_EXCEL_TABLE_NAME_MAX} characters."
        ));
    }
    if !(chr_first.is_alphabetic() || chr_first == '_' || chr_first == '\\') {
        return Err("Table name must start with a letter, `_` or `\\`.".to_string());
    }
    if let Some(chr_bad) = name
        .chars()
        .find(|chr| !(chr.is_alphanumeric() || *chr == '_' || *chr == '.' || *chr == '\\'))
    {
        return Err(format!("Table name contains invalid character {chr_bad:?}."));
    }
    if is_cell_reference_like(name) {
        return Err("Table name must not look like a cell reference.".to_string());
    }
    Ok(())
}

/// `true` for `A1`/`XFD1048576`-style and `R1C1`-style names.
fn is_cell_reference_like(name: &str) -> bool {
    let c_upper = name.to_ascii_uppercase();
    if c_upper == "R" || c_upper == "C" {
        return true;
    }

    let n_letters = c_upper
        .chars()
        .take_while(|chr| chr.is_ascii_alphabetic())
        .count();
    let c_digits = &c_upper[n_letters..];
    (1..=3).contains(&n_letters)
        && !c_digits.is_empty()
        && c_digits.chars().all(|chr| chr.is_ascii_digit())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Autofit

/// Length of a display string in characters; every code point counts 1.
pub fn derive_display_len(s: &str) -> usize {
    s.chars().count()
}

/// Final column width for the longest value length under `policy`.
pub fn calculate_autofit_width(n_len_max: usize, policy: &SpecAutofitCellsPolicy) -> f64 {
    let n_width_adjusted = (n_len_max + policy.width_cell_padding) as f64 * policy.width_scale;
    f64::min(n_width_adjusted, policy.width_cell_max)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_column_letter() {
        assert_eq!(derive_column_letter(0), "A");
        assert_eq!(derive_column_letter(3), "D");
        assert_eq!(derive_column_letter(25), "Z");
        assert_eq!(derive_column_letter(26), "AA");
        assert_eq!(derive_column_letter(27), "AB");
        assert_eq!(derive_column_letter(16_383), "XFD");
    }

    #[test]
    fn test_derive_cell_index() {
        assert_eq!(derive_cell_index("A1"), Some((0, 0)));
        assert_eq!(derive_cell_index("AB12"), Some((11, 27)));
        assert_eq!(derive_cell_index("$D$28"), Some((27, 3)));
        assert_eq!(derive_cell_index("XFD1048576"), Some((1_048_575, 16_383)));
        assert_eq!(derive_cell_index("1A"), None);
        assert_eq!(derive_cell_index("A0"), None);
        assert_eq!(derive_cell_index("A"), None);
    }

    #[test]
    fn test_derive_table_name_replaces_spaces() {
        assert_eq!(derive_table_name("Import by Country"), "Table_Import_by_Country");
        assert_eq!(derive_table_name("HTS Codes"), "Table_HTS_Codes");
        assert!(validate_table_name(&derive_table_name("Top Importers")).is_ok());
    }

    #[test]
    fn test_validate_table_name_rejects_bad_names() {
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("1Table").is_err());
        assert!(validate_table_name("Table One").is_err());
        assert!(validate_table_name("AB12").is_err());
        assert!(validate_table_name("R").is_err());
        assert!(validate_table_name("Table_Summary").is_ok());
    }

    #[test]
    fn test_derive_unique_sheet_name() {
        let l_names = vec!["Summary".to_string(), "Overview".to_string()];
        assert_eq!(derive_unique_sheet_name("HTS Codes", &l_names), "HTS Codes");
        assert_eq!(derive_unique_sheet_name("summary", &l_names), "summary__2");
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn test_derive_display_len_counts_chars() {
        assert_eq!(derive_display_len(""), 0);
        assert_eq!(derive_display_len("Robert Bosch Corporation"), 24);
        assert_eq!(derive_display_len("$1 million \u{2013} $10 million"), 24);
    }

    #[test]
    fn test_calculate_autofit_width_caps() {
        let policy = SpecAutofitCellsPolicy::default();
        assert!((calculate_autofit_width(8, &policy) - 12.0).abs() < 1e-9);
        assert_eq!(calculate_autofit_width(200, &policy), 50.0);
    }
}
