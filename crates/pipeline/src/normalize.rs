//! Identifier canonicalization and tolerant date parsing.
//!
//! Every join key is normalized here before any comparison; raw and
//! normalized forms must never be mixed.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Canonical serial number: trim, uppercase, strip non-breaking spaces and
/// tabs. The embedded-character strip applies to serials only.
pub fn clean_serial(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .replace('\u{a0}', "")
        .replace('\t', "")
}

/// Trimmed text key (customer name, invoice number, model). Empty after
/// trimming means missing.
pub fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Model-number join key: trim + uppercase, both sides of the promo join.
pub fn clean_model_no(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Day-first date formats tried in order. ISO comes last so unambiguous
/// exports still parse.
const DATE_FORMATS: [&str; 4] = ["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y-%m-%d"];
const DATETIME_FORMATS: [&str; 3] = ["%d-%m-%Y %H:%M:%S", "%d/%m/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a date string with day-first interpretation. Unparsable input is
/// an explicit missing date, not an error.
pub fn parse_date_dayfirst(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Convert an Excel 1900-system serial number to a date. Excel's epoch is
/// 1899-12-30 once its phantom 1900 leap day is accounted for.
pub fn date_from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_strips_case_whitespace_and_specials() {
        assert_eq!(clean_serial("  ab123  "), "AB123");
        assert_eq!(clean_serial("ab\u{a0}123"), "AB123");
        assert_eq!(clean_serial("ab\t123"), "AB123");
        assert_eq!(clean_serial("\u{a0}ab123\t"), "AB123");
    }

    #[test]
    fn serial_variants_normalize_equal() {
        let variants = ["sn-001", " SN-001 ", "sn\u{a0}-001", "Sn-0\t01"];
        let forms: Vec<String> = variants.iter().map(|v| clean_serial(v)).collect();
        assert!(forms.iter().all(|f| f == "SN-001"), "{forms:?}");
    }

    #[test]
    fn text_keys_trim_but_keep_case() {
        assert_eq!(clean_text("  Acme Corp  ").as_deref(), Some("Acme Corp"));
        assert_eq!(clean_text("   "), None);
        assert_eq!(clean_text(""), None);
    }

    #[test]
    fn model_no_is_upper() {
        assert_eq!(clean_model_no(" tv-55x ").as_deref(), Some("TV-55X"));
        assert_eq!(clean_model_no(""), None);
    }

    #[test]
    fn date_parses_day_first() {
        let d = parse_date_dayfirst("15-06-2024").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let d = parse_date_dayfirst("01/05/2024").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let d = parse_date_dayfirst("2024-06-15").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn bad_date_is_none_not_error() {
        assert_eq!(parse_date_dayfirst("not a date"), None);
        assert_eq!(parse_date_dayfirst("32-13-2024"), None);
        assert_eq!(parse_date_dayfirst(""), None);
    }

    #[test]
    fn excel_serial_dates() {
        // 45458 = 2024-06-15 in the 1900 system
        assert_eq!(
            date_from_excel_serial(45458.0),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
        assert_eq!(date_from_excel_serial(0.0), None);
        assert_eq!(date_from_excel_serial(f64::NAN), None);
    }
}
