//! Display formatting for stored bill values

use chrono::{Datelike, NaiveDate};

use crate::errors::{BilledError, Result};
use crate::models::BillStatus;

/// Capitalised three-letter French month abbreviations
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Parse a stored `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| BilledError::InvalidDate(raw.to_string()))
}

/// Format a stored date for display, e.g. `2004-04-04` -> `4 Avr. 04`
pub fn format_date(raw: &str) -> Result<String> {
    let date = parse_date(raw)?;
    let month = MONTHS[date.month0() as usize];
    Ok(format!(
        "{} {}. {:02}",
        date.day(),
        month,
        date.year().rem_euclid(100)
    ))
}

/// Display label for a status code
pub fn format_status(status: &BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
        BillStatus::Unknown(_) => "Statut inconnu",
    }
}

/// CSS class paired with a status label
pub fn status_class(status: &BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "status-pending",
        BillStatus::Accepted => "status-accepted",
        BillStatus::Refused => "status-refused",
        BillStatus::Unknown(_) => "status-unknown",
    }
}

/// Amount in currency units, without trailing zeros for whole values
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0} €", amount)
    } else {
        format!("{:.2} €", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2004-04-04").unwrap(), "4 Avr. 04");
        assert_eq!(format_date("2021-12-25").unwrap(), "25 Déc. 21");
        assert_eq!(format_date("2003-03-03").unwrap(), "3 Mar. 03");
    }

    #[test]
    fn test_format_date_rejects_garbage() {
        assert!(matches!(format_date("not a date"), Err(BilledError::InvalidDate(_))));
        assert!(format_date("").is_err());
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(&BillStatus::Pending), "En attente");
        assert_eq!(format_status(&BillStatus::Accepted), "Accepté");
        assert_eq!(format_status(&BillStatus::Refused), "Refusé");
        assert_eq!(format_status(&BillStatus::Unknown("draft".into())), "Statut inconnu");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(400.0), "400 €");
        assert_eq!(format_amount(12.5), "12.50 €");
        assert_eq!(format_amount(0.0), "0 €");
        assert_eq!(format_amount(1e20), "100000000000000000000 €");
    }
}
