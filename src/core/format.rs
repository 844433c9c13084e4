use crate::core::errors::MalformedRecordError;
use crate::core::models::BillStatus;
use chrono::{DateTime, Datelike, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Accepts `YYYY-MM-DD` and, from older records, full RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Result<NaiveDate, MalformedRecordError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| MalformedRecordError::InvalidDate(raw.to_string()))
}

/// `2004-04-04` becomes `4 Avr. 04`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {}. {:02}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year().rem_euclid(100)
    )
}

pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}
