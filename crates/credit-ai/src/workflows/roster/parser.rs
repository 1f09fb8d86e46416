use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::documents::parse_amount;
use crate::workflows::risk::LoanApplication;

pub(crate) fn parse_applications<R: Read>(reader: R) -> Result<Vec<LoanApplication>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut applications = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        applications.push(row.into_application());
    }

    Ok(applications)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Application Id")]
    application_id: String,
    #[serde(rename = "Business Name")]
    business_name: String,
    #[serde(rename = "Business Type", default, deserialize_with = "empty_string_as_none")]
    business_type: Option<String>,
    #[serde(rename = "Loan Amount", default, deserialize_with = "empty_string_as_none")]
    loan_amount: Option<String>,
    #[serde(rename = "Credit Score", default, deserialize_with = "empty_string_as_none")]
    credit_score: Option<String>,
    #[serde(rename = "Submitted At", default, deserialize_with = "empty_string_as_none")]
    submitted_at: Option<String>,
}

impl RosterRow {
    fn into_application(self) -> LoanApplication {
        LoanApplication {
            loan_amount: self
                .loan_amount
                .as_deref()
                .and_then(parse_amount)
                .unwrap_or(0.0),
            credit_score: self
                .credit_score
                .as_deref()
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(0),
            submitted_at: self
                .submitted_at
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(DateTime::UNIX_EPOCH),
            business_type: self.business_type.unwrap_or_else(|| "Unknown".to_string()),
            application_id: self.application_id,
            business_name: self.business_name,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}
