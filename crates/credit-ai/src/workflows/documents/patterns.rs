//! Recognition rule tables for every document type and field.
//!
//! Each field owns an ordered list of patterns; the first rule that yields a
//! non-empty capture wins. Rule order encodes disambiguation priority and
//! must never be reordered.

use regex::Regex;
use std::sync::OnceLock;

pub(crate) struct FieldRules {
    pub(crate) field: &'static str,
    pub(crate) rules: Vec<Regex>,
}

/// Numeric amount capture: grouped digits, optional decimals, optional
/// `K`/`L`/`Cr`-style suffix kept inside the capture for the parser.
const AMOUNT_VALUE: &str = r"(\d[\d,]*(?:\.\d+)?(?:\s*(?:crores?|cr|lakhs?|lacs?|k|l)\b)?)";

/// Optional currency marker between the label and the value.
const CURRENCY_MARK: &str = r"(?:₹|rs\.?|inr)?\s*";

fn amount_rules(labels: &[&str]) -> Vec<Regex> {
    labels
        .iter()
        .map(|label| compile(&format!(r"(?i){label}\s*[:=\-]?\s*{CURRENCY_MARK}{AMOUNT_VALUE}")))
        .collect()
}

fn literal_rules(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|pattern| compile(pattern)).collect()
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static extraction pattern compiles")
}

/// Apply a field's rules in declared order; first non-empty capture wins.
pub(crate) fn first_capture(rules: &[FieldRules], field: &str, text: &str) -> Option<String> {
    let entry = rules.iter().find(|entry| entry.field == field)?;
    for rule in &entry.rules {
        if let Some(captures) = rule.captures(text) {
            if let Some(value) = captures.get(1) {
                let trimmed = value.as_str().trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}

static BALANCE_SHEET: OnceLock<Vec<FieldRules>> = OnceLock::new();

pub(crate) fn balance_sheet_rules() -> &'static [FieldRules] {
    BALANCE_SHEET.get_or_init(|| {
        vec![
            FieldRules {
                field: "total_assets",
                rules: amount_rules(&[
                    r"total\s+assets",
                    r"assets\s+total",
                    r"total\s+of\s+assets",
                ]),
            },
            FieldRules {
                field: "total_liabilities",
                rules: amount_rules(&[
                    r"total\s+liabilities",
                    r"liabilities\s+total",
                    r"total\s+of\s+liabilities",
                ]),
            },
            FieldRules {
                field: "current_assets",
                rules: amount_rules(&[r"total\s+current\s+assets", r"current\s+assets"]),
            },
            FieldRules {
                field: "current_liabilities",
                rules: amount_rules(&[
                    r"total\s+current\s+liabilities",
                    r"current\s+liabilities",
                ]),
            },
            FieldRules {
                field: "net_worth",
                rules: amount_rules(&[
                    r"net\s+worth",
                    r"shareholders?'?\s+funds",
                    r"owner'?s\s+equity",
                ]),
            },
        ]
    })
}

static PROFIT_LOSS: OnceLock<Vec<FieldRules>> = OnceLock::new();

pub(crate) fn profit_loss_rules() -> &'static [FieldRules] {
    PROFIT_LOSS.get_or_init(|| {
        vec![
            FieldRules {
                field: "revenue",
                rules: amount_rules(&[
                    r"revenue\s+from\s+operations",
                    r"total\s+revenue",
                    r"net\s+sales",
                    r"total\s+income",
                    r"revenue",
                ]),
            },
            FieldRules {
                field: "expenses",
                rules: amount_rules(&[
                    r"total\s+expenses",
                    r"total\s+expenditure",
                    r"operating\s+expenses",
                ]),
            },
            FieldRules {
                field: "gross_profit",
                rules: amount_rules(&[r"gross\s+profit"]),
            },
            FieldRules {
                field: "net_profit",
                rules: amount_rules(&[
                    r"net\s+profit",
                    r"profit\s+after\s+tax",
                    r"net\s+income",
                ]),
            },
            FieldRules {
                field: "ebitda",
                rules: amount_rules(&[r"ebitda", r"operating\s+profit"]),
            },
        ]
    })
}

static BANK_STATEMENT: OnceLock<Vec<FieldRules>> = OnceLock::new();

pub(crate) fn bank_statement_rules() -> &'static [FieldRules] {
    BANK_STATEMENT.get_or_init(|| {
        vec![
            FieldRules {
                field: "account_number",
                rules: literal_rules(&[
                    r"(?i)(?:a/c|account)\s*(?:no\.?|number)\s*[:\-]?\s*([0-9Xx*]{6,18})",
                ]),
            },
            FieldRules {
                field: "total_credits",
                rules: amount_rules(&[
                    r"total\s+credits",
                    r"total\s+deposits",
                    r"credits?\s+total",
                ]),
            },
            FieldRules {
                field: "total_debits",
                rules: amount_rules(&[
                    r"total\s+debits",
                    r"total\s+withdrawals",
                    r"debits?\s+total",
                ]),
            },
            FieldRules {
                field: "average_balance",
                rules: amount_rules(&[
                    r"monthly\s+average\s+balance",
                    r"average\s+balance",
                    r"avg\.?\s+balance",
                ]),
            },
            FieldRules {
                field: "cheque_bounces",
                rules: literal_rules(&[
                    r"(?i)(?:cheque|check)\s+(?:bounces?|returns?)\s*[:\-]?\s*(\d+)",
                    r"(?i)(\d+)\s+(?:cheque|check)s?\s+(?:bounced|returned)",
                ]),
            },
        ]
    })
}

static GST_RETURNS: OnceLock<Vec<FieldRules>> = OnceLock::new();

pub(crate) fn gst_returns_rules() -> &'static [FieldRules] {
    GST_RETURNS.get_or_init(|| {
        vec![
            FieldRules {
                field: "gstin",
                rules: literal_rules(&[
                    r"(?i)gstin\s*[:\-]?\s*([0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z]{3})",
                    r"(?i)gst\s*(?:no\.?|number)\s*[:\-]?\s*([0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z]{3})",
                ]),
            },
            FieldRules {
                field: "monthly_turnover",
                rules: amount_rules(&[r"monthly\s+turnover", r"turnover\s+for\s+the\s+month"]),
            },
            FieldRules {
                field: "annual_turnover",
                rules: amount_rules(&[
                    r"annual\s+turnover",
                    r"aggregate\s+turnover",
                    r"yearly\s+turnover",
                ]),
            },
            FieldRules {
                field: "tax_paid",
                rules: amount_rules(&[
                    r"total\s+tax\s+paid",
                    r"tax\s+paid",
                    r"total\s+tax\s+liability",
                ]),
            },
            FieldRules {
                field: "filing_regularity",
                rules: literal_rules(&[
                    r"(?i)filing\s+(?:status|regularity)\s*[:\-]?\s*(regular|irregular|delayed)",
                    r"(?i)returns\s+filed\s+(regularly|irregularly|late)",
                ]),
            },
        ]
    })
}

static ITR_DOCUMENT: OnceLock<Vec<FieldRules>> = OnceLock::new();

pub(crate) fn itr_document_rules() -> &'static [FieldRules] {
    ITR_DOCUMENT.get_or_init(|| {
        vec![
            FieldRules {
                field: "pan",
                rules: literal_rules(&[
                    r"(?i)pan\s*(?:no\.?|number)?\s*[:\-]?\s*([A-Z]{5}[0-9]{4}[A-Z])",
                ]),
            },
            FieldRules {
                field: "gross_income",
                rules: amount_rules(&[r"gross\s+total\s+income", r"gross\s+income"]),
            },
            FieldRules {
                field: "taxable_income",
                rules: amount_rules(&[
                    r"total\s+taxable\s+income",
                    r"taxable\s+income",
                    r"total\s+income",
                ]),
            },
            FieldRules {
                field: "tax_paid",
                rules: amount_rules(&[
                    r"total\s+tax\s+paid",
                    r"tax\s+payable",
                    r"taxes\s+paid",
                ]),
            },
            FieldRules {
                field: "assessment_year",
                rules: literal_rules(&[
                    r"(?i)assessment\s+year\s*[:\-]?\s*(\d{4}\s*-\s*\d{2,4})",
                    r"(?i)a\.?y\.?\s*[:\-]?\s*(\d{4}\s*-\s*\d{2,4})",
                ]),
            },
        ]
    })
}

static CIBIL_REPORT: OnceLock<Vec<FieldRules>> = OnceLock::new();

pub(crate) fn cibil_report_rules() -> &'static [FieldRules] {
    CIBIL_REPORT.get_or_init(|| {
        vec![
            FieldRules {
                field: "cibil_score",
                rules: literal_rules(&[
                    r"(?i)cibil\s+(?:transunion\s+)?score\s*[:\-]?\s*(\d{3})",
                    r"(?i)credit\s+score\s*[:\-]?\s*(\d{3})",
                    r"(?i)\bscore\s*[:\-]?\s*(\d{3})",
                ]),
            },
            FieldRules {
                field: "number_of_loans",
                rules: literal_rules(&[
                    r"(?i)(?:number|no\.?)\s+of\s+(?:loans?|accounts?)\s*[:\-]?\s*(\d+)",
                    r"(?i)total\s+(?:loans?|accounts?)\s*[:\-]?\s*(\d+)",
                ]),
            },
            FieldRules {
                field: "total_loan_amount",
                rules: amount_rules(&[
                    r"total\s+loan\s+amount",
                    r"total\s+sanctioned\s+amount",
                    r"total\s+outstanding",
                ]),
            },
            FieldRules {
                field: "amount_overdue",
                rules: amount_rules(&[
                    r"amount\s+overdue",
                    r"overdue\s+amount",
                    r"total\s+overdue",
                ]),
            },
            FieldRules {
                field: "settled_and_written_off",
                rules: amount_rules(&[
                    r"settled\s+(?:and|&)\s+written\s+off",
                    r"written\s+off",
                    r"settled\s+amount",
                ]),
            },
            FieldRules {
                field: "suit_filed_status",
                rules: literal_rules(&[r"(?i)suit\s+filed\s*(?:status)?\s*[:\-]?\s*([A-Za-z]+)"]),
            },
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins_for_ambiguous_phrasings() {
        let text = "Assets Total: ₹9,00,000\nTotal Assets: ₹5,00,000";
        let value = first_capture(balance_sheet_rules(), "total_assets", text);
        // "total assets" is the first rule in the list, so it wins even
        // though "assets total" appears earlier in the text.
        assert_eq!(value.as_deref(), Some("5,00,000"));
    }

    #[test]
    fn amount_rules_tolerate_currency_prefixes_and_case() {
        for text in [
            "TOTAL ASSETS: 500000",
            "Total Assets - ₹5,00,000",
            "total assets Rs. 500,000",
            "Total Assets: INR 5,00,000",
        ] {
            assert!(
                first_capture(balance_sheet_rules(), "total_assets", text).is_some(),
                "no match for {text:?}"
            );
        }
    }

    #[test]
    fn amount_capture_keeps_multiplier_suffix() {
        let value = first_capture(cibil_report_rules(), "total_loan_amount", "Total Loan Amount: ₹25.00 L");
        assert_eq!(value.as_deref(), Some("25.00 L"));
    }

    #[test]
    fn unknown_field_yields_nothing() {
        assert_eq!(first_capture(balance_sheet_rules(), "no_such_field", "x"), None);
    }

    #[test]
    fn identifier_rules_match_structured_ids() {
        let gstin = first_capture(
            gst_returns_rules(),
            "gstin",
            "GSTIN: 29ABCDE1234F1Z5",
        );
        assert_eq!(gstin.as_deref(), Some("29ABCDE1234F1Z5"));

        let pan = first_capture(itr_document_rules(), "pan", "PAN No: ABCDE1234F");
        assert_eq!(pan.as_deref(), Some("ABCDE1234F"));
    }
}
