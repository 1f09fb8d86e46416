//! Field extraction over raw document text.
//!
//! Extraction never fails on malformed input: every field that cannot be
//! recovered degrades to its sentinel (`"N/A"`, `0`, `unknown`) and the
//! document is returned with a lowered confidence tier.

use chrono::Utc;

use super::amount::{format_currency, parse_amount, NOT_AVAILABLE};
use super::domain::{
    BalanceSheetData, BankStatementData, CashFlowPattern, CibilReportData, DocumentData,
    DocumentType, ExtractedDocument, ExtractionConfidence, FilingRegularity, GstReturnsData,
    ItrDocumentData, PaymentHistory, ProfitLossData,
};
use super::patterns::{self, FieldRules};

/// Credits must exceed debits by this factor (and vice versa) before a cash
/// flow is classified as anything other than mixed.
const CASH_FLOW_TIEBREAK: f64 = 1.1;

/// Required-field coverage cut points for the confidence tiers.
const HIGH_CONFIDENCE_RATIO: f64 = 0.7;
const MEDIUM_CONFIDENCE_RATIO: f64 = 0.4;

/// Run the pattern library over `raw_text` and assemble the typed document.
pub fn extract(document_type: DocumentType, raw_text: &str, file_name: &str) -> ExtractedDocument {
    let (data, found, required) = match document_type {
        DocumentType::BalanceSheet => extract_balance_sheet(raw_text),
        DocumentType::ProfitLoss => extract_profit_loss(raw_text),
        DocumentType::BankStatement => extract_bank_statement(raw_text),
        DocumentType::GstReturns => extract_gst_returns(raw_text),
        DocumentType::ItrDocument => extract_itr_document(raw_text),
        DocumentType::CibilReport => extract_cibil_report(raw_text),
    };

    let extraction_confidence = confidence_tier(found, required);
    tracing::debug!(
        document_type = %document_type,
        file_name,
        found,
        required,
        confidence = extraction_confidence.label(),
        "document extracted"
    );

    ExtractedDocument {
        document_type,
        file_name: file_name.to_string(),
        extracted_at: Utc::now(),
        data,
        extraction_confidence,
        raw_text: Some(raw_text.to_string()),
    }
}

fn confidence_tier(found: usize, required: usize) -> ExtractionConfidence {
    if required == 0 {
        return ExtractionConfidence::Low;
    }

    let ratio = found as f64 / required as f64;
    if ratio >= HIGH_CONFIDENCE_RATIO {
        ExtractionConfidence::High
    } else if ratio >= MEDIUM_CONFIDENCE_RATIO {
        ExtractionConfidence::Medium
    } else {
        ExtractionConfidence::Low
    }
}

/// Capture an amount field and canonicalize it to a display rupee string.
fn amount_field(rules: &[FieldRules], field: &str, text: &str) -> String {
    patterns::first_capture(rules, field, text)
        .and_then(|raw| parse_amount(&raw))
        .map(format_currency)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn text_field(rules: &[FieldRules], field: &str, text: &str) -> String {
    patterns::first_capture(rules, field, text).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn count_field(rules: &[FieldRules], field: &str, text: &str) -> u32 {
    patterns::first_capture(rules, field, text)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

fn is_found(value: &str) -> bool {
    value != NOT_AVAILABLE
}

fn extract_balance_sheet(text: &str) -> (DocumentData, usize, usize) {
    let rules = patterns::balance_sheet_rules();
    let data = BalanceSheetData {
        total_assets: amount_field(rules, "total_assets", text),
        total_liabilities: amount_field(rules, "total_liabilities", text),
        current_assets: amount_field(rules, "current_assets", text),
        current_liabilities: amount_field(rules, "current_liabilities", text),
        net_worth: amount_field(rules, "net_worth", text),
    };

    let found = [
        &data.total_assets,
        &data.total_liabilities,
        &data.current_assets,
        &data.current_liabilities,
    ]
    .into_iter()
    .filter(|value| is_found(value))
    .count();

    (DocumentData::BalanceSheet(data), found, 4)
}

fn extract_profit_loss(text: &str) -> (DocumentData, usize, usize) {
    let rules = patterns::profit_loss_rules();
    let data = ProfitLossData {
        revenue: amount_field(rules, "revenue", text),
        expenses: amount_field(rules, "expenses", text),
        gross_profit: amount_field(rules, "gross_profit", text),
        net_profit: amount_field(rules, "net_profit", text),
        ebitda: amount_field(rules, "ebitda", text),
    };

    let found = [&data.revenue, &data.expenses, &data.net_profit]
        .into_iter()
        .filter(|value| is_found(value))
        .count();

    (DocumentData::ProfitLoss(data), found, 3)
}

fn extract_bank_statement(text: &str) -> (DocumentData, usize, usize) {
    let rules = patterns::bank_statement_rules();
    let total_credits = amount_field(rules, "total_credits", text);
    let total_debits = amount_field(rules, "total_debits", text);
    let cash_flow_pattern = classify_cash_flow(
        parse_amount(&total_credits),
        parse_amount(&total_debits),
    );

    let data = BankStatementData {
        account_number: text_field(rules, "account_number", text),
        average_balance: amount_field(rules, "average_balance", text),
        cheque_bounces: count_field(rules, "cheque_bounces", text),
        total_credits,
        total_debits,
        cash_flow_pattern,
    };

    let found = [&data.total_credits, &data.total_debits, &data.average_balance]
        .into_iter()
        .filter(|value| is_found(value))
        .count();

    (DocumentData::BankStatement(data), found, 3)
}

fn classify_cash_flow(credits: Option<f64>, debits: Option<f64>) -> CashFlowPattern {
    let credits = credits.unwrap_or(0.0);
    let debits = debits.unwrap_or(0.0);

    if credits > debits * CASH_FLOW_TIEBREAK {
        CashFlowPattern::Positive
    } else if debits > credits * CASH_FLOW_TIEBREAK {
        CashFlowPattern::Negative
    } else {
        CashFlowPattern::Mixed
    }
}

fn extract_gst_returns(text: &str) -> (DocumentData, usize, usize) {
    let rules = patterns::gst_returns_rules();
    let data = GstReturnsData {
        gstin: text_field(rules, "gstin", text),
        monthly_turnover: amount_field(rules, "monthly_turnover", text),
        annual_turnover: amount_field(rules, "annual_turnover", text),
        tax_paid: amount_field(rules, "tax_paid", text),
        filing_regularity: patterns::first_capture(rules, "filing_regularity", text)
            .map(|raw| classify_filing_regularity(&raw))
            .unwrap_or(FilingRegularity::Unknown),
    };

    let found = [&data.gstin, &data.monthly_turnover, &data.tax_paid]
        .into_iter()
        .filter(|value| is_found(value))
        .count();

    (DocumentData::GstReturns(data), found, 3)
}

fn classify_filing_regularity(raw: &str) -> FilingRegularity {
    match raw.trim().to_ascii_lowercase().as_str() {
        "regular" | "regularly" => FilingRegularity::Regular,
        "irregular" | "irregularly" => FilingRegularity::Irregular,
        "delayed" | "late" => FilingRegularity::Delayed,
        _ => FilingRegularity::Unknown,
    }
}

fn extract_itr_document(text: &str) -> (DocumentData, usize, usize) {
    let rules = patterns::itr_document_rules();
    let data = ItrDocumentData {
        pan: text_field(rules, "pan", text),
        gross_income: amount_field(rules, "gross_income", text),
        taxable_income: amount_field(rules, "taxable_income", text),
        tax_paid: amount_field(rules, "tax_paid", text),
        assessment_year: text_field(rules, "assessment_year", text),
    };

    let found = [&data.gross_income, &data.taxable_income, &data.tax_paid]
        .into_iter()
        .filter(|value| is_found(value))
        .count();

    (DocumentData::ItrDocument(data), found, 3)
}

fn extract_cibil_report(text: &str) -> (DocumentData, usize, usize) {
    let rules = patterns::cibil_report_rules();
    let cibil_score: u16 = patterns::first_capture(rules, "cibil_score", text)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);

    let data = CibilReportData {
        number_of_loans: count_field(rules, "number_of_loans", text),
        total_loan_amount: amount_field(rules, "total_loan_amount", text),
        amount_overdue: amount_field(rules, "amount_overdue", text),
        settled_and_written_off: amount_field(rules, "settled_and_written_off", text),
        suit_filed_status: patterns::first_capture(rules, "suit_filed_status", text)
            .unwrap_or_else(|| "unknown".to_string()),
        payment_history: classify_payment_history(cibil_score),
        cibil_score,
    };

    let mut found = 0;
    if data.cibil_score > 0 {
        found += 1;
    }
    if data.number_of_loans > 0 {
        found += 1;
    }
    if is_found(&data.total_loan_amount) {
        found += 1;
    }

    (DocumentData::CibilReport(data), found, 3)
}

fn classify_payment_history(score: u16) -> PaymentHistory {
    if score == 0 {
        PaymentHistory::Unknown
    } else if score >= 750 {
        PaymentHistory::Excellent
    } else if score >= 700 {
        PaymentHistory::Good
    } else if score >= 650 {
        PaymentHistory::Fair
    } else {
        PaymentHistory::Poor
    }
}
