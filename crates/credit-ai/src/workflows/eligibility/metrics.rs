//! Derived financial ratios and heuristic sub-scores.

use crate::workflows::documents::{
    parse_amount, BalanceSheetData, DocumentType, ExtractedDocument, FilingRegularity,
    CashFlowPattern,
};

/// Share of revenue treated as net operating income for debt coverage.
pub(crate) const NET_OPERATING_MARGIN: f64 = 0.20;

/// Sentinel for an undefined ratio (no debt service, or zero liabilities).
/// Kept JSON-safe instead of infinity; downstream code only bands it and
/// must not feed it into further arithmetic.
pub(crate) const UNDEFINED_RATIO: f64 = 999.0;

/// Standard amortizing-loan monthly payment.
pub(crate) fn monthly_payment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    if principal <= 0.0 || months == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return principal / months as f64;
    }

    let factor = (1.0 + monthly_rate).powi(months as i32);
    principal * monthly_rate * factor / (factor - 1.0)
}

/// DSCR over the combined existing and requested debt.
pub(crate) fn debt_service_coverage(
    annual_revenue: f64,
    total_debt: f64,
    annual_rate: f64,
    months: u32,
) -> (f64, f64, f64) {
    let payment = monthly_payment(total_debt, annual_rate, months);
    let annual_debt_service = payment * 12.0;
    let dscr = if annual_debt_service == 0.0 {
        UNDEFINED_RATIO
    } else {
        annual_revenue * NET_OPERATING_MARGIN / annual_debt_service
    };

    (dscr, annual_debt_service, payment)
}

fn most_recent<'a, T>(
    documents: &'a [ExtractedDocument],
    document_type: DocumentType,
    pick: impl Fn(&'a ExtractedDocument) -> Option<&'a T>,
) -> Option<&'a T> {
    documents
        .iter()
        .filter(|document| document.document_type == document_type)
        .max_by_key(|document| document.extracted_at)
        .and_then(pick)
}

fn ratio_of(assets: &str, liabilities: &str) -> Option<f64> {
    let assets = parse_amount(assets)?;
    let liabilities = parse_amount(liabilities)?;
    if liabilities == 0.0 {
        return Some(UNDEFINED_RATIO);
    }
    Some(assets / liabilities)
}

/// Current ratio from the most recent balance sheet, preferring the
/// current-specific figures and falling back to the totals.
pub(crate) fn current_ratio(documents: &[ExtractedDocument]) -> Option<f64> {
    let sheet: &BalanceSheetData =
        most_recent(documents, DocumentType::BalanceSheet, |document| {
            document.balance_sheet()
        })?;

    ratio_of(&sheet.current_assets, &sheet.current_liabilities)
        .or_else(|| ratio_of(&sheet.total_assets, &sheet.total_liabilities))
}

/// Year-over-year revenue growth in percent against the best available
/// historical figure: P&L revenue first, else annualized GST turnover.
pub(crate) fn revenue_growth(annual_revenue: f64, documents: &[ExtractedDocument]) -> Option<f64> {
    let from_profit_loss = most_recent(documents, DocumentType::ProfitLoss, |document| {
        document.profit_loss()
    })
    .and_then(|data| parse_amount(&data.revenue));

    let historical = from_profit_loss.or_else(|| {
        most_recent(documents, DocumentType::GstReturns, |document| {
            document.gst_returns()
        })
        .and_then(|data| parse_amount(&data.monthly_turnover))
        .map(|monthly| monthly * 12.0)
    })?;

    if historical <= 0.0 {
        return None;
    }

    Some((annual_revenue - historical) / historical * 100.0)
}

/// GST filing discipline score; absence of data is neutral.
pub(crate) fn gst_compliance_score(documents: &[ExtractedDocument]) -> f64 {
    let Some(data) = most_recent(documents, DocumentType::GstReturns, |document| {
        document.gst_returns()
    }) else {
        return 50.0;
    };

    match data.filing_regularity {
        FilingRegularity::Regular => 100.0,
        // Never produced by the extractor today, but accepted on input.
        FilingRegularity::MostlyRegular => 75.0,
        FilingRegularity::Irregular => 30.0,
        FilingRegularity::Delayed | FilingRegularity::Unknown => 50.0,
    }
}

/// Banking relationship heuristic from the most recent bank statement.
pub(crate) fn banking_score(documents: &[ExtractedDocument]) -> f64 {
    let Some(data) = most_recent(documents, DocumentType::BankStatement, |document| {
        document.bank_statement()
    }) else {
        return 50.0;
    };

    let mut score = 70.0 - 10.0 * data.cheque_bounces as f64;
    score += match data.cash_flow_pattern {
        CashFlowPattern::Positive => 20.0,
        CashFlowPattern::Negative => -20.0,
        CashFlowPattern::Mixed => 0.0,
    };

    score.clamp(0.0, 100.0)
}

/// Sector risk lookup; unrecognized business types score neutral.
pub(crate) fn industry_risk_score(business_type: &str) -> f64 {
    match business_type.trim().to_ascii_lowercase().as_str() {
        "technology" => 85.0,
        "healthcare" => 80.0,
        "education" => 78.0,
        "manufacturing" => 75.0,
        "services" => 72.0,
        "retail" => 70.0,
        "trading" => 68.0,
        "agriculture" => 62.0,
        "hospitality" => 60.0,
        "textiles" => 58.0,
        "real estate" => 56.0,
        "construction" => 55.0,
        _ => 65.0,
    }
}

/// Map the 300-900 bureau range onto 0-100.
pub(crate) fn credit_score_normalized(credit_score: u16) -> f64 {
    ((credit_score as f64 - 300.0) / 600.0 * 100.0).clamp(0.0, 100.0)
}
