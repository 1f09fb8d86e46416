use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The document classes the extraction pipeline understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    BalanceSheet,
    ProfitLoss,
    BankStatement,
    GstReturns,
    ItrDocument,
    CibilReport,
}

impl DocumentType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::BalanceSheet,
            Self::ProfitLoss,
            Self::BankStatement,
            Self::GstReturns,
            Self::ItrDocument,
            Self::CibilReport,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::ProfitLoss => "profit_loss",
            Self::BankStatement => "bank_statement",
            Self::GstReturns => "gst_returns",
            Self::ItrDocument => "itr_document",
            Self::CibilReport => "cibil_report",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::ProfitLoss => "Profit & Loss Statement",
            Self::BankStatement => "Bank Statement",
            Self::GstReturns => "GST Returns",
            Self::ItrDocument => "ITR Filing",
            Self::CibilReport => "CIBIL Report",
        }
    }
}

/// The only fatal error in the extraction layer: a document type string the
/// pipeline does not support. Every other irregularity degrades to sentinel
/// values inside the extracted record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported document type: {0}")]
pub struct UnknownDocumentType(pub String);

impl FromStr for DocumentType {
    type Err = UnknownDocumentType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "balance_sheet" => Ok(Self::BalanceSheet),
            "profit_loss" => Ok(Self::ProfitLoss),
            "bank_statement" => Ok(Self::BankStatement),
            "gst_returns" => Ok(Self::GstReturns),
            "itr_document" => Ok(Self::ItrDocument),
            "cibil_report" => Ok(Self::CibilReport),
            other => Err(UnknownDocumentType(other.to_string())),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence tier derived from the fraction of required fields recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionConfidence {
    High,
    Medium,
    Low,
}

impl ExtractionConfidence {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// Direction of cash movement classified from a bank statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowPattern {
    Positive,
    Negative,
    Mixed,
}

/// GST return filing discipline reported by the extractor. `MostlyRegular`
/// is accepted on the scoring side but never produced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingRegularity {
    Regular,
    MostlyRegular,
    Irregular,
    Delayed,
    Unknown,
}

/// Qualitative repayment bucket derived from the bureau score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentHistory {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

/// Figures recovered from a balance sheet. Amounts are display strings
/// (`"₹1,50,000"`), with `"N/A"` standing in for anything not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetData {
    pub total_assets: String,
    pub total_liabilities: String,
    pub current_assets: String,
    pub current_liabilities: String,
    pub net_worth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLossData {
    pub revenue: String,
    pub expenses: String,
    pub gross_profit: String,
    pub net_profit: String,
    pub ebitda: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankStatementData {
    pub account_number: String,
    pub total_credits: String,
    pub total_debits: String,
    pub average_balance: String,
    pub cheque_bounces: u32,
    pub cash_flow_pattern: CashFlowPattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstReturnsData {
    pub gstin: String,
    pub monthly_turnover: String,
    pub annual_turnover: String,
    pub tax_paid: String,
    pub filing_regularity: FilingRegularity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItrDocumentData {
    pub pan: String,
    pub gross_income: String,
    pub taxable_income: String,
    pub tax_paid: String,
    pub assessment_year: String,
}

/// Bureau report snapshot. A score of `0` means the score was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CibilReportData {
    pub cibil_score: u16,
    pub number_of_loans: u32,
    pub total_loan_amount: String,
    pub amount_overdue: String,
    pub settled_and_written_off: String,
    pub suit_filed_status: String,
    pub payment_history: PaymentHistory,
}

/// Typed payload of an extracted document. Field sets are disjoint across
/// variants, which keeps the untagged representation unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentData {
    BalanceSheet(BalanceSheetData),
    ProfitLoss(ProfitLossData),
    BankStatement(BankStatementData),
    GstReturns(GstReturnsData),
    ItrDocument(ItrDocumentData),
    CibilReport(CibilReportData),
}

/// One processed document: immutable after creation, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub document_type: DocumentType,
    pub file_name: String,
    pub extracted_at: DateTime<Utc>,
    pub data: DocumentData,
    pub extraction_confidence: ExtractionConfidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl ExtractedDocument {
    pub fn balance_sheet(&self) -> Option<&BalanceSheetData> {
        match &self.data {
            DocumentData::BalanceSheet(data) => Some(data),
            _ => None,
        }
    }

    pub fn profit_loss(&self) -> Option<&ProfitLossData> {
        match &self.data {
            DocumentData::ProfitLoss(data) => Some(data),
            _ => None,
        }
    }

    pub fn bank_statement(&self) -> Option<&BankStatementData> {
        match &self.data {
            DocumentData::BankStatement(data) => Some(data),
            _ => None,
        }
    }

    pub fn gst_returns(&self) -> Option<&GstReturnsData> {
        match &self.data {
            DocumentData::GstReturns(data) => Some(data),
            _ => None,
        }
    }

    pub fn itr_document(&self) -> Option<&ItrDocumentData> {
        match &self.data {
            DocumentData::ItrDocument(data) => Some(data),
            _ => None,
        }
    }

    pub fn cibil_report(&self) -> Option<&CibilReportData> {
        match &self.data {
            DocumentData::CibilReport(data) => Some(data),
            _ => None,
        }
    }
}
