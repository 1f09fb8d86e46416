//! Document ingestion: pattern library, field extraction, and the rupee
//! amount canonicalizer shared by the downstream scoring stages.

pub mod amount;
pub mod domain;
mod extractor;
mod patterns;

pub use amount::{format_currency, parse_amount, NOT_AVAILABLE};
pub use domain::{
    BalanceSheetData, BankStatementData, CashFlowPattern, CibilReportData, DocumentData,
    DocumentType, ExtractedDocument, ExtractionConfidence, FilingRegularity, GstReturnsData,
    ItrDocumentData, PaymentHistory, ProfitLossData, UnknownDocumentType,
};
pub use extractor::extract;
