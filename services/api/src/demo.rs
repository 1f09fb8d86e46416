use crate::error::AppError;
use clap::Args;
use std::path::PathBuf;

use credit_ai::workflows::documents::{extract, DocumentType};
use credit_ai::workflows::eligibility::{EligibilityEngine, EligibilityInput};
use credit_ai::workflows::roster::portfolio_from_path;
use credit_ai::workflows::underwriting::{assess_quality, CibilDataContext};

#[derive(Args, Debug)]
pub(crate) struct PortfolioReportArgs {
    /// Path to the roster CSV export
    #[arg(long)]
    pub(crate) roster: PathBuf,
}

pub(crate) fn run_portfolio_report(args: PortfolioReportArgs) -> Result<(), AppError> {
    let summary = portfolio_from_path(&args.roster)?;
    println!("{}", serde_json::to_string_pretty(&summary).expect("summary serializes"));
    Ok(())
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the intermediate extraction results as well
    #[arg(long)]
    pub(crate) verbose: bool,
}

const DEMO_CIBIL: &str = "\
CIBIL TransUnion Score: 728\n\
Number of Loans: 4\n\
Total Loan Amount: ₹18,50,000\n\
Amount Overdue: ₹0\n";

const DEMO_BALANCE_SHEET: &str = "\
Total Assets: ₹92,00,000\n\
Total Liabilities: ₹41,00,000\n\
Current Assets: ₹26,00,000\n\
Current Liabilities: ₹14,00,000\n";

const DEMO_BANK_STATEMENT: &str = "\
Account Number: 004512349876\n\
Total Credits: ₹88,00,000\n\
Total Debits: ₹71,00,000\n\
Average Balance: ₹2,40,000\n\
Cheque Bounces: 0\n";

/// Walk a canned applicant through extraction, quality, and eligibility.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let cibil = extract(DocumentType::CibilReport, DEMO_CIBIL, "demo-cibil.txt");
    let balance = extract(
        DocumentType::BalanceSheet,
        DEMO_BALANCE_SHEET,
        "demo-balance.txt",
    );
    let bank = extract(
        DocumentType::BankStatement,
        DEMO_BANK_STATEMENT,
        "demo-bank.txt",
    );

    if args.verbose {
        for document in [&cibil, &balance, &bank] {
            println!(
                "{}",
                serde_json::to_string_pretty(document).expect("document serializes")
            );
        }
    }

    let context = cibil
        .cibil_report()
        .map(CibilDataContext::from)
        .unwrap_or_default();
    let assessment = assess_quality(&context, &["pattern_extraction".to_string()]);
    println!(
        "quality: {} ({:.1}) with {} flag(s)",
        assessment.quality_level.label(),
        assessment.quality_score,
        assessment.flags.len()
    );

    let engine = EligibilityEngine::default();
    let result = engine.calculate(&EligibilityInput {
        business_type: "Manufacturing".to_string(),
        annual_revenue: 14_500_000.0,
        loan_amount: 2_500_000.0,
        existing_loan_amount: 800_000.0,
        loan_term_months: 48,
        credit_score: 728,
        documents: vec![cibil, balance, bank],
    });

    match &result.rejection_reason {
        None => println!("eligible with score {:.1}", result.overall_score),
        Some(reason) => println!(
            "not eligible (score {:.1}): {reason}",
            result.overall_score
        ),
    }

    Ok(())
}
