use crate::workflows::underwriting::domain::CibilDataContext;

/// A clean, internally consistent bureau snapshot.
pub(super) fn healthy_context() -> CibilDataContext {
    CibilDataContext {
        cibil_score: Some("750".to_string()),
        number_of_loans: Some("5".to_string()),
        total_loan_amount: Some("₹25.00 L".to_string()),
        amount_overdue: Some("₹50,000".to_string()),
        settled_and_written_off: Some("₹0.00".to_string()),
        suit_filed_status: None,
    }
}

pub(super) fn context_with_score(score: &str) -> CibilDataContext {
    CibilDataContext {
        cibil_score: Some(score.to_string()),
        ..healthy_context()
    }
}
