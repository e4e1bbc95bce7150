//! Canned analysis used whenever the AI provider cannot produce one.

use crate::models::{AnalysisResult, DetectedIssue, RiskLevel};

const SUMMARY: &str = "We could not run a personalised review right now, so this is a general \
checklist of the issues that most often trigger notices for salaried filers. Review each item \
against your documents before filing.";

const ISSUES: [(&str, &str, &str, &str); 4] = [
    (
        "tds-mismatch",
        "TDS mismatch with Form 26AS",
        "Tax deducted at source may not match Form 26AS / AIS.",
        "Compare the TDS shown on your salary slips and Form 16 with the credits in Form 26AS and \
the Annual Information Statement. Differences usually mean an employer or deductor filed late \
or under the wrong PAN, and the department will only allow credit for what appears in 26AS.",
    ),
    (
        "unreported-interest",
        "Interest income not reported",
        "Savings and deposit interest is often left out of the return.",
        "Interest from savings accounts, fixed deposits and recurring deposits is taxable under \
'Income from other sources'. Banks report it in AIS even when no TDS was deducted, so omitting \
it is one of the most common causes of a mismatch notice.",
    ),
    (
        "capital-gains",
        "Capital gains disclosure",
        "Sales of shares, mutual funds or property must be disclosed.",
        "Any sale of listed shares, mutual fund units or property during the year must be \
reported in the capital gains schedule, even when the gain is exempt or a loss. ITR-1 cannot be \
used when there are capital gains; use ITR-2 or ITR-3 instead.",
    ),
    (
        "deduction-proof",
        "Deductions without supporting proof",
        "Claims under 80C, 80D and HRA need documentary evidence.",
        "Deductions claimed in the return but not declared to your employer are frequently \
questioned. Keep receipts for insurance premiums, investments, rent and donations, and make \
sure the amounts claimed do not exceed the statutory limits.",
    ),
];

/// The fixed fallback result. Pure and identical on every call.
pub fn fallback_result() -> AnalysisResult {
    AnalysisResult {
        risk_level: RiskLevel::Medium,
        summary: SUMMARY.to_string(),
        detected_issues: ISSUES
            .iter()
            .map(|(id, title, short, long)| DetectedIssue {
                id: id.to_string(),
                title: title.to_string(),
                short: short.to_string(),
                long: long.to_string(),
            })
            .collect(),
    }
}
