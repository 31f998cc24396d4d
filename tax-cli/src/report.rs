//! Text rendering of a [`TaxSummary`].

use std::fmt;

use rust_decimal::Decimal;
use tax_core::TaxSummary;
use tax_core::calculations::common::round_half_up;

const WIDTH: usize = 64;
const LABEL_WIDTH: usize = 48;
const DISCLAIMER: &str =
    "Disclaimer: This assumes standard deduction, etc. Values are computed as per the script logic.";

/// Formats an amount as dollars and cents with thousands separators.
///
/// Negative amounts keep the sign after the dollar sign, e.g. `$-1,234.56`.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("${sign}{grouped}.{cents}")
}

/// The yearly summary as printed to the terminal.
pub struct SummaryReport<'a> {
    summary: &'a TaxSummary,
    state: &'a str,
}

impl<'a> SummaryReport<'a> {
    pub fn new(
        summary: &'a TaxSummary,
        state: &'a str,
    ) -> Self {
        Self { summary, state }
    }
}

fn line(
    f: &mut fmt::Formatter<'_>,
    indent: usize,
    label: &str,
    amount: Decimal,
) -> fmt::Result {
    let width = LABEL_WIDTH - indent;
    writeln!(
        f,
        "{:indent$}{label:<width$}{:>amount_width$}",
        "",
        format_money(amount),
        amount_width = WIDTH - LABEL_WIDTH,
    )
}

fn rule(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "    {}", "-".repeat(WIDTH - 4))
}

fn banner(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", "=".repeat(WIDTH))
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = self.summary;

        banner(f)?;
        writeln!(f, "Tax Summary {}", s.year)?;
        banner(f)?;

        line(f, 4, "W2 Wages (Line 1)", s.wages)?;
        line(f, 4, "Interest (Line 2b)", s.interest)?;
        line(f, 4, "State Interest", s.interest_state)?;
        line(f, 8, "Non-Qualified Dividends", s.dividends_short_term)?;
        line(f, 8, "Short-Term Capital Gain", s.capital_gains_short_term)?;
        line(f, 4, "Short-term total", s.short_term_total)?;
        line(f, 8, "Qualified Dividends (Line 3a)", s.dividends_long_term)?;
        line(f, 8, "Long-term Capital Gains", s.capital_gains_long_term)?;
        line(f, 4, "Long-term total", s.long_term_total)?;
        line(f, 4, "Loss to offset income", s.loss)?;
        line(f, 8, "Business Income", s.business_income)?;
        line(f, 8, "Home Office Deduction", s.home_office_deduction)?;
        line(f, 8, "Business Expenses", s.business_expenses)?;
        line(f, 4, "Net Business Income (Line 8)", s.net_business_income)?;
        rule(f)?;

        line(f, 4, "Total (Line 9)", s.total_income)?;
        line(f, 4, "Line 10", s.adjustments)?;
        line(f, 4, "Line 14", s.deductions)?;
        line(f, 4, "Line 15", s.line_15_taxable_income)?;
        rule(f)?;

        line(f, 4, "Final tax bill", s.tax_liability)?;
        line(f, 4, "Self-Employment Tax", s.self_employment_tax)?;
        line(f, 4, "Investment Tax (NIIT)", s.investment_tax)?;
        line(f, 4, "Extra Social Security Tax", s.social_security_extra)?;
        line(f, 4, "Extra Medicare Tax", s.medicare_extra)?;
        line(f, 4, "Foreign Tax Credit", s.foreign_tax_credit)?;
        line(f, 4, "Total Tax Due (Line 24 minus credits)", s.total_tax)?;
        line(f, 4, "Tax Deposited (Line 25a + 26)", s.federal_tax_paid)?;
        rule(f)?;

        line(f, 4, "Total Federal Owed", s.federal_owed)?;
        line(
            f,
            4,
            &format!("Total {} Owed", self.state.to_uppercase()),
            s.state_owed,
        )?;
        line(f, 4, "Max Solo 401(k) Contribution", s.solo_401k_contribution)?;

        banner(f)?;
        writeln!(f, "{DISCLAIMER}")
    }
}
