//! Receipt
//!
//! The outcome of pricing a cart, and a terminal rendering of it.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{basket::Cart, campaigns::CampaignCategory, pricing::PricingError};

/// Errors that can occur when building or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// An amount has no whole number of minor units.
    #[error("amount cannot be shown in minor units: {0}")]
    MinorUnits(Decimal),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One applied campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountLine {
    /// Campaign id
    pub id: String,

    /// Campaign name
    pub campaign_name: String,

    /// Category the campaign won
    pub category: CampaignCategory,

    /// Amount taken off the running total
    pub amount: Decimal,
}

/// Final price of a cart and how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResult {
    original_total: Decimal,
    final_price: Decimal,
    breakdown: SmallVec<[DiscountLine; 3]>,
    applied_campaign_ids: SmallVec<[String; 3]>,
}

impl DiscountResult {
    /// Build a result by taking each breakdown line off the original total, in order.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if a subtraction cannot be represented.
    pub fn new(
        original_total: Decimal,
        breakdown: SmallVec<[DiscountLine; 3]>,
    ) -> Result<Self, PricingError> {
        let final_price = breakdown.iter().try_fold(original_total, |total, line| {
            total
                .checked_sub(line.amount)
                .ok_or(PricingError::Overflow("subtracting a discount"))
        })?;

        let applied_campaign_ids = breakdown.iter().map(|line| line.id.clone()).collect();

        Ok(Self {
            original_total,
            final_price,
            breakdown,
            applied_campaign_ids,
        })
    }

    /// Total before any discount
    #[must_use]
    pub fn original_total(&self) -> Decimal {
        self.original_total
    }

    /// Total after every applied discount
    #[must_use]
    pub fn final_price(&self) -> Decimal {
        self.final_price
    }

    /// Applied campaigns, in category order
    #[must_use]
    pub fn breakdown(&self) -> &[DiscountLine] {
        &self.breakdown
    }

    /// Ids of the applied campaigns, in category order
    #[must_use]
    pub fn applied_campaign_ids(&self) -> &[String] {
        &self.applied_campaign_ids
    }

    /// Amount saved across all campaigns.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.original_total - self.final_price
    }

    /// Savings relative to the original total.
    #[must_use]
    pub fn savings_percent(&self) -> Percentage {
        if self.original_total.is_zero() {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(self.savings() / self.original_total)
    }

    /// Prints the receipt for `cart`.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be formatted or the writer fails.
    pub fn write_to(&self, mut out: impl io::Write, cart: &Cart) -> Result<(), ReceiptError> {
        write_table(&mut out, item_rows(cart)?, &[3, 4, 5])?;

        if !self.breakdown.is_empty() {
            write_table(&mut out, discount_rows(self)?, &[3, 4])?;
        }

        write_receipt_summary(&mut out, self)
    }
}

fn item_rows(cart: &Cart) -> Result<Builder, ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Category", "Qty", "Unit Price", "Line Total"]);

    for (idx, item) in cart.iter().enumerate() {
        let line_total = item
            .line_total()
            .ok_or(PricingError::Overflow("pricing a receipt line"))?;

        builder.push_record([
            format!("#{:<3}", idx + 1),
            item.name().to_string(),
            item.category().to_string(),
            item.quantity().to_string(),
            format!("{}", thb(item.price())?),
            format!("{}", thb(line_total)?),
        ]);
    }

    Ok(builder)
}

fn discount_rows(result: &DiscountResult) -> Result<Builder, ReceiptError> {
    let mut builder = Builder::default();
    let mut running_total = result.original_total;

    builder.push_record(["", "Campaign", "Category", "Discount", "Running Total"]);

    for line in &result.breakdown {
        running_total -= line.amount;

        builder.push_record([
            line.id.clone(),
            line.campaign_name.clone(),
            line.category.to_string(),
            format!("-{}", thb(line.amount)?),
            format!("{}", thb(running_total)?),
        ]);
    }

    Ok(builder)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: &[usize],
) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);

    for &col in right_aligned {
        table.modify(Columns::new(col..col + 1), Alignment::right());
    }

    let table_str = dim_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

fn write_receipt_summary(
    out: &mut impl io::Write,
    result: &DiscountResult,
) -> Result<(), ReceiptError> {
    let saved_points = percent_points_from_fractional_percentage(result.savings_percent());

    let rows = [
        SummaryRow::plain("Subtotal:", thb(result.original_total)?.to_string()),
        SummaryRow::bold("Total:", thb(result.final_price)?.to_string()),
        SummaryRow::plain(
            "Savings:",
            format!("({saved_points:.2}%) {}", thb(result.savings())?),
        ),
    ];

    let label_width = rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|row| row.value.len()).max().unwrap_or(0);

    for row in &rows {
        row.write(&mut *out, label_width, value_width)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

/// One label/value pair printed under the tables.
struct SummaryRow {
    label: &'static str,
    value: String,
    bold: bool,
}

impl SummaryRow {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            bold: false,
        }
    }

    fn bold(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            bold: true,
        }
    }

    // Widths are measured on the plain text; escapes are added after padding.
    fn write(
        &self,
        out: &mut impl io::Write,
        label_width: usize,
        value_width: usize,
    ) -> Result<(), ReceiptError> {
        let label = format!("{:>label_width$}", self.label);
        let value = format!("{:>value_width$}", self.value);

        let result = if self.bold {
            writeln!(out, " {BOLD}{label}{RESET}  {BOLD}{value}{RESET}  ")
        } else {
            writeln!(out, " {label}  {value}  ")
        };

        result.map_err(|_err| ReceiptError::IO)
    }
}

const BOLD: &str = "\x1b[1m";
const GREY: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Formats an amount as Thai baht.
fn thb(amount: Decimal) -> Result<Money<'static, Currency>, ReceiptError> {
    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(ReceiptError::MinorUnits(amount))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(ReceiptError::MinorUnits(amount))?;

    Ok(Money::from_minor(minor, iso::THB))
}

/// Converts a fractional percentage to percent points for display.
fn percent_points_from_fractional_percentage(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}

fn is_box_drawing(ch: char) -> bool {
    matches!(ch, '\u{2500}'..='\u{257F}')
}

/// Greys out table borders so item and discount rows stand out.
fn dim_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() * 2);
    let mut chars = table.chars().peekable();

    while let Some(ch) = chars.next() {
        if !is_box_drawing(ch) {
            out.push(ch);
            continue;
        }

        out.push_str(GREY);
        out.push(ch);

        while let Some(next) = chars.next_if(|next| is_box_drawing(*next)) {
            out.push(next);
        }

        out.push_str(RESET);
    }

    out
}
