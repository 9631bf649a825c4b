use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{ParseRejection, Transaction};

pub const FIELD_COUNT: usize = 8;
const DELIMITER: char = '|';

/// A raw line that could not be turned into a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRejection {
    /// 1-based position of the line within the parsed sequence.
    pub line_number: usize,
    pub reason: ParseRejection
}

/// Every line accounted for: parsed rows in input order plus the rejected ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub transactions: Vec<Transaction>,
    pub rejections: Vec<LineRejection>
}

impl Display for LineRejection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Rejected line [{}]: {}", self.line_number, self.reason)
    }
}

impl ParseOutcome {
    pub fn rejected_count(&self) -> usize {
        self.rejections.len()
    }
}

/// Parses one pipe-delimited line.
///
/// Commas are removed from the product name and from both numeric fields before
/// conversion.
///
/// # Errors
/// Returns `ParseRejection` if:
/// - The line does not split into exactly eight fields.
/// - The quantity is not an integer or the unit price is not a decimal.
/// - Their product cannot be represented.
pub fn parse_line(line: &str) -> Result<Transaction, ParseRejection> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();

    let [transaction_id, date, product_id, product_name, quantity, unit_price, customer_id, region] = fields.as_slice() else {
        return Err(ParseRejection::FieldCount { expected: FIELD_COUNT, found: fields.len() })
    };

    let quantity = parse_quantity(quantity)?;
    let unit_price = parse_unit_price(unit_price)?;

    if Decimal::from(quantity).checked_mul(unit_price).is_none() {
        return Err(ParseRejection::AmountOverflow { quantity, unit_price })
    }

    Ok(Transaction {
        transaction_id: transaction_id.to_string(),
        date: date.to_string(),
        product_id: product_id.to_string(),
        product_name: strip_commas(product_name),
        quantity,
        unit_price,
        customer_id: customer_id.to_string(),
        region: region.to_string()
    })
}

/// Parses every line, keeping a tagged rejection for each one that fails.
pub fn parse_transactions<S: AsRef<str>>(lines: &[S]) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (index, line) in lines.iter().enumerate() {
        match parse_line(line.as_ref()) {
            Ok(transaction) => outcome.transactions.push(transaction),
            Err(reason) => {
                let rejection = LineRejection { line_number: index + 1, reason };
                warn!("{rejection}");
                outcome.rejections.push(rejection);
            }
        }
    }

    debug!("Parsed {} transactions, rejected {} lines", outcome.transactions.len(), outcome.rejected_count());

    outcome
}

fn strip_commas(value: &str) -> String {
    value.replace(',', "")
}

fn parse_quantity(raw: &str) -> Result<i64, ParseRejection> {
    strip_commas(raw).trim().parse()
        .map_err(|_| ParseRejection::InvalidQuantity(raw.to_string()))
}

fn parse_unit_price(raw: &str) -> Result<Decimal, ParseRejection> {
    let cleaned = strip_commas(raw);
    let cleaned = cleaned.trim();

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| ParseRejection::InvalidUnitPrice(raw.to_string()))
}
