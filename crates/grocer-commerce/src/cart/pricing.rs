//! Cart pricing calculations.
//!
//! Totals are always derived from the current snapshot and never stored.

use crate::cart::CartLine;
use crate::error::CommerceError;
use crate::ids::LineId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing breakdown for a cart snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of all line totals.
    pub grand_total: Money,
    /// Sum of all quantities.
    pub item_count: i64,
    /// Per-line breakdown, in cart order.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Price a cart snapshot.
    pub fn calculate(cart: &[CartLine]) -> Result<Self, CommerceError> {
        let currency = cart
            .first()
            .map(|line| line.price.currency)
            .unwrap_or_default();

        let line_items = cart
            .iter()
            .map(LineItemPricing::for_line)
            .collect::<Result<Vec<_>, _>>()?;

        let grand_total = Money::try_sum(line_items.iter().map(|l| &l.total), currency)
            .ok_or(CommerceError::Overflow)?;

        let item_count = cart
            .iter()
            .try_fold(0_i64, |acc, line| acc.checked_add(line.quantity))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            grand_total,
            item_count,
            line_items,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub line_id: LineId,
    pub unit_price: Money,
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub total: Money,
}

impl LineItemPricing {
    fn for_line(line: &CartLine) -> Result<Self, CommerceError> {
        Ok(Self {
            line_id: line.id.clone(),
            unit_price: line.price,
            quantity: line.quantity,
            total: line.total().ok_or(CommerceError::Overflow)?,
        })
    }
}

/// Total price of a cart: `sum(price * quantity)`.
pub fn cart_total(cart: &[CartLine]) -> Result<Money, CommerceError> {
    let currency: Currency = cart
        .first()
        .map(|line| line.price.currency)
        .unwrap_or_default();
    cart.iter().try_fold(Money::zero(currency), |acc, line| {
        line.total()
            .and_then(|total| acc.try_add(&total))
            .ok_or(CommerceError::Overflow)
    })
}
