//! Orders placed by customers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{OrderId, Product, ProductId, UserId};

/// One line of an order: a product snapshot and a quantity.
///
/// The name and unit price are copied when the order is placed, so later
/// catalogue changes (or deletion) do not alter past orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product that was ordered
    pub product_id: ProductId,
    /// Product name at order time
    pub product_name: String,
    /// Unit price at order time
    pub unit_price: f64,
    /// Units ordered
    pub quantity: u32,
}

impl OrderLine {
    /// Snapshot `product` with the given quantity.
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// `unit_price * quantity`.
    pub fn subtotal(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique ID
    pub id: OrderId,
    /// When the order was placed
    pub placed_at: DateTime<Utc>,
    /// Customer who placed it
    pub customer_id: UserId,
    /// Customer name at order time
    pub customer_name: String,
    /// Ordered lines, in request order
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// Creates an order stamped with the current time.
    pub fn new(customer_id: UserId, customer_name: impl Into<String>, lines: Vec<OrderLine>) -> Self {
        Self {
            id: OrderId::new(),
            placed_at: Utc::now(),
            customer_id,
            customer_name: customer_name.into(),
            lines,
        }
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Order {} ({})",
            self.id,
            self.placed_at.format("%Y-%m-%d %H:%M")
        )?;
        writeln!(f, "Customer: {}", self.customer_name)?;
        writeln!(f, "Products:")?;
        for line in &self.lines {
            writeln!(f, "- {} x{}", line.product_name, line.quantity)?;
        }
        write!(f, "Total: ${:.2}", self.total())
    }
}
