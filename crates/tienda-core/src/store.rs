//! In-memory store service.
//!
//! [`Store`] owns users, the product catalogue, and the order log. All state
//! lives behind a single [`tokio::sync::RwLock`]; order placement validates
//! every line and decrements stock under the same write lock, so an order is
//! either applied completely or not at all.
//!
//! # Usage
//!
//! ```rust
//! use tienda_core::{NewProduct, Store, UserKind};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Store::new();
//! let ana = store
//!     .register_user(UserKind::Customer, "Ana", "ana@example.com", None)
//!     .await
//!     .unwrap();
//! let mug = store
//!     .add_product(NewProduct {
//!         kind: "generico".into(),
//!         name: "Mug".into(),
//!         price: 7.5,
//!         stock: 10,
//!         ..Default::default()
//!     })
//!     .await
//!     .unwrap();
//!
//! let order = store.place_order(ana.id, &[(mug.id, 2)]).await.unwrap();
//! assert_eq!(order.total(), 15.0);
//! # }
//! ```

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::types::{NewProduct, Order, OrderLine, Product, ProductId, User, UserId, UserKind};
use crate::{Error, Result};

#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    user_order: Vec<UserId>,
    products: HashMap<ProductId, Product>,
    product_order: Vec<ProductId>,
    orders: Vec<Order>,
}

impl StoreState {
    fn user(&self, id: UserId) -> Result<&User> {
        self.users
            .get(&id)
            .ok_or_else(|| Error::UserNotFound { id: id.to_string() })
    }

    fn customer(&self, id: UserId) -> Result<&User> {
        let user = self.user(id)?;
        if !user.is_customer() {
            return Err(Error::NotACustomer { id: id.to_string() });
        }
        Ok(user)
    }

    fn product(&self, id: ProductId) -> Result<&Product> {
        self.products
            .get(&id)
            .ok_or_else(|| Error::ProductNotFound { id: id.to_string() })
    }
}

/// Shared in-memory store of users, products, and orders.
///
/// Wrap in an `Arc` to share across request handlers.
#[derive(Default)]
pub struct Store {
    state: RwLock<StoreState>,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------------

    /// Registers a new customer or administrator.
    pub async fn register_user(
        &self,
        kind: UserKind,
        name: &str,
        email: &str,
        address: Option<String>,
    ) -> Result<User> {
        let user = User::new(kind, name, email, address)?;

        let mut state = self.state.write().await;
        state.user_order.push(user.id);
        state.users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, kind = kind.as_str(), "Registered user");
        Ok(user)
    }

    /// Looks up a user by ID.
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.state.read().await.user(id).cloned()
    }

    /// All users in registration order.
    pub async fn list_users(&self) -> Vec<User> {
        let state = self.state.read().await;
        state
            .user_order
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect()
    }

    // ------------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------------

    /// Validates a product draft and adds it to the catalogue.
    pub async fn add_product(&self, draft: NewProduct) -> Result<Product> {
        let product = draft.into_product()?;

        let mut state = self.state.write().await;
        state.product_order.push(product.id);
        state.products.insert(product.id, product.clone());

        tracing::info!(
            product_id = %product.id,
            kind = product.kind.tag().as_str(),
            stock = product.stock,
            "Added product"
        );
        Ok(product)
    }

    /// Looks up a product by ID.
    pub async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.state.read().await.product(id).cloned()
    }

    /// All products in insertion order.
    pub async fn list_products(&self) -> Vec<Product> {
        let state = self.state.read().await;
        state
            .product_order
            .iter()
            .filter_map(|id| state.products.get(id).cloned())
            .collect()
    }

    /// Removes a product from the catalogue.
    ///
    /// Past orders keep their snapshot of the product.
    pub async fn remove_product(&self, id: ProductId) -> Result<Product> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .remove(&id)
            .ok_or_else(|| Error::ProductNotFound { id: id.to_string() })?;
        state.product_order.retain(|p| *p != id);

        tracing::info!(product_id = %id, "Removed product");
        Ok(product)
    }

    // ------------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------------

    /// Places an order for a customer.
    ///
    /// Repeated product IDs are merged by summing their quantities. Every
    /// line is checked for existence and stock before any stock is
    /// decremented.
    pub async fn place_order(
        &self,
        customer_id: UserId,
        items: &[(ProductId, u32)],
    ) -> Result<Order> {
        let mut state = self.state.write().await;

        let customer_name = state.customer(customer_id)?.name.clone();

        let requested = merge_items(items)?;

        let mut lines = Vec::with_capacity(requested.len());
        for &(product_id, quantity) in &requested {
            let product = state.product(product_id)?;
            if !product.has_stock(quantity) {
                return Err(Error::InsufficientStock {
                    product: product.name.clone(),
                    requested: quantity,
                    available: product.stock,
                });
            }
            // merged quantity never exceeds stock (a u32) at this point
            let quantity = u32::try_from(quantity).map_err(|_| {
                Error::validation_field("cantidad", "quantity is too large")
            })?;
            lines.push(OrderLine::from_product(product, quantity));
        }

        for line in &lines {
            if let Some(product) = state.products.get_mut(&line.product_id) {
                product.adjust_stock(-i64::from(line.quantity))?;
            }
        }

        let order = Order::new(customer_id, customer_name, lines);
        state.orders.push(order.clone());

        tracing::info!(
            order_id = %order.id,
            customer_id = %customer_id,
            lines = order.lines.len(),
            units = order.item_count(),
            total = order.total(),
            "Placed order"
        );
        Ok(order)
    }

    /// All orders placed by a customer, oldest first.
    pub async fn orders_for_customer(&self, customer_id: UserId) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        state.customer(customer_id)?;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

/// Validates quantities and folds duplicate product IDs together, keeping
/// first-seen order.
fn merge_items(items: &[(ProductId, u32)]) -> Result<Vec<(ProductId, u64)>> {
    if items.is_empty() {
        return Err(Error::EmptyOrder);
    }

    let mut merged: Vec<(ProductId, u64)> = Vec::with_capacity(items.len());
    for &(product_id, quantity) in items {
        if quantity == 0 {
            return Err(Error::validation_field(
                "cantidad",
                format!("quantity for product {product_id} must be at least 1"),
            ));
        }
        match merged.iter_mut().find(|(id, _)| *id == product_id) {
            Some((_, total)) => *total += u64::from(quantity),
            None => merged.push((product_id, u64::from(quantity))),
        }
    }
    Ok(merged)
}

// ============================================================================
// Tests
// ============================================================================
