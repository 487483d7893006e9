//! Request and response bodies.
//!
//! Field names follow the public wire contract (Spanish), while the domain
//! types in `tienda-core` use English names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tienda_auth::Account;
use tienda_core::{NewProduct, Order, OrderLine, Product, ProductId, ProductKind, User};

// ============================================================================
// Users
// ============================================================================

/// Body of `POST /usuarios`.
#[derive(Debug, Clone, Deserialize)]
pub struct UsuarioCreate {
    /// Display name
    pub nombre: String,
    /// Contact email
    pub email: String,
    /// `cliente` or `admin`
    pub tipo: String,
    /// Postal address (customers only)
    #[serde(default)]
    pub direccion_postal: Option<String>,
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsuarioRead {
    /// User ID
    pub id: Uuid,
    /// Display name
    pub nombre: String,
    /// Contact email
    pub email: String,
    /// Whether the user is an administrator
    pub es_admin: bool,
}

impl From<&User> for UsuarioRead {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_uuid(),
            nombre: user.name.clone(),
            email: user.email.clone(),
            es_admin: user.is_admin(),
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// Body of `POST /productos`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductoCreate {
    /// `generico`, `electronico` or `ropa` (any case)
    pub tipo: String,
    /// Product name
    pub nombre: String,
    /// Unit price
    pub precio: f64,
    /// Initial stock
    pub stock: u32,
    /// Warranty months, required for `electronico`
    #[serde(default)]
    pub meses_garantia: Option<u32>,
    /// Size, required for `ropa`
    #[serde(default)]
    pub talla: Option<String>,
    /// Colour, required for `ropa`
    #[serde(default)]
    pub color: Option<String>,
}

impl From<ProductoCreate> for NewProduct {
    fn from(body: ProductoCreate) -> Self {
        Self {
            kind: body.tipo,
            name: body.nombre,
            price: body.precio,
            stock: body.stock,
            warranty_months: body.meses_garantia,
            size: body.talla,
            color: body.color,
        }
    }
}

/// A product as returned by the API.
///
/// Kind-specific fields are omitted when they do not apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductoRead {
    /// Product ID
    pub id: Uuid,
    /// Kind tag
    pub tipo: String,
    /// Product name
    pub nombre: String,
    /// Unit price
    pub precio: f64,
    /// Units on hand
    pub stock: u32,
    /// Warranty months (electronic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meses_garantia: Option<u32>,
    /// Size (clothing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub talla: Option<String>,
    /// Colour (clothing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&Product> for ProductoRead {
    fn from(product: &Product) -> Self {
        let mut read = Self {
            id: product.id.into_uuid(),
            tipo: product.kind.tag().as_str().to_string(),
            nombre: product.name.clone(),
            precio: product.price,
            stock: product.stock,
            meses_garantia: None,
            talla: None,
            color: None,
        };
        match &product.kind {
            ProductKind::Generic => {}
            ProductKind::Electronic { warranty_months } => {
                read.meses_garantia = Some(*warranty_months);
            }
            ProductKind::Clothing { size, color } => {
                read.talla = Some(size.clone());
                read.color = Some(color.clone());
            }
        }
        read
    }
}

// ============================================================================
// Orders
// ============================================================================

/// One requested line in `POST /pedidos`.
#[derive(Debug, Clone, Deserialize)]
pub struct PedidoItemCreate {
    /// Product to order
    pub id_producto: Uuid,
    /// Units to order
    pub cantidad: u32,
}

/// Body of `POST /pedidos`.
#[derive(Debug, Clone, Deserialize)]
pub struct PedidoCreate {
    /// Customer placing the order
    pub id_cliente: Uuid,
    /// Requested lines
    pub items: Vec<PedidoItemCreate>,
}

impl PedidoCreate {
    /// Lines as `(product, quantity)` pairs for the store.
    pub fn items(&self) -> Vec<(ProductId, u32)> {
        self.items
            .iter()
            .map(|item| (ProductId::from_uuid(item.id_producto), item.cantidad))
            .collect()
    }
}

/// An order line as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoItemRead {
    /// Product ID
    pub id_producto: Uuid,
    /// Product name at order time
    pub nombre_producto: String,
    /// Unit price at order time
    pub precio_unitario: f64,
    /// Units ordered
    pub cantidad: u32,
    /// `precio_unitario * cantidad`
    pub subtotal: f64,
}

impl From<&OrderLine> for PedidoItemRead {
    fn from(line: &OrderLine) -> Self {
        Self {
            id_producto: line.product_id.into_uuid(),
            nombre_producto: line.product_name.clone(),
            precio_unitario: line.unit_price,
            cantidad: line.quantity,
            subtotal: line.subtotal(),
        }
    }
}

/// An order as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoRead {
    /// Order ID
    pub id: Uuid,
    /// When the order was placed
    pub fecha: DateTime<Utc>,
    /// Customer name
    pub cliente: String,
    /// Order total
    pub total: f64,
    /// Ordered lines
    pub items: Vec<PedidoItemRead>,
}

impl From<&Order> for PedidoRead {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.into_uuid(),
            fecha: order.placed_at,
            cliente: order.customer_name.clone(),
            total: order.total(),
            items: order.lines.iter().map(PedidoItemRead::from).collect(),
        }
    }
}

// ============================================================================
// Accounts
// ============================================================================

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

/// Body of `POST /auth/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Plain-text password
    pub password: String,
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed JWT
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

/// An account as returned by the API. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRead {
    /// Account ID
    pub id: Uuid,
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountRead {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the server answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since the server state was created
    pub uptime_secs: u64,
}
