//! Mock implementations for testing
//!
//! These doubles record every call so tests can assert exact interaction
//! counts, and can be armed to fail for failure-injection tests.

use crate::commerce::{
    Cart, CartContents, CartItem, CommerceApi, CommerceError, CommerceErrorKind, Customer,
    Product,
};
use crate::engine::DialogState;
use crate::runtime::Presenter;
use crate::store::{SessionStore, StoreError};
use async_trait::async_trait;
use std::sync::Mutex;

// ============================================================================
// Mock Commerce API
// ============================================================================

/// One recorded commerce interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommerceCall {
    ListProducts,
    GetProduct(String),
    GetProductImage(String),
    GetOrCreateCart(String),
    GetCartContents(String),
    AddCartItem {
        reference: String,
        product_id: String,
        quantity: u32,
    },
    RemoveCartItem {
        reference: String,
        item_id: String,
    },
    CreateCustomer {
        name: String,
        email: String,
    },
}

/// Commerce backend double with a small fixed catalog.
pub struct MockCommerceApi {
    products: Vec<Product>,
    cart_contents: CartContents,
    fail_with: Mutex<Option<CommerceErrorKind>>,
    calls: Mutex<Vec<CommerceCall>>,
}

impl MockCommerceApi {
    pub fn new() -> Self {
        Self {
            products: vec![
                Product {
                    id: "prod-1".to_string(),
                    name: "Smoked herring".to_string(),
                    description: "Cold-smoked, whole.".to_string(),
                    price: "$12.50".to_string(),
                },
                Product {
                    id: "prod-2".to_string(),
                    name: "Anchovy".to_string(),
                    description: "Salt-cured fillets.".to_string(),
                    price: "$3.00".to_string(),
                },
            ],
            cart_contents: CartContents {
                items: vec![CartItem {
                    id: "item-9".to_string(),
                    product_id: Some("prod-1".to_string()),
                    name: "Smoked herring".to_string(),
                    quantity: 5,
                    unit_price: "$12.50".to_string(),
                    line_total: "$62.50".to_string(),
                }],
                total: "$62.50".to_string(),
            },
            fail_with: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every subsequent call fail with the given kind.
    pub fn fail_with(&self, kind: CommerceErrorKind) {
        *self.fail_with.lock().unwrap() = Some(kind);
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<CommerceCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: CommerceCall) -> Result<(), CommerceError> {
        self.calls.lock().unwrap().push(call);
        match *self.fail_with.lock().unwrap() {
            Some(kind) => Err(CommerceError::new(kind, "mock failure")),
            None => Ok(()),
        }
    }
}

impl Default for MockCommerceApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommerceApi for MockCommerceApi {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        self.record(CommerceCall::ListProducts)?;
        Ok(self.products.clone())
    }

    async fn get_product(&self, product_id: &str) -> Result<Product, CommerceError> {
        self.record(CommerceCall::GetProduct(product_id.to_string()))?;
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| CommerceError::not_found(format!("no product {product_id}")))
    }

    async fn get_product_image(&self, product_id: &str) -> Result<String, CommerceError> {
        self.record(CommerceCall::GetProductImage(product_id.to_string()))?;
        Ok(format!("https://cdn.example.com/{product_id}.png"))
    }

    async fn get_or_create_cart(&self, reference: &str) -> Result<Cart, CommerceError> {
        self.record(CommerceCall::GetOrCreateCart(reference.to_string()))?;
        Ok(Cart {
            id: reference.to_string(),
        })
    }

    async fn get_cart_contents(&self, reference: &str) -> Result<CartContents, CommerceError> {
        self.record(CommerceCall::GetCartContents(reference.to_string()))?;
        Ok(self.cart_contents.clone())
    }

    async fn add_cart_item(
        &self,
        reference: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), CommerceError> {
        self.record(CommerceCall::AddCartItem {
            reference: reference.to_string(),
            product_id: product_id.to_string(),
            quantity,
        })
    }

    async fn remove_cart_item(&self, reference: &str, item_id: &str) -> Result<(), CommerceError> {
        self.record(CommerceCall::RemoveCartItem {
            reference: reference.to_string(),
            item_id: item_id.to_string(),
        })
    }

    async fn create_customer(&self, name: &str, email: &str) -> Result<Customer, CommerceError> {
        self.record(CommerceCall::CreateCustomer {
            name: name.to_string(),
            email: email.to_string(),
        })?;
        Ok(Customer {
            id: "cust-1".to_string(),
        })
    }
}

// ============================================================================
// Recording Presenter
// ============================================================================

/// One recorded render instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    Menu {
        session_id: String,
        product_count: usize,
    },
    Product {
        session_id: String,
        product_id: String,
        image_url: String,
    },
    Cart {
        session_id: String,
        item_count: usize,
    },
    PromptEmail {
        session_id: String,
    },
    Failure {
        session_id: String,
    },
}

/// Presenter double that records every render call.
#[derive(Default)]
pub struct RecordingPresenter {
    renders: Mutex<Vec<Render>>,
}

impl RecordingPresenter {
    pub fn renders(&self) -> Vec<Render> {
        self.renders.lock().unwrap().clone()
    }

    /// Renders addressed to one session, in order.
    pub fn renders_for(&self, session_id: &str) -> Vec<Render> {
        self.renders()
            .into_iter()
            .filter(|render| match render {
                Render::Menu { session_id: id, .. }
                | Render::Product { session_id: id, .. }
                | Render::Cart { session_id: id, .. }
                | Render::PromptEmail { session_id: id }
                | Render::Failure { session_id: id } => id == session_id,
            })
            .collect()
    }

    fn record(&self, render: Render) {
        self.renders.lock().unwrap().push(render);
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    async fn render_menu(&self, session_id: &str, products: &[Product]) {
        self.record(Render::Menu {
            session_id: session_id.to_string(),
            product_count: products.len(),
        });
    }

    async fn render_product(&self, session_id: &str, product: &Product, image_url: &str) {
        self.record(Render::Product {
            session_id: session_id.to_string(),
            product_id: product.id.clone(),
            image_url: image_url.to_string(),
        });
    }

    async fn render_cart(&self, session_id: &str, cart: &CartContents) {
        self.record(Render::Cart {
            session_id: session_id.to_string(),
            item_count: cart.items.len(),
        });
    }

    async fn render_prompt_email(&self, session_id: &str) {
        self.record(Render::PromptEmail {
            session_id: session_id.to_string(),
        });
    }

    async fn render_failure(&self, session_id: &str) {
        self.record(Render::Failure {
            session_id: session_id.to_string(),
        });
    }
}

// ============================================================================
// Failing Session Store
// ============================================================================

/// Store double whose every operation fails, for persistence-error paths.
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn load(&self, _session_id: &str) -> Result<Option<DialogState>, StoreError> {
        Err(StoreError::Backend("mock store down".to_string()))
    }

    async fn save(&self, _session_id: &str, _state: DialogState) -> Result<(), StoreError> {
        Err(StoreError::Backend("mock store down".to_string()))
    }
}
