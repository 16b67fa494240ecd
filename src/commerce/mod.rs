//! Commerce backend abstraction
//!
//! A narrow, typed surface over the storefront backend. Every operation is
//! synchronous from the caller's perspective and fails with a typed error on
//! any non-success response.

mod error;
mod http;
mod types;

pub use error::{CommerceError, CommerceErrorKind};
pub use http::HttpCommerceClient;
pub use types::{Cart, CartContents, CartItem, Customer, Product};

use async_trait::async_trait;
use std::sync::Arc;

/// Operations the dialog engine consumes. The cart reference is the session
/// id; one cart per session, created implicitly on first touch.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError>;

    async fn get_product(&self, product_id: &str) -> Result<Product, CommerceError>;

    /// Resolve the product's main image to a public URL.
    async fn get_product_image(&self, product_id: &str) -> Result<String, CommerceError>;

    async fn get_or_create_cart(&self, reference: &str) -> Result<Cart, CommerceError>;

    async fn get_cart_contents(&self, reference: &str) -> Result<CartContents, CommerceError>;

    async fn add_cart_item(
        &self,
        reference: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), CommerceError>;

    async fn remove_cart_item(&self, reference: &str, item_id: &str)
        -> Result<(), CommerceError>;

    async fn create_customer(&self, name: &str, email: &str) -> Result<Customer, CommerceError>;
}

#[async_trait]
impl<T: CommerceApi + ?Sized> CommerceApi for Arc<T> {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        (**self).list_products().await
    }

    async fn get_product(&self, product_id: &str) -> Result<Product, CommerceError> {
        (**self).get_product(product_id).await
    }

    async fn get_product_image(&self, product_id: &str) -> Result<String, CommerceError> {
        (**self).get_product_image(product_id).await
    }

    async fn get_or_create_cart(&self, reference: &str) -> Result<Cart, CommerceError> {
        (**self).get_or_create_cart(reference).await
    }

    async fn get_cart_contents(&self, reference: &str) -> Result<CartContents, CommerceError> {
        (**self).get_cart_contents(reference).await
    }

    async fn add_cart_item(
        &self,
        reference: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), CommerceError> {
        (**self).add_cart_item(reference, product_id, quantity).await
    }

    async fn remove_cart_item(
        &self,
        reference: &str,
        item_id: &str,
    ) -> Result<(), CommerceError> {
        (**self).remove_cart_item(reference, item_id).await
    }

    async fn create_customer(&self, name: &str, email: &str) -> Result<Customer, CommerceError> {
        (**self).create_customer(name, email).await
    }
}
