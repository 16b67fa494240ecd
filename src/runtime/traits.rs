//! Trait abstraction for the presentation side
//!
//! The transport adapter implements this to render views back to the user.
//! Calls are one-way instructions: nothing flows back into the state
//! machine, and implementations are expected to log their own delivery
//! failures.

use crate::commerce::{CartContents, Product};
use async_trait::async_trait;
use std::sync::Arc;

/// Renders conversation views for one session.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Show the catalog with one selectable entry per product.
    async fn render_menu(&self, session_id: &str, products: &[Product]);

    /// Show a single product with its image and the quantity/cart/back
    /// option set.
    async fn render_product(&self, session_id: &str, product: &Product, image_url: &str);

    /// Show cart lines and the cart total with remove/back/checkout options.
    async fn render_cart(&self, session_id: &str, cart: &CartContents);

    /// Ask the user for an email address to complete checkout.
    async fn render_prompt_email(&self, session_id: &str);

    /// Generic notice that the last action could not be completed.
    async fn render_failure(&self, session_id: &str);
}

#[async_trait]
impl<T: Presenter + ?Sized> Presenter for Arc<T> {
    async fn render_menu(&self, session_id: &str, products: &[Product]) {
        (**self).render_menu(session_id, products).await;
    }

    async fn render_product(&self, session_id: &str, product: &Product, image_url: &str) {
        (**self).render_product(session_id, product, image_url).await;
    }

    async fn render_cart(&self, session_id: &str, cart: &CartContents) {
        (**self).render_cart(session_id, cart).await;
    }

    async fn render_prompt_email(&self, session_id: &str) {
        (**self).render_prompt_email(session_id).await;
    }

    async fn render_failure(&self, session_id: &str) {
        (**self).render_failure(session_id).await;
    }
}
