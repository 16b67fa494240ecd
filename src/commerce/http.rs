//! HTTP implementation of the commerce API
//!
//! Talks to a JSON:API-style storefront backend (`/v2/products`,
//! `/v2/carts/{ref}`, ...). Authentication is a bearer token supplied at
//! construction; acquiring and refreshing it is the caller's problem.

use super::{
    Cart, CartContents, CartItem, CommerceApi, CommerceError, Customer, Product,
};
use crate::config::ShopConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Commerce backend client over HTTP.
pub struct HttpCommerceClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl HttpCommerceClient {
    pub fn new(config: &ShopConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CommerceError> {
        let response = self
            .client
            .request(Method::GET, self.url(path))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(request_error)?;
        read_json(response).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, CommerceError> {
        let response = self
            .client
            .request(Method::POST, self.url(path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(request_error)?;
        read_json(response).await
    }
}

#[async_trait]
impl CommerceApi for HttpCommerceClient {
    async fn list_products(&self) -> Result<Vec<Product>, CommerceError> {
        let wire: DataEnvelope<Vec<ProductWire>> = self.get_json("/v2/products").await?;
        Ok(wire.data.into_iter().map(Product::from).collect())
    }

    async fn get_product(&self, product_id: &str) -> Result<Product, CommerceError> {
        let wire: DataEnvelope<ProductWire> =
            self.get_json(&format!("/v2/products/{product_id}")).await?;
        Ok(Product::from(wire.data))
    }

    async fn get_product_image(&self, product_id: &str) -> Result<String, CommerceError> {
        let wire: DataEnvelope<ProductWire> =
            self.get_json(&format!("/v2/products/{product_id}")).await?;
        let image_id = wire
            .data
            .main_image_id()
            .ok_or_else(|| {
                CommerceError::payload(format!("product {product_id} has no main image"))
            })?
            .to_string();

        let file: DataEnvelope<FileWire> = self.get_json(&format!("/v2/files/{image_id}")).await?;
        Ok(file.data.link.href)
    }

    async fn get_or_create_cart(&self, reference: &str) -> Result<Cart, CommerceError> {
        // The backend materializes a cart on first GET of its reference.
        let wire: DataEnvelope<CartWire> = self.get_json(&format!("/v2/carts/{reference}")).await?;
        Ok(Cart { id: wire.data.id })
    }

    async fn get_cart_contents(&self, reference: &str) -> Result<CartContents, CommerceError> {
        let wire: CartItemsWire = self
            .get_json(&format!("/v2/carts/{reference}/items"))
            .await?;
        Ok(CartContents::from(wire))
    }

    async fn add_cart_item(
        &self,
        reference: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<(), CommerceError> {
        let body = json!({
            "data": {
                "id": product_id,
                "type": "cart_item",
                "quantity": quantity,
            },
        });
        let response = self
            .client
            .request(Method::POST, self.url(&format!("/v2/carts/{reference}/items")))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        expect_success(response).await
    }

    async fn remove_cart_item(&self, reference: &str, item_id: &str) -> Result<(), CommerceError> {
        let response = self
            .client
            .request(
                Method::DELETE,
                self.url(&format!("/v2/carts/{reference}/items/{item_id}")),
            )
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(request_error)?;
        expect_success(response).await
    }

    async fn create_customer(&self, name: &str, email: &str) -> Result<Customer, CommerceError> {
        let body = json!({
            "data": {
                "type": "customer",
                "name": name,
                "email": email,
            },
        });
        let wire: DataEnvelope<CustomerWire> = self.post_json("/v2/customers", &body).await?;
        Ok(Customer { id: wire.data.id })
    }
}

fn request_error(err: reqwest::Error) -> CommerceError {
    if err.is_timeout() || err.is_connect() {
        CommerceError::network(err.to_string())
    } else {
        CommerceError::unknown(err.to_string())
    }
}

/// Map a non-success status to an error kind. Classification is for
/// diagnostics only; callers abort, they do not retry.
fn classify_status(status: StatusCode, body: &str) -> CommerceError {
    match status.as_u16() {
        401 | 403 => CommerceError::auth(format!("authentication rejected: {body}")),
        404 => CommerceError::not_found(format!("resource not found: {body}")),
        429 => CommerceError::rate_limit(format!("rate limited: {body}")),
        400 => CommerceError::invalid_request(format!("invalid request: {body}")),
        500..=599 => CommerceError::server(format!("backend error: {body}")),
        _ => CommerceError::unknown(format!("HTTP {status}: {body}")),
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CommerceError> {
    let status = response.status();
    let body = response.text().await.map_err(request_error)?;
    if !status.is_success() {
        return Err(classify_status(status, &body));
    }
    serde_json::from_str(&body)
        .map_err(|e| CommerceError::payload(format!("malformed response body: {e}")))
}

async fn expect_success(response: reqwest::Response) -> Result<(), CommerceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, &body))
}

// ============================================================================
// Wire types - the backend's JSON:API shapes, normalized into domain types
// ============================================================================

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ProductWire {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    meta: ProductMetaWire,
    #[serde(default)]
    relationships: Option<RelationshipsWire>,
}

impl ProductWire {
    fn main_image_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()?
            .main_image
            .as_ref()
            .map(|rel| rel.data.id.as_str())
    }
}

impl From<ProductWire> for Product {
    fn from(wire: ProductWire) -> Self {
        Product {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            price: wire.meta.display_price.with_tax.formatted,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductMetaWire {
    display_price: DisplayPriceWire,
}

#[derive(Debug, Deserialize)]
struct DisplayPriceWire {
    with_tax: PriceWire,
}

#[derive(Debug, Deserialize)]
struct PriceWire {
    formatted: String,
}

#[derive(Debug, Deserialize)]
struct RelationshipsWire {
    #[serde(default)]
    main_image: Option<RelationshipWire>,
}

#[derive(Debug, Deserialize)]
struct RelationshipWire {
    data: RelationshipIdWire,
}

#[derive(Debug, Deserialize)]
struct RelationshipIdWire {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileWire {
    link: FileLinkWire,
}

#[derive(Debug, Deserialize)]
struct FileLinkWire {
    href: String,
}

#[derive(Debug, Deserialize)]
struct CartWire {
    id: String,
}

#[derive(Debug, Deserialize)]
struct CartItemsWire {
    data: Vec<CartItemWire>,
    meta: CartItemsMetaWire,
}

impl From<CartItemsWire> for CartContents {
    fn from(wire: CartItemsWire) -> Self {
        CartContents {
            items: wire.data.into_iter().map(CartItem::from).collect(),
            total: wire.meta.display_price.with_tax.formatted,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CartItemWire {
    id: String,
    #[serde(default)]
    product_id: Option<String>,
    name: String,
    quantity: u32,
    meta: CartItemMetaWire,
}

impl From<CartItemWire> for CartItem {
    fn from(wire: CartItemWire) -> Self {
        CartItem {
            id: wire.id,
            product_id: wire.product_id,
            name: wire.name,
            quantity: wire.quantity,
            unit_price: wire.meta.display_price.with_tax.unit.formatted,
            line_total: wire.meta.display_price.with_tax.value.formatted,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CartItemMetaWire {
    display_price: CartItemDisplayPriceWire,
}

#[derive(Debug, Deserialize)]
struct CartItemDisplayPriceWire {
    with_tax: CartItemPriceWire,
}

#[derive(Debug, Deserialize)]
struct CartItemPriceWire {
    unit: PriceWire,
    value: PriceWire,
}

#[derive(Debug, Deserialize)]
struct CartItemsMetaWire {
    display_price: DisplayPriceWire,
}

#[derive(Debug, Deserialize)]
struct CustomerWire {
    id: String,
}
