//! Conversational storefront core
//!
//! A per-session dialog state machine for a chat storefront: browse a
//! catalog, inspect a product, manage a cart, check out with an email
//! address. The transport (receiving updates, drawing keyboards) and the
//! rendering of views are external collaborators behind narrow traits;
//! this crate owns event interpretation, state transitions, and session
//! state persistence.
//!
//! Entry point: build a [`SessionRouter`] with a commerce client, a session
//! store, and a presenter, then feed it [`InboundEvent`]s. Events for one
//! session are processed strictly in order; sessions are independent.

pub mod commerce;
pub mod config;
pub mod engine;
pub mod runtime;
pub mod store;

pub use commerce::{
    Cart, CartContents, CartItem, CommerceApi, CommerceError, CommerceErrorKind, Customer,
    HttpCommerceClient, Product,
};
pub use config::ShopConfig;
pub use engine::{
    Command, DialogEngine, DialogState, Event, EventKind, InboundEvent, Quantity, Selection,
    SessionContext, RESTART_COMMAND,
};
pub use runtime::{DispatchError, EventError, Presenter, SessionEvent, SessionRouter};
pub use store::{MemorySessionStore, SessionStore, SqliteSessionStore, StoreError};
