//! Core dialog state machine
//!
//! Interprets one inbound event against the session's current state,
//! invokes the commerce backend and presentation adapter as the transition
//! demands, and returns the single next state. A failed commerce call
//! aborts the transition; the caller keeps the prior state.

pub mod event;
mod state;

#[cfg(test)]
mod proptests;

pub use event::{
    Command, Event, EventKind, InboundEvent, Quantity, Selection, RESTART_COMMAND,
};
pub use state::{DialogState, SessionContext};

use crate::commerce::{CommerceApi, CommerceError};
use crate::runtime::Presenter;
use event::is_plausible_email;
use std::sync::Arc;

/// The per-session state machine. Holds its collaborators explicitly; no
/// ambient singletons.
pub struct DialogEngine<C, P> {
    commerce: Arc<C>,
    presenter: Arc<P>,
}

impl<C, P> DialogEngine<C, P>
where
    C: CommerceApi,
    P: Presenter,
{
    pub fn new(commerce: Arc<C>, presenter: Arc<P>) -> Self {
        Self {
            commerce,
            presenter,
        }
    }

    /// Run one transition: current state + event -> next state.
    ///
    /// Deterministic for a given (state, event, backend data) triple; no
    /// hidden counters. `Err` means the transition aborted mid-way and the
    /// caller must keep the prior persisted state.
    pub async fn transition(
        &self,
        ctx: &SessionContext,
        state: DialogState,
        event: &Event,
    ) -> Result<DialogState, CommerceError> {
        match (state, event) {
            // Restart wins from any state: touch the session's cart so it
            // exists, then back to the catalog.
            (_, Event::Command(Command::Restart)) => {
                self.commerce.get_or_create_cart(&ctx.session_id).await?;
                self.show_menu(ctx).await?;
                Ok(DialogState::Menu)
            }

            // Nothing else is valid before the first menu was shown.
            (DialogState::Start, _) => {
                self.show_menu(ctx).await?;
                Ok(DialogState::Menu)
            }

            (DialogState::Menu, Event::Selection(Selection::Cart))
            | (DialogState::Description, Event::Selection(Selection::Cart)) => {
                self.show_cart(ctx).await?;
                Ok(DialogState::Cart)
            }

            (DialogState::Menu, Event::Selection(Selection::Item(product_id))) => {
                let product = self.commerce.get_product(product_id).await?;
                let image_url = self.commerce.get_product_image(product_id).await?;
                self.presenter
                    .render_product(&ctx.session_id, &product, &image_url)
                    .await;
                Ok(DialogState::Description)
            }

            (DialogState::Description, Event::Selection(Selection::Back))
            | (DialogState::Cart, Event::Selection(Selection::Back)) => {
                self.show_menu(ctx).await?;
                Ok(DialogState::Menu)
            }

            // Stay on the detail view so quantities can be added repeatedly.
            (
                DialogState::Description,
                Event::Selection(Selection::AddItem {
                    product_id,
                    quantity,
                }),
            ) => {
                self.commerce
                    .add_cart_item(&ctx.session_id, product_id, quantity.units())
                    .await?;
                Ok(DialogState::Description)
            }

            (DialogState::Cart, Event::Selection(Selection::Checkout)) => {
                self.presenter.render_prompt_email(&ctx.session_id).await;
                Ok(DialogState::AwaitingEmail)
            }

            // In the cart view a bare id is a cart item to remove.
            (DialogState::Cart, Event::Selection(Selection::Item(item_id))) => {
                self.commerce
                    .remove_cart_item(&ctx.session_id, item_id)
                    .await?;
                self.show_cart(ctx).await?;
                Ok(DialogState::Cart)
            }

            (DialogState::AwaitingEmail, Event::Command(Command::Text(text)))
                if is_plausible_email(text) =>
            {
                self.commerce
                    .create_customer(ctx.customer_name(), text.trim())
                    .await?;
                self.show_menu(ctx).await?;
                Ok(DialogState::Menu)
            }

            // Protocol mismatch: stay put, re-render, report. Never guess.
            (state, event) => {
                tracing::warn!(
                    session_id = %ctx.session_id,
                    state = state.as_str(),
                    ?event,
                    "event does not match dialog state"
                );
                self.rerender(ctx, state).await?;
                Ok(state)
            }
        }
    }

    async fn show_menu(&self, ctx: &SessionContext) -> Result<(), CommerceError> {
        let products = self.commerce.list_products().await?;
        self.presenter.render_menu(&ctx.session_id, &products).await;
        Ok(())
    }

    async fn show_cart(&self, ctx: &SessionContext) -> Result<(), CommerceError> {
        let cart = self.commerce.get_cart_contents(&ctx.session_id).await?;
        self.presenter.render_cart(&ctx.session_id, &cart).await;
        Ok(())
    }

    /// View shown again after a mismatched event. The product detail view
    /// is not reconstructable from the bare state value, so the menu stands
    /// in for it; the cart button and the restart command both stay live.
    async fn rerender(&self, ctx: &SessionContext, state: DialogState) -> Result<(), CommerceError> {
        match state {
            DialogState::Start | DialogState::Menu | DialogState::Description => {
                self.show_menu(ctx).await
            }
            DialogState::Cart => self.show_cart(ctx).await,
            DialogState::AwaitingEmail => {
                self.presenter.render_prompt_email(&ctx.session_id).await;
                Ok(())
            }
        }
    }
}
