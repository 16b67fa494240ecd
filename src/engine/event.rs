//! Events that drive dialog transitions
//!
//! Raw transport payloads are parsed into tagged variants here, at the
//! boundary; the state machine itself never splits strings.

/// Free-text command that resets a session to the catalog.
pub const RESTART_COMMAND: &str = "/start";

/// One inbound unit of user interaction, as produced by the transport
/// adapter: an opaque session id plus an untyped payload.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub session_id: String,
    pub kind: EventKind,
    pub payload: String,
    /// User-visible name, when the transport knows it.
    pub display_name: Option<String>,
}

impl InboundEvent {
    pub fn command(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            kind: EventKind::Command,
            payload: text.into(),
            display_name: None,
        }
    }

    pub fn selection(session_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            kind: EventKind::Selection,
            payload: token.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Which transport surface the payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Typed free text (commands, email input).
    Command,
    /// A callback token chosen from a previously rendered option set.
    Selection,
}

/// A parsed event, ready for the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    Selection(Selection),
}

impl Event {
    /// Parse a raw payload into a typed event. Never fails: unrecognized
    /// text stays free text, unrecognized tokens stay opaque ids.
    pub fn from_payload(kind: EventKind, payload: &str) -> Self {
        match kind {
            EventKind::Command => {
                if payload.trim() == RESTART_COMMAND {
                    Event::Command(Command::Restart)
                } else {
                    Event::Command(Command::Text(payload.to_string()))
                }
            }
            EventKind::Selection => Event::Selection(Selection::parse(payload)),
        }
    }

    pub fn is_restart(&self) -> bool {
        matches!(self, Event::Command(Command::Restart))
    }
}

/// Typed free-text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The explicit restart command.
    Restart,
    /// Any other text; only meaningful while awaiting an email.
    Text(String),
}

/// A callback token chosen from rendered options, with structured fields
/// validated at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Open the cart view.
    Cart,
    /// Return to the catalog.
    Back,
    /// Begin checkout.
    Checkout,
    /// An opaque id: a product in the menu view, a cart item in the cart view.
    Item(String),
    /// Add a product at one of the preset quantities.
    AddItem {
        product_id: String,
        quantity: Quantity,
    },
}

impl Selection {
    /// Parse a callback token. `"{product_id},{qty}"` with a preset quantity
    /// becomes `AddItem`; anything else unrecognized degrades to `Item`.
    pub fn parse(token: &str) -> Self {
        match token {
            "cart" => Selection::Cart,
            "back" => Selection::Back,
            "checkout" => Selection::Checkout,
            _ => {
                if let Some((product_id, qty)) = token.split_once(',') {
                    let product_id = product_id.trim();
                    if let Some(quantity) = Quantity::parse(qty.trim()) {
                        if !product_id.is_empty() {
                            return Selection::AddItem {
                                product_id: product_id.to_string(),
                                quantity,
                            };
                        }
                    }
                }
                Selection::Item(token.to_string())
            }
        }
    }
}

/// Order quantity, restricted to the preset steps offered in the product
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(u32);

impl Quantity {
    /// Quantity buttons rendered with a product.
    pub const PRESETS: [u32; 3] = [1, 5, 10];

    /// Parse a quantity token; rejects anything outside the presets.
    pub fn parse(token: &str) -> Option<Self> {
        token
            .parse::<u32>()
            .ok()
            .filter(|q| Self::PRESETS.contains(q))
            .map(Self)
    }

    pub fn units(self) -> u32 {
        self.0
    }
}

/// Loose plausibility check for checkout input: one `@`, a dotted domain,
/// no whitespace. Deliverability is the backend's problem.
pub(crate) fn is_plausible_email(text: &str) -> bool {
    let text = text.trim();
    if text.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
