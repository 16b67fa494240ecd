//! Dialog state types

/// Point in the conversation flow, persisted between events.
///
/// Absence of a stored value is equivalent to `Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    /// No active menu shown; the next event is treated as "show catalog".
    #[default]
    Start,

    /// Catalog is displayed; next event selects a product or opens the cart.
    Menu,

    /// A single product's detail view is displayed.
    Description,

    /// Cart contents are displayed.
    Cart,

    /// Checkout in progress; next event is free text read as an email address.
    AwaitingEmail,
}

impl DialogState {
    /// Every state, in flow order. Used by restart tests and generators.
    pub const ALL: [DialogState; 5] = [
        DialogState::Start,
        DialogState::Menu,
        DialogState::Description,
        DialogState::Cart,
        DialogState::AwaitingEmail,
    ];

    /// Canonical string form, used as the persisted representation.
    pub fn as_str(self) -> &'static str {
        match self {
            DialogState::Start => "start",
            DialogState::Menu => "menu",
            DialogState::Description => "description",
            DialogState::Cart => "cart",
            DialogState::AwaitingEmail => "awaiting_email",
        }
    }

    /// Parse the canonical string form. Returns `None` for anything else, so
    /// a corrupted stored value surfaces instead of being coerced.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "start" => Some(DialogState::Start),
            "menu" => Some(DialogState::Menu),
            "description" => Some(DialogState::Description),
            "cart" => Some(DialogState::Cart),
            "awaiting_email" => Some(DialogState::AwaitingEmail),
            _ => None,
        }
    }
}

/// Per-session identity carried alongside each event.
///
/// The session id doubles as the cart reference on the commerce backend;
/// the display name feeds customer creation at checkout.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub display_name: Option<String>,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Name used for the customer record; falls back to the session id.
    pub fn customer_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.session_id)
    }
}
