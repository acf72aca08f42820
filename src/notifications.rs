//! Notifications
//!
//! Transient user-facing messages. Text is in the storefront's language.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::stock::StockShortfall;

/// Generic failure shown for any network or server error.
pub const DATABASE_ERROR: &str = "Erro de banco de dados.";

/// Shown after a cart row is deleted.
pub const ITEM_REMOVED: &str = "Item removido";

/// Shown after a typed quantity is applied.
pub const QUANTITY_UPDATED: &str = "Quantidade atualizada";

/// Shown after adding from the product page.
pub const ADDED_TO_CART: &str = "Adicionado ao carrinho";

/// Shown when adding from the product page without a session.
pub const LOGIN_TO_ADD: &str = "Faça login para adicionar ao carrinho";

/// Shown when the cart cannot be read without a session.
pub const LOGIN_TO_VIEW: &str = "Faça login para ver seu carrinho.";

/// Placeholder text for a cart that failed to load.
pub const CART_UNAVAILABLE: &str = "Não foi possível carregar seu carrinho.";

/// Placeholder text for an empty cart.
pub const EMPTY_CART: &str = "Seu carrinho está vazio.";

/// Notification severity, mapped to the toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Neutral information
    Info,

    /// A completed action
    Success,

    /// A refused action with no state change
    Warning,

    /// A failed action
    Error,
}

impl Level {
    /// CSS class suffix used by the storefront's toast.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A transient user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: Level,

    /// Message text
    pub message: String,
}

impl Notification {
    /// Success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    /// Warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// The generic "database error" notification.
    pub fn database_error() -> Self {
        Self::error(DATABASE_ERROR)
    }

    /// Warning for a quantity refused by the stock guard.
    pub fn insufficient_stock(shortfall: &StockShortfall) -> Self {
        let message = match shortfall.available {
            0 => "Produto sem estoque.".to_string(),
            1 => "Estoque insuficiente: apenas 1 unidade disponível.".to_string(),
            n => format!("Estoque insuficiente: apenas {n} unidades disponíveis."),
        };

        Self::warning(message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}] {}", self.level.as_str(), self.message)
    }
}
