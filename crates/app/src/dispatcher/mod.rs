//! Cart mutation dispatcher

use petgo::{stock::StockShortfall, view::CartPage};

mod in_flight;
mod service;

pub use in_flight::{InFlight, InFlightGuard};
pub use service::CartDispatcher;

static LOGIN_PAGE: CartPage = CartPage::LoginRequired;

/// Outcome of a dispatched cart operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The server applied the change; holds the page re-fetched afterwards.
    Applied(CartPage),

    /// The server applied the change but the re-fetch failed. The surface
    /// still shows the previous render.
    Unsynced,

    /// The same operation is already in flight; nothing was sent.
    Busy,

    /// Refused by the stock guard; nothing was sent.
    Rejected(StockShortfall),

    /// The targeted line is not in the last rendered view; nothing was sent.
    NotInCart,

    /// The server answered 401.
    LoginRequired,

    /// The request failed. Holds the resynced page, or `None` if the resync
    /// failed too and the surface kept the previous render.
    Failed(Option<CartPage>),
}

impl Dispatch {
    /// The page rendered as a result of this operation, if any.
    pub fn page(&self) -> Option<&CartPage> {
        match self {
            Self::Applied(page) | Self::Failed(Some(page)) => Some(page),
            Self::LoginRequired => Some(&LOGIN_PAGE),
            Self::Unsynced
            | Self::Busy
            | Self::Rejected(_)
            | Self::NotInCart
            | Self::Failed(None) => None,
        }
    }

    /// Whether a request reached the server and succeeded.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_) | Self::Unsynced)
    }
}
