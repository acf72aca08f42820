//! Cart dispatcher service.

use std::{fmt, sync::Arc};

use futures_util::future::join_all;
use petgo::{
    cart::Cart,
    items::CartItemId,
    mutations::{CartMutation, OperationKey, OperationKind},
    notifications::{
        ADDED_TO_CART, ITEM_REMOVED, LOGIN_TO_ADD, LOGIN_TO_VIEW, Notification, QUANTITY_UPDATED,
    },
    products::{ProductId, ProductSnapshot},
    stock::{self, StockShortfall},
    view::{CartPage, CartView},
};
use rustc_hash::FxHashMap;
use tracing::{debug, error, info, warn};

use crate::{
    api::{ApiError, CartApi},
    dispatcher::{Dispatch, InFlight},
    notifier::Notifier,
    surface::CartSurface,
};

/// Turns cart intents into API requests and re-renders from server truth.
///
/// Operations take the last rendered view and return the next page; the
/// dispatcher keeps no cart state of its own. The only shared state is the
/// set of in-flight operation keys.
pub struct CartDispatcher {
    api: Arc<dyn CartApi>,
    notifier: Arc<dyn Notifier>,
    surface: Arc<dyn CartSurface>,
    in_flight: InFlight,
}

/// What a guarded operation reports besides its request.
struct Intent {
    key: OperationKey,
    success: Option<&'static str>,
    login_prompt: &'static str,
}

impl CartDispatcher {
    /// Create a dispatcher over the given collaborators.
    pub fn new(
        api: Arc<dyn CartApi>,
        notifier: Arc<dyn Notifier>,
        surface: Arc<dyn CartSurface>,
    ) -> Self {
        Self {
            api,
            notifier,
            surface,
            in_flight: InFlight::default(),
        }
    }

    /// Keys with a request currently in flight.
    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Fetch the cart and render it.
    ///
    /// A 401 renders the login placeholder. Any other failure renders the
    /// unavailable placeholder and shows an error notification.
    #[tracing::instrument(name = "dispatcher.refresh", skip(self))]
    pub async fn refresh(&self) -> CartPage {
        let page = match self.load_page().await {
            Ok(page) => page,
            Err(error) => {
                error!(%error, "failed to load cart");

                self.notifier.notify(&Notification::database_error());

                CartPage::Unavailable
            }
        };

        self.render(&page);

        page
    }

    /// `INCLUIR` one unit of a product, unless the last-known stock is
    /// already in the cart.
    #[tracing::instrument(
        name = "dispatcher.increment",
        skip(self, view, product),
        fields(product_id = %product)
    )]
    pub async fn increment(&self, view: &CartView, product: ProductId) -> Dispatch {
        let line = view.line_for_product(product);
        let current = line.map_or(0, |line| line.quantity);
        let check = stock::check(
            product,
            current.saturating_add(1),
            line.and_then(|line| line.stock),
        );

        let intent = Intent {
            key: OperationKey::product(OperationKind::Increment, product),
            success: None,
            login_prompt: LOGIN_TO_VIEW,
        };

        self.run(intent, check, || {
            self.api.submit_item(CartMutation::increment(product))
        })
        .await
    }

    /// Take one unit off a product. A line holding a single unit is deleted.
    #[tracing::instrument(
        name = "dispatcher.decrement",
        skip(self, view, product),
        fields(product_id = %product)
    )]
    pub async fn decrement(&self, view: &CartView, product: ProductId) -> Dispatch {
        let Some(line) = view.line_for_product(product) else {
            debug!("product is not in the cart");

            return Dispatch::NotInCart;
        };

        let item = line.item_id;
        let last_unit = line.quantity <= 1;

        let intent = Intent {
            key: OperationKey::product(OperationKind::Decrement, product),
            success: None,
            login_prompt: LOGIN_TO_VIEW,
        };

        self.run(intent, Ok(()), || async move {
            if last_unit {
                self.api.delete_item(item).await
            } else {
                self.api
                    .submit_item(CartMutation::decrement(product))
                    .await
            }
        })
        .await
    }

    /// `SETAR` a typed quantity. Quantities below 1 are raised to 1.
    #[tracing::instrument(
        name = "dispatcher.set_quantity",
        skip(self, view, product),
        fields(product_id = %product)
    )]
    pub async fn set_quantity(
        &self,
        view: &CartView,
        product: ProductId,
        quantity: u32,
    ) -> Dispatch {
        let mutation = CartMutation::set(product, quantity);
        let check = stock::check(
            product,
            mutation.quantity,
            view.line_for_product(product).and_then(|line| line.stock),
        );

        let intent = Intent {
            key: OperationKey::product(OperationKind::Set, product),
            success: Some(QUANTITY_UPDATED),
            login_prompt: LOGIN_TO_VIEW,
        };

        self.run(intent, check, || self.api.submit_item(mutation))
            .await
    }

    /// Delete a cart row.
    #[tracing::instrument(
        name = "dispatcher.remove_item",
        skip(self, item),
        fields(cart_item_id = %item)
    )]
    pub async fn remove_item(&self, item: CartItemId) -> Dispatch {
        let intent = Intent {
            key: OperationKey::remove(item),
            success: Some(ITEM_REMOVED),
            login_prompt: LOGIN_TO_VIEW,
        };

        self.run(intent, Ok(()), || self.api.delete_item(item))
            .await
    }

    /// "Add to cart" from the product page: `INCLUIR` `quantity` units,
    /// raised to at least 1.
    ///
    /// The product's stock is checked against the units already in the cart
    /// plus the requested ones. A product that is inactive or out of stock is
    /// refused as having nothing available.
    #[tracing::instrument(
        name = "dispatcher.add_to_cart",
        skip(self, view, product),
        fields(product_id = %product.id)
    )]
    pub async fn add_to_cart(
        &self,
        view: &CartView,
        product: &ProductSnapshot,
        quantity: u32,
    ) -> Dispatch {
        let mutation = CartMutation::include(product.id, quantity);
        let in_cart = view
            .line_for_product(product.id)
            .map_or(0, |line| line.quantity);
        let requested = in_cart.saturating_add(mutation.quantity);
        let check = if product.is_available() {
            stock::check(product.id, requested, Some(product.stock))
        } else {
            Err(StockShortfall {
                product_id: product.id,
                requested,
                available: 0,
            })
        };

        let intent = Intent {
            key: OperationKey::product(OperationKind::Add, product.id),
            success: Some(ADDED_TO_CART),
            login_prompt: LOGIN_TO_ADD,
        };

        self.run(intent, check, || self.api.submit_item(mutation))
            .await
    }

    async fn run<F, Fut>(
        &self,
        intent: Intent,
        check: Result<(), StockShortfall>,
        request: F,
    ) -> Dispatch
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        let Some(guard) = self.in_flight.try_acquire(intent.key) else {
            debug!(key = %intent.key, "operation already in flight");

            return Dispatch::Busy;
        };

        if let Err(shortfall) = check {
            warn!(
                key = %intent.key,
                requested = shortfall.requested,
                available = shortfall.available,
                "quantity exceeds known stock"
            );

            self.notifier
                .notify(&Notification::insufficient_stock(&shortfall));

            return Dispatch::Rejected(shortfall);
        }

        let outcome = match request().await {
            Ok(()) => {
                info!(key = %guard.key(), "cart mutation applied");

                if let Some(message) = intent.success {
                    self.notifier.notify(&Notification::success(message));
                }

                match self.load_page().await {
                    Ok(page) => Dispatch::Applied(page),
                    Err(error) => {
                        error!(%error, "failed to re-fetch cart after mutation");

                        self.notifier.notify(&Notification::database_error());

                        Dispatch::Unsynced
                    }
                }
            }
            Err(ApiError::Unauthorized) => {
                info!(key = %guard.key(), "cart mutation needs a session");

                self.notifier
                    .notify(&Notification::error(intent.login_prompt));

                Dispatch::LoginRequired
            }
            Err(error) => {
                error!(key = %guard.key(), %error, "cart mutation failed");

                self.notifier.notify(&Notification::database_error());

                Dispatch::Failed(self.resync().await)
            }
        };

        drop(guard);

        self.publish(&outcome);

        outcome
    }

    async fn resync(&self) -> Option<CartPage> {
        match self.load_page().await {
            Ok(page) => Some(page),
            Err(error) => {
                error!(%error, "resync failed, keeping last render");

                None
            }
        }
    }

    fn publish(&self, outcome: &Dispatch) {
        if let Dispatch::Applied(page) = outcome
            && let Some(view) = page.view()
        {
            self.surface.cart_updated(view.item_count());
        }

        if let Some(page) = outcome.page() {
            self.render(page);
        }
    }

    fn render(&self, page: &CartPage) {
        if let Err(error) = self.surface.render(page, &self.in_flight.snapshot()) {
            error!(%error, "failed to render cart page");
        }
    }

    async fn load_page(&self) -> Result<CartPage, ApiError> {
        match self.load_view().await {
            Ok(view) => Ok(CartPage::Loaded(view)),
            Err(ApiError::Unauthorized) => Ok(CartPage::LoginRequired),
            Err(error) => Err(error),
        }
    }

    async fn load_view(&self) -> Result<CartView, ApiError> {
        let cart = self.api.get_cart().await?;
        let snapshots = self.fetch_snapshots(&cart).await;

        Ok(CartView::build(&cart, &snapshots)?)
    }

    async fn fetch_snapshots(&self, cart: &Cart) -> FxHashMap<ProductId, ProductSnapshot> {
        let fetches = cart.product_ids().into_iter().map(|id| async move {
            (id, self.api.get_product(id).await)
        });

        let mut snapshots = FxHashMap::default();

        for (id, result) in join_all(fetches).await {
            match result {
                Ok(snapshot) => {
                    snapshots.insert(id, snapshot);
                }
                Err(error) => {
                    warn!(product = %id, %error, "product snapshot unavailable");
                }
            }
        }

        snapshots
    }
}

impl fmt::Debug for CartDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartDispatcher")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use mockall::{Sequence, predicate::eq};
    use petgo::{
        notifications::{DATABASE_ERROR, Level},
        pricing::brl,
    };
    use testresult::TestResult;

    use crate::{
        api::MockCartApi,
        notifier::MockNotifier,
        surface::MockCartSurface,
        test::{GatedCartApi, cart_with, snapshot},
    };

    use super::*;

    const PRODUCT: ProductId = ProductId::new(7);
    const ITEM: CartItemId = CartItemId::new(11);

    fn dispatcher(
        api: MockCartApi,
        notifier: MockNotifier,
        surface: MockCartSurface,
    ) -> CartDispatcher {
        CartDispatcher::new(Arc::new(api), Arc::new(notifier), Arc::new(surface))
    }

    /// View with product 7 at R$10,00 and the given quantity and stock.
    fn view(quantity: u32, stock: u32) -> TestResult<CartView> {
        let mut snapshots = FxHashMap::default();
        snapshots.insert(PRODUCT, snapshot(PRODUCT, stock));

        Ok(CartView::build(
            &cart_with(&[(ITEM, PRODUCT, quantity, 1000)]),
            &snapshots,
        )?)
    }

    fn silent_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();

        notifier.expect_notify().never();

        notifier
    }

    fn expect_notification(level: Level, message: &'static str) -> MockNotifier {
        let mut notifier = MockNotifier::new();

        notifier
            .expect_notify()
            .once()
            .withf(move |notification| {
                notification.level == level && notification.message == message
            })
            .return_const(());

        notifier
    }

    fn rendering_surface(badge: Option<u32>) -> MockCartSurface {
        let mut surface = MockCartSurface::new();

        surface.expect_render().once().returning(|_, _| Ok(()));

        match badge {
            Some(count) => {
                surface
                    .expect_cart_updated()
                    .once()
                    .with(eq(count))
                    .return_const(());
            }
            None => {
                surface.expect_cart_updated().never();
            }
        }

        surface
    }

    fn silent_surface() -> MockCartSurface {
        let mut surface = MockCartSurface::new();

        surface.expect_render().never();
        surface.expect_cart_updated().never();

        surface
    }

    #[tokio::test]
    async fn increment_beyond_stock_sends_nothing() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item().never();
        api.expect_delete_item().never();
        api.expect_get_cart().never();
        api.expect_get_product().never();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .once()
            .withf(|notification| notification.level == Level::Warning)
            .return_const(());

        let dispatcher = dispatcher(api, notifier, silent_surface());

        let outcome = dispatcher.increment(&view(2, 2)?, PRODUCT).await;

        assert_eq!(
            outcome,
            Dispatch::Rejected(StockShortfall {
                product_id: PRODUCT,
                requested: 3,
                available: 2,
            })
        );
        assert!(!dispatcher.in_flight().contains(OperationKey::product(
            OperationKind::Increment,
            PRODUCT
        )));

        Ok(())
    }

    #[tokio::test]
    async fn increment_within_stock_includes_one_unit() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item()
            .once()
            .with(eq(CartMutation::increment(PRODUCT)))
            .returning(|_| Ok(()));
        api.expect_get_cart()
            .once()
            .returning(|| Ok(cart_with(&[(ITEM, PRODUCT, 3, 1000)])));
        api.expect_get_product()
            .once()
            .returning(|id| Ok(snapshot(id, 5)));
        api.expect_delete_item().never();

        let dispatcher = dispatcher(api, silent_notifier(), rendering_surface(Some(3)));

        let outcome = dispatcher.increment(&view(2, 5)?, PRODUCT).await;

        let page = outcome.page().ok_or("missing page")?;
        let line = page
            .view()
            .and_then(|view| view.line_for_product(PRODUCT))
            .ok_or("missing line")?;

        assert!(outcome.is_applied());
        assert_eq!(line.quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn decrement_removes_one_unit_and_refetches() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item()
            .once()
            .withf(|mutation| *mutation == CartMutation::decrement(PRODUCT))
            .returning(|_| Ok(()));
        api.expect_get_cart()
            .once()
            .returning(|| Ok(cart_with(&[(ITEM, PRODUCT, 1, 1000)])));
        api.expect_get_product()
            .once()
            .with(eq(PRODUCT))
            .returning(|id| Ok(snapshot(id, 2)));
        api.expect_delete_item().never();

        let dispatcher = dispatcher(api, silent_notifier(), rendering_surface(Some(1)));

        let outcome = dispatcher.decrement(&view(2, 2)?, PRODUCT).await;

        let view = outcome
            .page()
            .and_then(CartPage::view)
            .ok_or("missing view")?;
        let line = view.line_for_product(PRODUCT).ok_or("missing line")?;

        assert_eq!(line.quantity, 1);
        assert_eq!(view.subtotal(), brl(1000));

        Ok(())
    }

    #[tokio::test]
    async fn decrement_at_one_deletes_the_line() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_delete_item()
            .once()
            .with(eq(ITEM))
            .returning(|_| Ok(()));
        api.expect_submit_item().never();
        api.expect_get_cart()
            .once()
            .returning(|| Ok(cart_with(&[])));
        api.expect_get_product().never();

        let dispatcher = dispatcher(api, silent_notifier(), rendering_surface(Some(0)));

        let outcome = dispatcher.decrement(&view(1, 2)?, PRODUCT).await;

        let view = outcome
            .page()
            .and_then(CartPage::view)
            .ok_or("missing view")?;

        assert!(view.line_for_product(PRODUCT).is_none());
        assert!(view.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn decrement_of_unknown_product_sends_nothing() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item().never();
        api.expect_delete_item().never();
        api.expect_get_cart().never();

        let dispatcher = dispatcher(api, silent_notifier(), silent_surface());

        let outcome = dispatcher
            .decrement(&view(1, 2)?, ProductId::new(99))
            .await;

        assert_eq!(outcome, Dispatch::NotInCart);

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_clamps_and_confirms() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item()
            .once()
            .with(eq(CartMutation::set(PRODUCT, 1)))
            .returning(|_| Ok(()));
        api.expect_get_cart()
            .once()
            .returning(|| Ok(cart_with(&[(ITEM, PRODUCT, 1, 1000)])));
        api.expect_get_product()
            .once()
            .returning(|id| Ok(snapshot(id, 2)));

        let dispatcher = dispatcher(
            api,
            expect_notification(Level::Success, QUANTITY_UPDATED),
            rendering_surface(Some(1)),
        );

        let outcome = dispatcher.set_quantity(&view(2, 2)?, PRODUCT, 0).await;

        assert!(outcome.is_applied());

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_beyond_stock_is_rejected() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item().never();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .once()
            .withf(|notification| notification.message.contains("2 unidades"))
            .return_const(());

        let dispatcher = dispatcher(api, notifier, silent_surface());

        let outcome = dispatcher.set_quantity(&view(1, 2)?, PRODUCT, 5).await;

        assert!(matches!(outcome, Dispatch::Rejected(_)));

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_confirms() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_delete_item()
            .once()
            .with(eq(ITEM))
            .returning(|_| Ok(()));
        api.expect_get_cart()
            .once()
            .returning(|| Ok(cart_with(&[])));

        let dispatcher = dispatcher(
            api,
            expect_notification(Level::Success, ITEM_REMOVED),
            rendering_surface(Some(0)),
        );

        assert!(dispatcher.remove_item(ITEM).await.is_applied());

        Ok(())
    }

    #[tokio::test]
    async fn add_to_cart_counts_units_already_in_cart() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item().never();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .once()
            .withf(|notification| notification.level == Level::Warning)
            .return_const(());

        let dispatcher = dispatcher(api, notifier, silent_surface());

        let outcome = dispatcher
            .add_to_cart(&view(2, 3)?, &snapshot(PRODUCT, 3), 2)
            .await;

        assert!(matches!(
            outcome,
            Dispatch::Rejected(StockShortfall { requested: 4, .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn add_to_cart_refuses_inactive_products() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item().never();
        api.expect_get_cart().never();

        let inactive = ProductSnapshot {
            active: false,
            ..snapshot(PRODUCT, 5)
        };

        let dispatcher = dispatcher(
            api,
            expect_notification(Level::Warning, "Produto sem estoque."),
            silent_surface(),
        );

        let outcome = dispatcher.add_to_cart(&CartView::empty(), &inactive, 1).await;

        assert_eq!(
            outcome,
            Dispatch::Rejected(StockShortfall {
                product_id: PRODUCT,
                requested: 1,
                available: 0,
            })
        );
        assert!(!outcome.is_applied());

        Ok(())
    }

    #[tokio::test]
    async fn add_to_cart_without_session_prompts_login() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item()
            .once()
            .with(eq(CartMutation::include(PRODUCT, 1)))
            .returning(|_| Err(ApiError::Unauthorized));
        api.expect_get_cart().never();

        let mut surface = MockCartSurface::new();
        surface
            .expect_render()
            .once()
            .withf(|page, _busy| *page == CartPage::LoginRequired)
            .returning(|_, _| Ok(()));
        surface.expect_cart_updated().never();

        let dispatcher = dispatcher(
            api,
            expect_notification(Level::Error, LOGIN_TO_ADD),
            surface,
        );

        let outcome = dispatcher
            .add_to_cart(&CartView::empty(), &snapshot(PRODUCT, 3), 0)
            .await;

        assert_eq!(outcome, Dispatch::LoginRequired);

        Ok(())
    }

    #[tokio::test]
    async fn applied_change_with_failed_refetch_is_unsynced() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item()
            .once()
            .with(eq(CartMutation::set(PRODUCT, 2)))
            .returning(|_| Ok(()));
        api.expect_get_cart().once().returning(|| {
            Err(ApiError::UnexpectedResponse {
                status: 500,
                message: "boom".to_string(),
            })
        });
        api.expect_get_product().never();

        let mut notifier = MockNotifier::new();
        let mut sequence = Sequence::new();
        notifier
            .expect_notify()
            .once()
            .in_sequence(&mut sequence)
            .withf(|notification| {
                notification.level == Level::Success && notification.message == QUANTITY_UPDATED
            })
            .return_const(());
        notifier
            .expect_notify()
            .once()
            .in_sequence(&mut sequence)
            .withf(|notification| {
                notification.level == Level::Error && notification.message == DATABASE_ERROR
            })
            .return_const(());

        let dispatcher = dispatcher(api, notifier, silent_surface());

        let outcome = dispatcher.set_quantity(&view(1, 5)?, PRODUCT, 2).await;

        assert_eq!(outcome, Dispatch::Unsynced);
        assert!(outcome.is_applied());
        assert!(outcome.page().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_resyncs_from_server() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item().once().returning(|_| {
            Err(ApiError::UnexpectedResponse {
                status: 500,
                message: "boom".to_string(),
            })
        });
        api.expect_get_cart()
            .once()
            .returning(|| Ok(cart_with(&[(ITEM, PRODUCT, 2, 1000)])));
        api.expect_get_product()
            .once()
            .returning(|id| Ok(snapshot(id, 5)));

        let dispatcher = dispatcher(
            api,
            expect_notification(Level::Error, DATABASE_ERROR),
            rendering_surface(None),
        );

        let outcome = dispatcher.increment(&view(2, 5)?, PRODUCT).await;

        assert!(matches!(outcome, Dispatch::Failed(Some(CartPage::Loaded(_)))));

        Ok(())
    }

    #[tokio::test]
    async fn failed_resync_keeps_last_render() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_submit_item().once().returning(|_| {
            Err(ApiError::UnexpectedResponse {
                status: 503,
                message: "down".to_string(),
            })
        });
        api.expect_get_cart().once().returning(|| {
            Err(ApiError::UnexpectedResponse {
                status: 503,
                message: "down".to_string(),
            })
        });

        let dispatcher = dispatcher(
            api,
            expect_notification(Level::Error, DATABASE_ERROR),
            silent_surface(),
        );

        let outcome = dispatcher.increment(&view(2, 5)?, PRODUCT).await;

        assert_eq!(outcome, Dispatch::Failed(None));

        Ok(())
    }

    #[tokio::test]
    async fn refresh_without_session_renders_login_placeholder() {
        let mut api = MockCartApi::new();

        api.expect_get_cart()
            .once()
            .returning(|| Err(ApiError::Unauthorized));
        api.expect_get_product().never();

        let mut surface = MockCartSurface::new();
        surface
            .expect_render()
            .once()
            .withf(|page, _busy| *page == CartPage::LoginRequired)
            .returning(|_, _| Ok(()));

        let dispatcher = dispatcher(api, silent_notifier(), surface);

        assert_eq!(dispatcher.refresh().await, CartPage::LoginRequired);
    }

    #[tokio::test]
    async fn refresh_failure_renders_unavailable_and_notifies() {
        let mut api = MockCartApi::new();

        api.expect_get_cart().once().returning(|| {
            Err(ApiError::UnexpectedResponse {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let mut surface = MockCartSurface::new();
        surface
            .expect_render()
            .once()
            .withf(|page, _busy| *page == CartPage::Unavailable)
            .returning(|_, _| Ok(()));

        let dispatcher = dispatcher(
            api,
            expect_notification(Level::Error, DATABASE_ERROR),
            surface,
        );

        assert_eq!(dispatcher.refresh().await, CartPage::Unavailable);
    }

    #[tokio::test]
    async fn refresh_tolerates_missing_snapshots() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_get_cart().once().returning(|| {
            Ok(cart_with(&[
                (ITEM, PRODUCT, 2, 1000),
                (CartItemId::new(12), ProductId::new(8), 1, 500),
            ]))
        });
        api.expect_get_product()
            .times(2)
            .returning(|id| {
                if id == PRODUCT {
                    Ok(snapshot(id, 5))
                } else {
                    Err(ApiError::NotFound)
                }
            });

        let dispatcher = dispatcher(api, silent_notifier(), rendering_surface(None));

        let page = dispatcher.refresh().await;
        let view = page.view().ok_or("missing view")?;
        let line = view
            .line_for_product(ProductId::new(8))
            .ok_or("missing line")?;

        assert_eq!(line.name, "Produto #8");
        assert_eq!(line.stock, None);
        assert_eq!(view.subtotal(), brl(2500));

        Ok(())
    }

    #[tokio::test]
    async fn rapid_repeat_sends_one_request() -> TestResult {
        let api = Arc::new(GatedCartApi::new(cart_with(&[(ITEM, PRODUCT, 2, 1000)]), 10));

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let mut surface = MockCartSurface::new();
        surface.expect_render().once().returning(|_, _| Ok(()));
        surface.expect_cart_updated().once().return_const(());

        let dispatcher = CartDispatcher::new(api.clone(), Arc::new(notifier), Arc::new(surface));
        let view = view(2, 10)?;

        let (first, second) = tokio::join!(dispatcher.increment(&view, PRODUCT), async {
            let outcome = dispatcher.increment(&view, PRODUCT).await;
            api.release();
            outcome
        });

        assert!(first.is_applied());
        assert_eq!(second, Dispatch::Busy);
        assert_eq!(api.submitted(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn key_is_released_after_failure() -> TestResult {
        let mut api = MockCartApi::new();

        api.expect_delete_item()
            .times(2)
            .returning(|_| Err(ApiError::NotFound));
        api.expect_get_cart()
            .times(2)
            .returning(|| Ok(cart_with(&[])));

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(2).return_const(());

        let mut surface = MockCartSurface::new();
        surface.expect_render().times(2).returning(|_, _| Ok(()));
        surface.expect_cart_updated().never();

        let dispatcher = dispatcher(api, notifier, surface);

        assert!(matches!(dispatcher.remove_item(ITEM).await, Dispatch::Failed(_)));
        assert!(matches!(dispatcher.remove_item(ITEM).await, Dispatch::Failed(_)));

        Ok(())
    }
}
