//! Storefront state
//!
//! [`Storefront`] holds everything a shopping session mutates: like state, the
//! cart, the active view, the selected category and product, and whether the
//! product modal and cart panel are open. Product lists are derived from the
//! catalog on every read.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartError, CartItem},
    catalog::{Catalog, CatalogError},
    categories::{Category, CategoryHero},
    likes::{LikeState, Likes},
    listing::{CategoryFilter, Listing, PriceRange, SortOrder},
    navigation::View,
    pricing::TotalPriceError,
    products::{Product, ProductId},
};

/// Storefront errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product with this id in the catalog
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Out-of-stock products cannot be added to the cart
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// Wrapped cart error
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Wrapped cart total error
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapped catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Catalog and cart state for one shopping session.
#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Catalog,
    likes: Likes,
    cart: Cart,
    view: View,
    selected_category: Category,
    selected_product: Option<Product>,
    product_modal_open: bool,
    cart_open: bool,
}

impl Storefront {
    /// Start a session over the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        let likes = Likes::from_catalog(&catalog);
        let cart = Cart::new(catalog.currency());

        Self {
            catalog,
            likes,
            cart,
            view: View::Home,
            selected_category: Category::default(),
            selected_product: None,
            product_modal_open: false,
            cart_open: false,
        }
    }

    /// Start a session over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog is invalid.
    pub fn embedded() -> Result<Self, StoreError> {
        Ok(Self::new(Catalog::embedded()?))
    }

    /// The canonical catalog, without like state.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every product with current like state, in catalog order.
    pub fn products(&self) -> Vec<Product> {
        self.likes.overlay_all(&self.catalog)
    }

    /// A product with current like state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] if the id is not in the catalog.
    pub fn product(&self, id: ProductId) -> Result<Product, StoreError> {
        self.catalog
            .product(id)
            .map(|product| self.likes.overlay(product))
            .ok_or(StoreError::ProductNotFound(id))
    }

    /// Like or unlike a product.
    ///
    /// The selected product's copy is refreshed when it is the toggled one.
    pub fn toggle_like(&mut self, id: ProductId) -> LikeState {
        let state = self.likes.toggle(id);

        if let Some(selected) = self.selected_product.as_mut()
            && selected.id == id
        {
            selected.likes = state.likes;
            selected.is_liked = state.is_liked;
        }

        debug!(product = %id, likes = state.likes, liked = state.is_liked, "toggled like");

        state
    }

    /// Put `quantity` units of a product in the cart, then close the product modal
    /// and open the cart panel.
    ///
    /// Returns the line's quantity after the addition.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ProductNotFound`]: the id is not in the catalog.
    /// - [`StoreError::OutOfStock`]: the product is not in stock.
    /// - [`StoreError::Cart`]: the cart rejected the addition.
    pub fn add_to_cart(&mut self, id: ProductId, quantity: u32) -> Result<u32, StoreError> {
        let product = self.product(id)?;

        if !product.in_stock {
            return Err(StoreError::OutOfStock(id));
        }

        let line_quantity = self.cart.add(product, quantity)?;

        info!(product = %id, quantity, line_quantity, "added to cart");

        self.product_modal_open = false;
        self.cart_open = true;

        Ok(line_quantity)
    }

    /// Set a cart line's quantity; zero removes it.
    pub fn update_cart_quantity(&mut self, id: ProductId, quantity: u32) -> Option<&CartItem> {
        if quantity == 0 {
            self.remove_from_cart(id);

            return None;
        }

        let item = self.cart.update_quantity(id, quantity);

        if item.is_some() {
            info!(product = %id, quantity, "updated cart quantity");
        }

        item
    }

    /// Remove a product's cart line, if present.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Option<CartItem> {
        let removed = self.cart.remove(id);

        if removed.is_some() {
            info!(product = %id, "removed from cart");
        }

        removed
    }

    /// The session cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart total, recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TotalPrice`] if the total cannot be computed.
    pub fn cart_total(&self) -> Result<Money<'static, Currency>, StoreError> {
        Ok(self.cart.total()?)
    }

    /// Units in the cart, shown on the header badge.
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Active view
    pub fn view(&self) -> View {
        self.view
    }

    /// Category shown by the category page.
    pub fn selected_category(&self) -> &Category {
        &self.selected_category
    }

    /// Product shown by the detail page or modal.
    pub fn selected_product(&self) -> Option<&Product> {
        self.selected_product.as_ref()
    }

    /// Whether the quick-view modal is open.
    pub fn is_product_modal_open(&self) -> bool {
        self.product_modal_open
    }

    /// Whether the cart panel is open.
    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// Show the category page for `category`.
    pub fn show_category(&mut self, category: impl Into<Category>) {
        self.selected_category = category.into();
        self.set_view(View::Category);
    }

    /// Select a product and show its detail page. On the detail page already,
    /// the page is updated in place.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] if the id is not in the catalog.
    pub fn view_product(&mut self, id: ProductId) -> Result<&Product, StoreError> {
        let product = self.product(id)?;

        if self.view != View::Product {
            self.set_view(View::Product);
        }

        Ok(&*self.selected_product.insert(product))
    }

    /// Select a product and open the quick-view modal over the current view.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] if the id is not in the catalog.
    pub fn open_product_modal(&mut self, id: ProductId) -> Result<&Product, StoreError> {
        let product = self.product(id)?;

        self.product_modal_open = true;

        Ok(&*self.selected_product.insert(product))
    }

    /// Close the quick-view modal and clear the selection.
    pub fn close_product_modal(&mut self) {
        self.product_modal_open = false;
        self.selected_product = None;
    }

    /// Open the cart panel.
    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    /// Close the cart panel.
    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// Return to the home page, clearing the selected product.
    pub fn back_to_home(&mut self) {
        self.selected_product = None;
        self.set_view(View::Home);
    }

    /// Return to the category page.
    pub fn back_to_category(&mut self) {
        self.set_view(View::Category);
    }

    /// Follow the active view's "back" link.
    pub fn back(&mut self) {
        match self.view.back() {
            View::Category => self.back_to_category(),
            _ => self.back_to_home(),
        }
    }

    /// Show the sign in page.
    pub fn show_login(&mut self) {
        self.set_view(View::Login);
    }

    /// Show the registration page.
    pub fn show_register(&mut self) {
        self.set_view(View::Register);
    }

    /// Show the password reset page.
    pub fn show_forgot_password(&mut self) {
        self.set_view(View::ForgotPassword);
    }

    /// Products in the selected category, filtered by price and sorted.
    pub fn category_listing(&self, price_range: PriceRange, sort: SortOrder) -> Vec<Product> {
        Listing::new()
            .category(self.selected_category.clone())
            .price_range(price_range)
            .sort(sort)
            .apply(&self.products())
    }

    /// Home grid products, optionally restricted to one category, sorted.
    pub fn home_listing(&self, category: CategoryFilter, sort: SortOrder) -> Vec<Product> {
        Listing::new()
            .category(category)
            .sort(sort)
            .apply(&self.products())
    }

    /// Other products in the selected product's category.
    pub fn related_products(&self) -> Vec<Product> {
        let Some(selected) = self.selected_product.as_ref() else {
            return Vec::new();
        };

        self.products()
            .into_iter()
            .filter(|product| product.category == selected.category && product.id != selected.id)
            .collect()
    }

    /// Hero banner for the selected category.
    pub fn category_hero(&self) -> CategoryHero {
        self.selected_category.hero()
    }

    fn set_view(&mut self, view: View) {
        debug!(from = %self.view, to = %view, "view changed");

        self.view = view;
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use rusty_money::iso::TRY;
    use testresult::TestResult;

    use crate::{categories, products::tests::product};

    use super::*;

    fn storefront() -> Result<Storefront, CatalogError> {
        let mut featured_silver = product(3, categories::SILVER_BARS, 500_000);
        featured_silver.featured = true;

        let mut sold_out = product(4, categories::GOLD_BARS, 9_000_000);
        sold_out.in_stock = false;

        let mut liked = product(2, categories::GOLD_BARS, 2_000_000);
        liked.likes = 4;

        Ok(Storefront::new(Catalog::with_products(vec![
            product(1, categories::GOLD_BARS, 100_000),
            liked,
            featured_silver,
            sold_out,
        ])?))
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn starts_home_with_empty_cart() -> TestResult {
        let store = storefront()?;

        assert_eq!(store.view(), View::Home);
        assert_eq!(store.selected_category().name(), categories::GOLD_BARS);
        assert!(store.selected_product().is_none());
        assert!(store.cart().is_empty());
        assert!(!store.is_cart_open());
        assert!(!store.is_product_modal_open());
        assert_eq!(store.cart_total()?, Money::from_minor(0, TRY));

        Ok(())
    }

    #[test]
    fn embedded_storefront_loads() -> TestResult {
        let store = Storefront::embedded()?;

        assert_eq!(store.products().len(), store.catalog().len());

        Ok(())
    }

    #[test]
    fn products_overlay_likes() -> TestResult {
        let mut store = storefront()?;

        store.toggle_like(ProductId::new(2));

        let liked = store.product(ProductId::new(2))?;
        assert_eq!(liked.likes, 5);
        assert!(liked.is_liked);

        let canonical = store
            .catalog()
            .product(ProductId::new(2))
            .ok_or("missing product")?;
        assert_eq!(canonical.likes, 4);

        Ok(())
    }

    #[test]
    fn toggle_like_refreshes_selected_product() -> TestResult {
        let mut store = storefront()?;

        store.view_product(ProductId::new(2))?;
        store.toggle_like(ProductId::new(2));

        let selected = store.selected_product().ok_or("nothing selected")?;
        assert_eq!(selected.likes, 5);
        assert!(selected.is_liked);
        assert_eq!(*selected, store.product(ProductId::new(2))?);

        store.toggle_like(ProductId::new(2));

        let selected = store.selected_product().ok_or("nothing selected")?;
        assert_eq!(selected.likes, 4);
        assert!(!selected.is_liked);

        Ok(())
    }

    #[test]
    fn toggle_like_leaves_other_selection_alone() -> TestResult {
        let mut store = storefront()?;

        store.view_product(ProductId::new(1))?;
        store.toggle_like(ProductId::new(2));

        let selected = store.selected_product().ok_or("nothing selected")?;
        assert_eq!(selected.likes, 0);
        assert!(!selected.is_liked);

        Ok(())
    }

    #[test]
    fn add_to_cart_opens_cart_and_closes_modal() -> TestResult {
        let mut store = storefront()?;

        store.open_product_modal(ProductId::new(1))?;
        assert!(store.is_product_modal_open());

        assert_eq!(store.add_to_cart(ProductId::new(1), 2)?, 2);

        assert!(!store.is_product_modal_open());
        assert!(store.is_cart_open());
        assert_eq!(store.cart_item_count(), 2);

        Ok(())
    }

    #[test]
    fn add_to_cart_accumulates() -> TestResult {
        let mut store = storefront()?;

        store.add_to_cart(ProductId::new(1), 1)?;
        store.add_to_cart(ProductId::new(1), 1)?;

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart_item_count(), 2);
        assert_eq!(store.cart_total()?, Money::from_minor(200_000, TRY));

        Ok(())
    }

    #[test]
    fn add_to_cart_rejects_unknown_and_out_of_stock() -> TestResult {
        let mut store = storefront()?;

        assert!(matches!(
            store.add_to_cart(ProductId::new(99), 1),
            Err(StoreError::ProductNotFound(_))
        ));
        assert!(matches!(
            store.add_to_cart(ProductId::new(4), 1),
            Err(StoreError::OutOfStock(_))
        ));
        assert!(matches!(
            store.add_to_cart(ProductId::new(1), 0),
            Err(StoreError::Cart(CartError::ZeroQuantity(_)))
        ));
        assert!(store.cart().is_empty());
        assert!(!store.is_cart_open());

        Ok(())
    }

    #[test]
    fn cart_quantity_updates_and_removal() -> TestResult {
        let mut store = storefront()?;

        store.add_to_cart(ProductId::new(1), 1)?;
        store.add_to_cart(ProductId::new(2), 1)?;

        assert_eq!(
            store
                .update_cart_quantity(ProductId::new(1), 5)
                .map(CartItem::quantity),
            Some(5)
        );

        assert!(store.update_cart_quantity(ProductId::new(1), 0).is_none());
        assert!(store.cart().get(ProductId::new(1)).is_none());

        assert!(store.remove_from_cart(ProductId::new(2)).is_some());
        assert!(store.remove_from_cart(ProductId::new(2)).is_none());
        assert!(store.cart().is_empty());

        Ok(())
    }

    /// Log output captured from a scoped subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            self.0
                .lock()
                .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
                .unwrap_or_default()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|_err| io::Error::other("log buffer poisoned"))?
                .extend_from_slice(buf);

            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_captured_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        logs.contents()
    }

    #[test]
    fn quantity_updates_only_log_real_changes() -> TestResult {
        let mut store = storefront()?;
        store.add_to_cart(ProductId::new(1), 1)?;

        let logs = with_captured_logs(|| {
            store.update_cart_quantity(ProductId::new(9), 3);
        });

        assert!(!logs.contains("updated cart quantity"));

        let logs = with_captured_logs(|| {
            store.update_cart_quantity(ProductId::new(1), 3);
        });

        assert!(logs.contains("updated cart quantity"));

        let logs = with_captured_logs(|| {
            store.update_cart_quantity(ProductId::new(1), 0);
        });

        assert!(logs.contains("removed from cart"));
        assert!(!logs.contains("updated cart quantity"));
        assert!(store.cart().is_empty());

        let logs = with_captured_logs(|| {
            store.update_cart_quantity(ProductId::new(1), 0);
        });

        assert!(logs.is_empty());

        Ok(())
    }

    #[test]
    fn view_product_moves_to_detail_page() -> TestResult {
        let mut store = storefront()?;

        store.show_category(categories::GOLD_BARS);
        store.view_product(ProductId::new(1))?;

        assert_eq!(store.view(), View::Product);
        assert_eq!(
            store.selected_product().map(|p| p.id),
            Some(ProductId::new(1))
        );

        store.view_product(ProductId::new(2))?;

        assert_eq!(store.view(), View::Product);
        assert_eq!(
            store.selected_product().map(|p| p.id),
            Some(ProductId::new(2))
        );

        Ok(())
    }

    #[test]
    fn view_unknown_product_keeps_state() -> TestResult {
        let mut store = storefront()?;

        assert!(matches!(
            store.view_product(ProductId::new(99)),
            Err(StoreError::ProductNotFound(_))
        ));
        assert_eq!(store.view(), View::Home);

        Ok(())
    }

    #[test]
    fn back_from_product_always_returns_to_category() -> TestResult {
        let mut store = storefront()?;

        store.view_product(ProductId::new(1))?;
        store.back();

        assert_eq!(store.view(), View::Category);
        assert!(store.selected_product().is_some());

        Ok(())
    }

    #[test]
    fn back_from_auth_pages_returns_home() -> TestResult {
        let mut store = storefront()?;

        store.view_product(ProductId::new(1))?;
        store.show_login();
        store.show_forgot_password();
        store.back();

        assert_eq!(store.view(), View::Home);
        assert!(store.selected_product().is_none());

        store.show_register();
        store.back_to_home();

        assert_eq!(store.view(), View::Home);

        Ok(())
    }

    #[test]
    fn modal_close_clears_selection() -> TestResult {
        let mut store = storefront()?;

        store.open_product_modal(ProductId::new(3))?;
        assert_eq!(store.view(), View::Home);

        store.close_product_modal();

        assert!(!store.is_product_modal_open());
        assert!(store.selected_product().is_none());

        Ok(())
    }

    #[test]
    fn cart_panel_toggles() -> TestResult {
        let mut store = storefront()?;

        store.open_cart();
        assert!(store.is_cart_open());

        store.close_cart();
        assert!(!store.is_cart_open());

        Ok(())
    }

    #[test]
    fn category_listing_uses_selected_category() -> TestResult {
        let mut store = storefront()?;

        store.show_category(categories::GOLD_BARS);

        let all = store.category_listing(PriceRange::All, SortOrder::PriceHigh);
        assert_eq!(ids(&all), vec![4, 2, 1]);

        let low = store.category_listing(PriceRange::Low, SortOrder::Featured);
        assert_eq!(ids(&low), vec![1]);

        let medium = store.category_listing(PriceRange::Medium, SortOrder::Featured);
        assert_eq!(ids(&medium), vec![2]);

        let high = store.category_listing(PriceRange::High, SortOrder::Featured);
        assert_eq!(ids(&high), vec![4]);

        Ok(())
    }

    #[test]
    fn home_listing_puts_featured_first() -> TestResult {
        let store = storefront()?;

        let listed = store.home_listing(CategoryFilter::All, SortOrder::Featured);
        assert_eq!(ids(&listed), vec![3, 1, 2, 4]);

        let silver = store.home_listing(
            CategoryFilter::Only(Category::new(categories::SILVER_BARS)),
            SortOrder::Featured,
        );
        assert_eq!(ids(&silver), vec![3]);

        Ok(())
    }

    #[test]
    fn related_products_share_category_and_exclude_selected() -> TestResult {
        let mut store = storefront()?;

        assert!(store.related_products().is_empty());

        store.view_product(ProductId::new(2))?;

        assert_eq!(ids(&store.related_products()), vec![1, 4]);

        Ok(())
    }

    #[test]
    fn category_hero_follows_selection() -> TestResult {
        let mut store = storefront()?;

        store.show_category(categories::SILVER_BARS);

        assert_eq!(
            store.category_hero(),
            Category::new(categories::SILVER_BARS).hero()
        );

        Ok(())
    }
}
