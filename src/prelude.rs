//! Bullion Store prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{
        Field, ForgotPasswordForm, FormError, LoginForm, RESET_DELAY, RegisterForm, ResetStatus,
        validate_email,
    },
    cart::{Cart, CartError, CartItem},
    catalog::{Catalog, CatalogError},
    categories::{Category, CategoryHero},
    likes::{LikeState, Likes},
    listing::{CategoryFilter, Listing, ListingError, PriceRange, SortOrder},
    navigation::View,
    pricing::{TotalPriceError, total_price},
    products::{Product, ProductId},
    session::{Command, Session, SessionError},
    store::{StoreError, Storefront},
    summary::{SummaryError, write_cart, write_listing, write_product},
};
