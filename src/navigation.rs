//! Navigation
//!
//! The storefront shows exactly one top-level view at a time. Transitions are
//! unconditional jumps; there is no history stack.

use std::fmt;

/// Top-level page selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    /// Landing page with the hero and the full product grid
    #[default]
    Home,

    /// Category page for the selected category
    Category,

    /// Product detail page for the selected product
    Product,

    /// Sign in form
    Login,

    /// Registration form
    Register,

    /// Password reset request form
    ForgotPassword,
}

impl View {
    /// Whether this is one of the authentication pages.
    pub fn is_auth(self) -> bool {
        matches!(self, View::Login | View::Register | View::ForgotPassword)
    }

    /// Where "back" leads from this view.
    ///
    /// Product detail always returns to the category page, whatever led to it;
    /// every other page returns home.
    pub fn back(self) -> View {
        match self {
            View::Product => View::Category,
            _ => View::Home,
        }
    }

    /// Whether the shop chrome (header, cart panel, footer) is shown.
    pub fn has_shop_chrome(self) -> bool {
        !self.is_auth()
    }

    fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Category => "category",
            View::Product => "product",
            View::Login => "login",
            View::Register => "register",
            View::ForgotPassword => "forgot-password",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
