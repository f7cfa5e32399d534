//! Session
//!
//! Line-oriented driver for a [`Storefront`]: each line is one visitor action,
//! and the resulting state is written after it.

use std::{io, str::FromStr};

use thiserror::Error;

use crate::{
    categories::Category,
    listing::{CategoryFilter, Listing, ListingError, PriceRange, SortOrder},
    navigation::View,
    products::{Product, ProductId},
    store::{StoreError, Storefront},
    summary::{self, SummaryError},
};

/// Session command errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// The first word is not a known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument is missing
    #[error("Missing {argument} for `{command}`")]
    MissingArgument {
        /// Command name
        command: &'static str,

        /// Name of the missing argument
        argument: &'static str,
    },

    /// An argument could not be parsed
    #[error("Invalid {argument} for `{command}`: {value}")]
    InvalidArgument {
        /// Command name
        command: &'static str,

        /// Name of the argument
        argument: &'static str,

        /// Value as typed
        value: String,
    },

    /// The command has no effect on the page being shown
    #[error("`{command}` is not available on the {view} page")]
    NotOnThisPage {
        /// Command name
        command: &'static str,

        /// Active view
        view: View,
    },

    /// Unknown filter or sort value
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// Wrapped storefront error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Wrapped rendering error
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// Error writing to the output
    #[error("Failed to write session output: {0}")]
    Io(#[from] io::Error),
}

/// One visitor action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `category <name>`: open a category page
    Category(Category),

    /// `filter <all|low|medium|high>`: category page price filter
    Filter(PriceRange),

    /// `grid <category|all>`: home grid category dropdown
    Grid(CategoryFilter),

    /// `sort <featured|price-low|price-high|name>`: home grid or category page order
    Sort(SortOrder),

    /// `view <id>`: product detail page
    View(ProductId),

    /// `modal <id>`: product quick view
    Modal(ProductId),

    /// `close`: close the quick view and the cart panel
    Close,

    /// `like <id>`
    Like(ProductId),

    /// `add <id> [quantity]`
    Add(ProductId, u32),

    /// `qty <id> <quantity>`
    Quantity(ProductId, u32),

    /// `remove <id>`
    Remove(ProductId),

    /// `cart`: open the cart panel
    Cart,

    /// `back`: follow the view's back link
    Back,

    /// `home`
    Home,

    /// `login`
    Login,

    /// `register`
    Register,

    /// `forgot`: password reset page
    Forgot,

    /// `products`: list the products for the current view
    Products,
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default();

        let command = match name {
            "category" => {
                let category = words.collect::<Vec<_>>().join(" ");

                if category.is_empty() {
                    return Err(SessionError::MissingArgument {
                        command: "category",
                        argument: "category name",
                    });
                }

                Command::Category(Category::new(category))
            }
            "filter" => Command::Filter(required(&mut words, "filter", "price range")?.parse()?),
            "grid" => {
                let category = words.collect::<Vec<_>>().join(" ");

                if category.is_empty() {
                    return Err(SessionError::MissingArgument {
                        command: "grid",
                        argument: "category name",
                    });
                }

                if category == "all" {
                    Command::Grid(CategoryFilter::All)
                } else {
                    Command::Grid(CategoryFilter::Only(Category::new(category)))
                }
            }
            "sort" => Command::Sort(required(&mut words, "sort", "sort order")?.parse()?),
            "view" => Command::View(product_id(&mut words, "view")?),
            "modal" => Command::Modal(product_id(&mut words, "modal")?),
            "close" => Command::Close,
            "like" => Command::Like(product_id(&mut words, "like")?),
            "add" => {
                let id = product_id(&mut words, "add")?;
                let quantity = match words.next() {
                    Some(value) => quantity(value, "add")?,
                    None => 1,
                };

                Command::Add(id, quantity)
            }
            "qty" => {
                let id = product_id(&mut words, "qty")?;
                let value = required(&mut words, "qty", "quantity")?;

                Command::Quantity(id, quantity(value, "qty")?)
            }
            "remove" => Command::Remove(product_id(&mut words, "remove")?),
            "cart" => Command::Cart,
            "back" => Command::Back,
            "home" => Command::Home,
            "login" => Command::Login,
            "register" => Command::Register,
            "forgot" => Command::Forgot,
            "products" => Command::Products,
            other => return Err(SessionError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, SessionError> {
    words
        .next()
        .ok_or(SessionError::MissingArgument { command, argument })
}

fn product_id<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<ProductId, SessionError> {
    let value = required(words, command, "product id")?;

    value
        .parse::<u32>()
        .map(ProductId::from)
        .map_err(|_err| SessionError::InvalidArgument {
            command,
            argument: "product id",
            value: value.to_string(),
        })
}

fn quantity(value: &str, command: &'static str) -> Result<u32, SessionError> {
    value
        .parse::<u32>()
        .map_err(|_err| SessionError::InvalidArgument {
            command,
            argument: "quantity",
            value: value.to_string(),
        })
}

/// A storefront plus the listing controls of the home grid and the category
/// page. Controls live as long as their page: any view change resets both.
#[derive(Debug, Clone)]
pub struct Session {
    store: Storefront,
    home_grid: Listing,
    category_page: Listing,
}

impl Session {
    /// Start a session over a storefront.
    pub fn new(store: Storefront) -> Self {
        Self {
            store,
            home_grid: Listing::new(),
            category_page: Listing::new(),
        }
    }

    /// Storefront state
    pub fn store(&self) -> &Storefront {
        &self.store
    }

    /// Home grid controls: category dropdown and sort.
    pub fn home_grid(&self) -> &Listing {
        &self.home_grid
    }

    /// Category page controls: price filter and sort. The category itself is
    /// the storefront's selected category.
    pub fn category_page(&self) -> &Listing {
        &self.category_page
    }

    /// Products for the current view: the filtered category page on
    /// [`View::Category`], the home grid otherwise.
    pub fn listing(&self) -> Vec<Product> {
        if self.store.view() == View::Category {
            self.store
                .category_listing(self.category_page.price_range, self.category_page.sort)
        } else {
            self.store
                .home_listing(self.home_grid.category.clone(), self.home_grid.sort)
        }
    }

    /// Parse and run one input line. Blank lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be parsed or the command fails.
    pub fn run_line(&mut self, line: &str, out: impl io::Write) -> Result<(), SessionError> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        self.execute(line.parse()?, out)
    }

    /// Run a command and write what it shows, followed by a status line.
    ///
    /// # Errors
    ///
    /// Returns an error if the storefront rejects the command, the command does
    /// not apply to the active view, or the output cannot be written.
    pub fn execute(&mut self, command: Command, mut out: impl io::Write) -> Result<(), SessionError> {
        let before = self.store.view();

        match command {
            Command::Category(category) => {
                self.store.show_category(category);
                self.reset_controls();

                let hero = self.store.category_hero();
                writeln!(out, "{}\n{}", hero.title, hero.subtitle)?;
                summary::write_listing(&mut out, &self.listing())?;
            }
            Command::Filter(price_range) => {
                self.require_view("filter", &[View::Category])?;
                self.category_page.price_range = price_range;
                summary::write_listing(&mut out, &self.listing())?;
            }
            Command::Grid(category) => {
                self.require_view("grid", &[View::Home])?;
                self.home_grid.category = category;
                summary::write_listing(&mut out, &self.listing())?;
            }
            Command::Sort(sort) => {
                self.require_view("sort", &[View::Home, View::Category])?;

                if self.store.view() == View::Category {
                    self.category_page.sort = sort;
                } else {
                    self.home_grid.sort = sort;
                }

                summary::write_listing(&mut out, &self.listing())?;
            }
            Command::View(id) => {
                summary::write_product(&mut out, self.store.view_product(id)?)?;

                let related = self.store.related_products();

                if !related.is_empty() {
                    writeln!(out, "Benzer ürünler")?;
                    summary::write_listing(&mut out, &related)?;
                }
            }
            Command::Modal(id) => {
                summary::write_product(&mut out, self.store.open_product_modal(id)?)?;
            }
            Command::Close => {
                self.store.close_product_modal();
                self.store.close_cart();
            }
            Command::Like(id) => {
                let state = self.store.toggle_like(id);
                let mark = if state.is_liked { "♥" } else { "♡" };

                writeln!(out, "{mark} {id}: {}", state.likes)?;
            }
            Command::Add(id, quantity) => {
                self.store.add_to_cart(id, quantity)?;
                summary::write_cart(&mut out, self.store.cart())?;
            }
            Command::Quantity(id, quantity) => {
                self.store.update_cart_quantity(id, quantity);
                summary::write_cart(&mut out, self.store.cart())?;
            }
            Command::Remove(id) => {
                self.store.remove_from_cart(id);
                summary::write_cart(&mut out, self.store.cart())?;
            }
            Command::Cart => {
                self.store.open_cart();
                summary::write_cart(&mut out, self.store.cart())?;
            }
            Command::Back => self.store.back(),
            Command::Home => self.store.back_to_home(),
            Command::Login => self.store.show_login(),
            Command::Register => self.store.show_register(),
            Command::Forgot => self.store.show_forgot_password(),
            Command::Products => summary::write_listing(&mut out, &self.listing())?,
        }

        if self.store.view() != before {
            self.reset_controls();
        }

        self.write_status(out)
    }

    fn reset_controls(&mut self) {
        self.home_grid = Listing::new();
        self.category_page = Listing::new();
    }

    fn require_view(&self, command: &'static str, views: &[View]) -> Result<(), SessionError> {
        let view = self.store.view();

        if views.contains(&view) {
            Ok(())
        } else {
            Err(SessionError::NotOnThisPage { command, view })
        }
    }

    fn write_status(&self, mut out: impl io::Write) -> Result<(), SessionError> {
        let store = &self.store;

        write!(out, "[{}]", store.view())?;

        match store.view() {
            View::Category => write!(
                out,
                " {} ({}, {})",
                store.selected_category(),
                self.category_page.price_range,
                self.category_page.sort
            )?,
            View::Home => {
                let category = match &self.home_grid.category {
                    CategoryFilter::All => "all",
                    CategoryFilter::Only(category) => category.name(),
                };

                write!(out, " ({category}, {})", self.home_grid.sort)?;
            }
            _ => {}
        }

        if let Some(product) = store.selected_product() {
            write!(out, " seçili: {}", product.name)?;
        }

        if store.is_product_modal_open() {
            write!(out, " [hızlı bakış]")?;
        }

        if store.is_cart_open() {
            write!(out, " [sepet açık]")?;
        }

        writeln!(
            out,
            " sepet: {} ürün, {}",
            store.cart_item_count(),
            store.cart_total()?
        )?;

        Ok(())
    }
}
