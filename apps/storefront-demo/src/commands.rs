//! # Demo Commands
//!
//! One function per subcommand. Each takes the [`AppContext`] and a writer
//! so tests can capture the output.
//!
//! ## Command to Store Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command            Store actions                                      │
//! │  ───────            ─────────────                                      │
//! │  catalog            Catalog::top_deals / trending / query              │
//! │  shop <id>...       add_to_cart_by_id × n, open_cart                   │
//! │  login              open_login_modal, (delay), AuthStore::login        │
//! │  logout             AuthStore::logout                                  │
//! │  whoami             AuthStore::user                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, Write};

use storefront_core::{LoginForm, Product, ProductQuery, SignupForm};
use storefront_state::{AppContext, Session};
use tracing::{debug, info};

use crate::error::DemoResult;
use crate::Command;

/// Runs `command` against `ctx`.
pub async fn execute(
    ctx: &mut AppContext,
    command: Command,
    out: &mut impl Write,
) -> DemoResult<()> {
    match command {
        Command::Catalog(query) => catalog(ctx, query.as_ref(), out),
        Command::Shop(ids) => shop(ctx, &ids, out),
        Command::Login {
            email,
            password,
            name,
        } => login(ctx, email, password, name, out).await,
        Command::Logout => logout(ctx, out),
        Command::Whoami => whoami(ctx, out),
        Command::Help => Ok(()),
    }
}

/// Prints the home page sections, or the grid for `query`.
pub fn catalog(
    ctx: &AppContext,
    query: Option<&ProductQuery>,
    out: &mut impl Write,
) -> DemoResult<()> {
    match query {
        None => {
            writeln!(out, "Top Deals")?;
            for product in ctx.top_deals() {
                product_line(ctx, product, out)?;
            }
            writeln!(out)?;
            writeln!(out, "Trending")?;
            for product in ctx.trending() {
                product_line(ctx, product, out)?;
            }
            writeln!(out)?;
            let categories: Vec<&str> =
                ctx.catalog.categories.iter().map(|c| c.id.as_str()).collect();
            writeln!(out, "Categories: {}", categories.join(", "))?;
        }
        Some(query) => {
            let products = ctx.catalog.query(query);
            debug!(results = products.len(), ?query, "catalog query");
            writeln!(out, "{} products", products.len())?;
            for product in products {
                product_line(ctx, product, out)?;
            }
        }
    }
    Ok(())
}

/// Adds each id to the cart (repeats increment) and prints the drawer.
/// With no ids, runs a scripted session over the top deals instead.
pub fn shop(ctx: &mut AppContext, ids: &[String], out: &mut impl Write) -> DemoResult<()> {
    if ids.is_empty() {
        return scripted_session(ctx, out);
    }

    for id in ids {
        ctx.add_to_cart_by_id(id)?;
    }
    ctx.cart.open_cart();
    drawer(ctx, out)?;
    Ok(())
}

/// Add the top deals, bump the first, then take some back out.
fn scripted_session(ctx: &mut AppContext, out: &mut impl Write) -> DemoResult<()> {
    let deals: Vec<String> = ctx.top_deals().iter().map(|p| p.id.clone()).collect();
    let (Some(first), Some(last)) = (deals.first(), deals.last()) else {
        writeln!(out, "Catalog is empty")?;
        return Ok(());
    };

    for id in &deals {
        ctx.add_to_cart_by_id(id)?;
    }
    ctx.add_to_cart_by_id(first)?;
    ctx.cart.open_cart();
    drawer(ctx, out)?;

    writeln!(out)?;
    ctx.cart.update_quantity(first, 1);
    if last != first {
        ctx.cart.remove_item(last);
    }
    drawer(ctx, out)?;
    ctx.cart.close_cart();
    Ok(())
}

/// Validates the form, waits the configured delay and signs in.
pub async fn login(
    ctx: &mut AppContext,
    email: String,
    password: String,
    name: Option<String>,
    out: &mut impl Write,
) -> DemoResult<()> {
    ctx.auth.open_login_modal();

    let user = match name {
        Some(name) => SignupForm::new(name, email, password).into_user()?,
        None => LoginForm::new(email, password).into_user()?,
    };

    info!(delay_ms = ctx.config.login_delay_ms, "Signing in");
    tokio::time::sleep(ctx.config.login_delay()).await;

    writeln!(out, "Signed in as {} <{}>", user.name, user.email)?;
    ctx.auth.login(user);
    Ok(())
}

pub fn logout(ctx: &mut AppContext, out: &mut impl Write) -> DemoResult<()> {
    let was = ctx.auth.session();
    ctx.auth.logout();
    match was {
        Session::Authenticated => writeln!(out, "Signed out")?,
        Session::Anonymous => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

pub fn whoami(ctx: &AppContext, out: &mut impl Write) -> DemoResult<()> {
    match ctx.auth.user() {
        Some(user) => {
            writeln!(out, "Hello, {}", user.first_name())?;
            writeln!(out, "  id:    {}", user.id)?;
            writeln!(out, "  email: {}", user.email)?;
        }
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

fn product_line(ctx: &AppContext, product: &Product, out: &mut impl Write) -> io::Result<()> {
    let price = ctx.config.format_price(product.price);
    if product.is_discounted() {
        writeln!(
            out,
            "  [{:>2}] {:<40} {:>12}  {} ({}% off)  ★{:.1}",
            product.id,
            product.name,
            price,
            ctx.config.format_price(product.original_price),
            product.discount,
            product.rating
        )
    } else {
        writeln!(
            out,
            "  [{:>2}] {:<40} {:>12}  ★{:.1}",
            product.id, product.name, price, product.rating
        )
    }
}

fn drawer(ctx: &AppContext, out: &mut impl Write) -> io::Result<()> {
    let cart = &ctx.cart;
    let totals = cart.totals();
    writeln!(out, "Cart ({} items)", totals.total_items)?;
    for item in cart.items() {
        writeln!(
            out,
            "  {:<40} x{:<3} {:>12}",
            item.product.name,
            item.quantity,
            ctx.config.format_price(item.line_total())
        )?;
    }
    writeln!(out, "  Total: {}", ctx.config.format_price(totals.total_price))?;
    if totals.total_savings.is_positive() {
        writeln!(
            out,
            "  You save {} on this order",
            ctx.config.format_price(totals.total_savings)
        )?;
    }
    Ok(())
}
