//! Interactive terminal front end.
//!
//! Each input line is split into words with POSIX shell quoting, so
//! `register a@b.com "open sesame" "open sesame"` keeps the spaces, then
//! parsed as a command (clap multicall) and dispatched to
//! the services in [`AppState`]. Output is rendered from the services'
//! published state: after every command, [`Screens`] checks the session,
//! product and list channels and redraws whatever changed.

use std::io::{self, Write};

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use shop_track::config::AppConfig;
use shop_track::error::{AppError, add_breadcrumb};
use shop_track::services::session::SessionWatcher;
use shop_track::services::shopping_list::ListSection;
use shop_track::state::AppState;
use shop_track_core::{EntryId, Product, ShoppingListEntry};

use super::CliError;

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Parser)]
#[command(multicall = true)]
enum ShellCommand {
    /// Show whether you are logged in
    Status,
    /// Log in
    Login { email: String, password: String },
    /// Log out
    Logout,
    /// Register a new account
    Register {
        email: String,
        password: String,
        confirm_password: String,
    },
    /// List categories
    Categories,
    /// Filter by category; without a name, show every category
    Category { name: Vec<String> },
    /// Search product names; without text, clear the search
    Search { text: Vec<String> },
    /// Show the filtered products
    Products,
    /// Show a product's details and related products
    Show {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Add an item to the list by name
    Add {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Add a catalog product to the list
    AddProduct {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Check or uncheck a list entry
    Toggle { id: i64 },
    /// Show the shopping list
    List,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Run the shell on stdin/stdout until `quit` or end of input.
///
/// With `preview`, the shell runs against [`AppState::preview`] instead of
/// the configured store.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the terminal fails.
/// Command failures are printed and do not end the session.
pub async fn run(config: AppConfig, preview: bool) -> Result<(), CliError> {
    let state = if preview {
        AppState::preview(config).await?
    } else {
        AppState::connect(config).await?
    };
    let mut screens = Screens::new(&state);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = io::stdout();

    write_welcome(&mut out)?;
    writeln!(out, "Type `help` for commands.")?;

    loop {
        write!(out, "{}> ", state.session().state())?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match execute(&state, &line, &mut out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(CliError::App(err)) => {
                err.report();
                writeln!(out, "error: {}", err.user_message())?;
            }
            Err(err) => return Err(err),
        }

        screens.render(&state, &mut out)?;
    }

    Ok(())
}

/// Parse and run one input line.
///
/// # Errors
///
/// Returns `CliError::App` when the command is rejected (not logged in,
/// validation, unknown product) and `CliError::Io` if writing fails.
pub async fn execute<W: Write>(
    state: &AppState,
    line: &str,
    out: &mut W,
) -> Result<Flow, CliError> {
    let Some(words) = shlex::split(line) else {
        writeln!(out, "error: unbalanced quotes")?;
        return Ok(Flow::Continue);
    };
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    let command = match ShellCommand::try_parse_from(words) {
        Ok(command) => command,
        Err(err) => {
            write!(out, "{}", err.render())?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        ShellCommand::Status => {
            writeln!(
                out,
                "{} (login policy: {})",
                state.session().state(),
                state.auth().policy()
            )?;
        }
        ShellCommand::Login { email, password } => {
            add_breadcrumb("session", "Login", None);
            state
                .auth()
                .login(&email, &password)
                .await
                .map_err(AppError::from)?;
        }
        ShellCommand::Logout => {
            add_breadcrumb("session", "Logout", None);
            state.auth().logout();
        }
        ShellCommand::Register {
            email,
            password,
            confirm_password,
        } => {
            add_breadcrumb("session", "Register", None);
            state
                .auth()
                .register(&email, &password, &confirm_password)
                .await
                .map_err(AppError::from)?;
            writeln!(out, "Registered {email}. You can log in now.")?;
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
        gated => {
            require_login(state)?;
            execute_gated(state, gated, out)?;
        }
    }

    Ok(Flow::Continue)
}

fn require_login(state: &AppState) -> Result<(), AppError> {
    if state.session().is_logged_in() {
        Ok(())
    } else {
        Err(AppError::NotLoggedIn)
    }
}

fn execute_gated<W: Write>(
    state: &AppState,
    command: ShellCommand,
    out: &mut W,
) -> Result<(), CliError> {
    let catalog = state.catalog();
    let list = state.shopping_list();

    match command {
        ShellCommand::Categories => {
            for category in catalog.list_categories() {
                writeln!(out, "{:<16} [{}]", category.name, category.icon)?;
            }
        }
        ShellCommand::Category { name } if name.is_empty() => catalog.clear_category(),
        ShellCommand::Category { name } => {
            let name = name.join(" ");
            if catalog.catalog().category(&name).is_none() {
                return Err(AppError::NotFound(format!("category {name}")).into());
            }
            catalog.select_category(&name);
        }
        ShellCommand::Search { text } => catalog.set_search_text(&text.join(" ")),
        ShellCommand::Products => write_products(out, &catalog.visible_products())?,
        ShellCommand::Show { name } => {
            let name = name.join(" ");
            let product = catalog
                .catalog()
                .product_by_name(&name)
                .ok_or_else(|| AppError::NotFound(format!("product {name}")))?;
            write_product_detail(out, product, &catalog.catalog().related_products(product.id))?;
        }
        ShellCommand::Add { name } => {
            let name = name.join(" ");
            add_breadcrumb("list", "Added item", Some(&[("name", name.as_str())]));
            list.add_to_list(&name);
        }
        ShellCommand::AddProduct { name } => {
            let name = name.join(" ");
            let product = catalog
                .catalog()
                .product_by_name(&name)
                .ok_or_else(|| AppError::NotFound(format!("product {name}")))?;
            add_breadcrumb("list", "Added product", Some(&[("name", product.name.as_str())]));
            list.add_product(product);
        }
        ShellCommand::Toggle { id } => {
            list.toggle_checked(EntryId::new(id)).map_err(AppError::from)?;
        }
        ShellCommand::List => write_list(out, &list.sections())?,
        ShellCommand::Status
        | ShellCommand::Login { .. }
        | ShellCommand::Logout
        | ShellCommand::Register { .. }
        | ShellCommand::Quit => {}
    }

    Ok(())
}

/// Subscriptions to the services' published state.
pub struct Screens {
    session: SessionWatcher,
    products: watch::Receiver<Vec<Product>>,
    list: watch::Receiver<Vec<ShoppingListEntry>>,
}

impl Screens {
    /// Subscribe to every published stream of `state`.
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            session: state.session().subscribe(),
            products: state.catalog().subscribe(),
            list: state.shopping_list().subscribe(),
        }
    }

    /// Redraw whatever changed since the last call.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn render<W: Write>(&mut self, state: &AppState, out: &mut W) -> io::Result<()> {
        if self.session.has_changed().unwrap_or(false) {
            let session = *self.session.borrow_and_update();
            if session.is_logged_in() {
                writeln!(out, "== Home ==")?;
                write_products(out, &self.products.borrow_and_update())?;
            } else {
                write_welcome(out)?;
            }
        }

        if self.products.has_changed().unwrap_or(false) {
            write_products(out, &self.products.borrow_and_update())?;
        }

        if self.list.has_changed().unwrap_or(false) {
            self.list.mark_unchanged();
            write_list(out, &state.shopping_list().sections())?;
        }

        Ok(())
    }
}

fn write_welcome<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "== Shop-Track ==")?;
    writeln!(out, "Stay organized with our app")
}

fn write_products<W: Write>(out: &mut W, products: &[Product]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No matching products");
    }
    for product in products {
        writeln!(out, "  {:<24} {}", product.name, product.category)?;
    }
    Ok(())
}

fn write_product_detail<W: Write>(
    out: &mut W,
    product: &Product,
    related: &[&Product],
) -> io::Result<()> {
    writeln!(out, "{}", product.name)?;
    writeln!(out, "{}", product.description)?;
    writeln!(out, "Category: {}", product.category)?;
    if !related.is_empty() {
        let names: Vec<&str> = related.iter().map(|p| p.name.as_str()).collect();
        writeln!(out, "Related: {}", names.join(", "))?;
    }
    Ok(())
}

fn write_list<W: Write>(out: &mut W, sections: &[ListSection]) -> io::Result<()> {
    if sections.is_empty() {
        return writeln!(out, "Shopping list is empty");
    }
    for section in sections {
        writeln!(out, "{}", section.label)?;
        for entry in &section.entries {
            let mark = if entry.is_checked { "[x]" } else { "[ ]" };
            writeln!(out, "  {mark} {:>3}  {}", entry.id, entry.name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn state() -> AppState {
        AppState::connect(AppConfig::in_memory()).await.unwrap()
    }

    async fn run_line(state: &AppState, line: &str) -> (Result<Flow, CliError>, String) {
        let mut out = Vec::new();
        let result = execute(state, line, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_blank_line_is_ignored() {
        let state = state().await;
        let (result, output) = run_line(&state, "   ").await;
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_requires_login() {
        let state = state().await;
        let (result, _) = run_line(&state, "products").await;
        assert!(matches!(result, Err(CliError::App(AppError::NotLoggedIn))));
    }

    #[tokio::test]
    async fn test_login_then_browse() {
        let state = state().await;
        run_line(&state, "login a@b.com secret").await.0.unwrap();
        assert!(state.session().is_logged_in());

        run_line(&state, "search brea").await.0.unwrap();
        let (_, output) = run_line(&state, "products").await;
        assert!(output.contains("Whole Wheat Bread"));
        assert!(!output.contains("Cheese"));
    }

    #[tokio::test]
    async fn test_register_validation_is_reported() {
        let state = state().await;
        let (result, _) = run_line(&state, "register a@b.com p1 p2").await;
        let Err(CliError::App(err)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(
            err.user_message(),
            "Please ensure all fields are filled correctly and passwords match."
        );
    }

    #[tokio::test]
    async fn test_add_toggle_and_list() {
        let state = state().await;
        run_line(&state, "login a@b.com p").await.0.unwrap();
        run_line(&state, "add-product cheese").await.0.unwrap();
        run_line(&state, "add Paper Towels").await.0.unwrap();
        run_line(&state, "toggle 1").await.0.unwrap();

        let (_, output) = run_line(&state, "list").await;
        assert!(output.contains("Food"));
        assert!(output.contains("[x]"));
        assert!(output.contains("Uncategorized"));
        assert!(output.contains("Paper Towels"));
    }

    #[tokio::test]
    async fn test_unknown_category_and_product() {
        let state = state().await;
        run_line(&state, "login a@b.com p").await.0.unwrap();

        let (result, _) = run_line(&state, "category Garden").await;
        assert!(matches!(result, Err(CliError::App(AppError::NotFound(_)))));

        let (result, _) = run_line(&state, "show Caviar").await;
        assert!(matches!(result, Err(CliError::App(AppError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_show_product_detail() {
        let state = state().await;
        run_line(&state, "login a@b.com p").await.0.unwrap();

        let (_, output) = run_line(&state, "show Cheese").await;
        assert!(output.contains("Cheddar cheese."));
        assert!(output.contains("Related: Whole Wheat Bread"));
    }

    #[tokio::test]
    async fn test_unknown_command_prints_usage() {
        let state = state().await;
        let (result, output) = run_line(&state, "fly").await;
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(!output.is_empty());
    }

    #[tokio::test]
    async fn test_quoted_password_keeps_spaces() {
        let state = state().await;
        run_line(&state, r#"register a@b.com "open sesame" "open sesame""#)
            .await
            .0
            .unwrap();

        let stored = shop_track::db::credentials::CredentialRepository::new(state.pool())
            .find_by_email("a@b.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password_matches("open sesame"));
    }

    #[tokio::test]
    async fn test_quoted_name_is_kept_verbatim() {
        let state = state().await;
        run_line(&state, "login a@b.com p").await.0.unwrap();
        run_line(&state, "add 'Paper  Towels'").await.0.unwrap();

        assert_eq!(state.shopping_list().entries()[0].name, "Paper  Towels");
    }

    #[tokio::test]
    async fn test_unbalanced_quotes_are_reported() {
        let state = state().await;
        let (result, output) = run_line(&state, r#"login "a@b.com p"#).await;
        assert_eq!(result.unwrap(), Flow::Continue);
        assert!(output.contains("unbalanced quotes"));
        assert!(!state.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_status_shows_login_policy() {
        let state = state().await;
        let (_, output) = run_line(&state, "status").await;
        assert_eq!(output, "logged_out (login policy: accept_any)\n");
    }

    #[tokio::test]
    async fn test_quit() {
        let state = state().await;
        assert_eq!(run_line(&state, "exit").await.0.unwrap(), Flow::Quit);
    }

    #[tokio::test]
    async fn test_screens_follow_published_state() {
        let state = state().await;
        let mut screens = Screens::new(&state);
        let mut out = Vec::new();

        screens.render(&state, &mut out).unwrap();
        assert!(out.is_empty());

        state.auth().login("a@b.com", "p").await.unwrap();
        screens.render(&state, &mut out).unwrap();
        let rendered = String::from_utf8(std::mem::take(&mut out)).unwrap();
        assert!(rendered.contains("== Home =="));
        assert!(rendered.contains("Apple Juice"));

        state.catalog().select_category("Beverages");
        state.shopping_list().add_to_list("Milk");
        screens.render(&state, &mut out).unwrap();
        let rendered = String::from_utf8(std::mem::take(&mut out)).unwrap();
        assert!(!rendered.contains("Cheese"));
        assert!(rendered.contains("Milk"));

        state.auth().logout();
        screens.render(&state, &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.contains("Stay organized with our app"));
    }
}
