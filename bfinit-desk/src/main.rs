//! bfinit-desk: console front end for the order desk
//!
//! Reads one command per line from stdin and prints the affected table.
//! Configuration comes from the environment (and `.env`), see
//! [`ClientConfig`] and [`DeskConfig`].

use std::sync::Arc;

use anyhow::Context;
use bfinit_client::models::{CategoryDraft, PaymentStatus, ProductUpdate};
use bfinit_client::{BfinitClient, ClientConfig};
use bfinit_desk::console::{Command, HELP};
use bfinit_desk::view::{PAYMENT_COLUMNS, RowView, format_date, money, payment_method_label};
use bfinit_desk::{DeskConfig, OrderListing, PageItem, PaymentLedger, RowOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

struct Desk {
    client: Arc<BfinitClient>,
    orders: OrderListing<BfinitClient>,
    payments: PaymentLedger<BfinitClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bfinit_desk=info,bfinit_client=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let client_config = ClientConfig::from_env();
    let desk_config = DeskConfig::from_env();
    tracing::info!(base_url = %client_config.base_url, "Starting bfinit-desk");

    let client = Arc::new(BfinitClient::new(&client_config).context("building API client")?);
    let mut desk = Desk {
        orders: OrderListing::new(client.clone(), &desk_config)?,
        payments: PaymentLedger::new(client.clone(), &desk_config)?,
        client,
    };

    if desk.client.session().is_authenticated() {
        if desk.orders.activate().await.is_ok() {
            print_orders(&desk.orders);
        }
    } else {
        println!("Not signed in. Use `login <email> <password>`.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(e) = desk.run(command).await {
            println!("error: {}", e);
        }
    }

    tracing::info!("bfinit-desk stopped");
    Ok(())
}

impl Desk {
    async fn run(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Login { email, password } => {
                self.client.login(&email, &password).await?;
                println!("Signed in as {}", email);
                self.orders.invalidate(bfinit_desk::Tab::Online);
                self.orders.invalidate(bfinit_desk::Tab::Manual);
                self.orders.activate().await?;
                print_orders(&self.orders);
            }
            Command::Logout => {
                self.client.logout();
                println!("Signed out");
            }
            Command::Tab(tab) => {
                let fetched = self.orders.select_tab(tab).await;
                print_orders(&self.orders);
                fetched?;
            }
            Command::Show => print_orders(&self.orders),
            Command::Page(n) => {
                self.orders.set_page(n);
                print_orders(&self.orders);
            }
            Command::Next => {
                if self.orders.next_page() {
                    print_orders(&self.orders);
                }
            }
            Command::Prev => {
                if self.orders.previous_page() {
                    print_orders(&self.orders);
                }
            }
            Command::Size(n) => {
                self.orders.set_page_size(n)?;
                self.payments.set_page_size(n)?;
                print_orders(&self.orders);
            }
            Command::Select { id, status } => {
                let current = self
                    .orders
                    .order(&id)
                    .map(|o| o.status())
                    .with_context(|| format!("no order {} on this tab", id))?;
                let status = current
                    .parse_like(&status)
                    .with_context(|| format!("unknown status {}", status))?;
                self.orders.select_status(&id, status)?;
                print_orders(&self.orders);
            }
            Command::Confirm(id) => {
                let outcome = self.orders.confirm_edit(&id).await?;
                report(&id, &outcome);
                print_orders(&self.orders);
            }
            Command::Cancel(id) => {
                self.orders.cancel_edit(&id)?;
                print_orders(&self.orders);
            }
            Command::Retry => {
                let fetched = self.orders.retry().await;
                print_orders(&self.orders);
                fetched?;
            }
            Command::Stats => {
                let stats = self.orders.stats();
                println!(
                    "[{}] total {}  pending {}  processing {}  completed {}",
                    self.orders.tab(),
                    stats.total,
                    stats.pending,
                    stats.processing,
                    stats.completed
                );
            }
            Command::Details(id) => {
                let order = self.client.order_details(&id).await?;
                println!("order     {}", order.order_number.as_deref().unwrap_or(&order.id));
                println!("status    {}", order.status.label());
                println!("domain    {}", order.domain.as_deref().unwrap_or("N/A"));
                println!("created   {}", format_date(order.created_at));
                println!("total     {}", money(&order.currency, order.total()));
                println!("paid      {}", if order.is_paid() { "yes" } else { "no" });
                println!("payment   {}", payment_method_label(order.payment_type()));
                for product in &order.products {
                    println!("  - {}", product.name.as_deref().unwrap_or("N/A"));
                }
            }
            Command::Payments { legacy: true } => {
                let payments = self.client.legacy_payments().await?;
                for p in &payments {
                    println!(
                        "{}  {}  {}  {}",
                        p.order_id.as_deref().unwrap_or(&p.id),
                        p.name.as_deref().unwrap_or("N/A"),
                        money(p.currency.as_deref().unwrap_or("$"), p.price),
                        p.payment_status().label()
                    );
                }
                println!("{} legacy payments", payments.len());
            }
            Command::Payments { legacy: false } => {
                let fetched = self.payments.activate().await;
                print_payments(&self.payments);
                fetched?;
            }
            Command::Pay(id) => {
                self.payments.activate().await?;
                self.payments.select_status(&id, PaymentStatus::Paid)?;
                let outcome = self.payments.confirm_edit(&id).await?;
                report(&id, &outcome);
                print_payments(&self.payments);
            }
            Command::Products(search) => {
                let products = self.client.products().await?;
                let matching = products
                    .iter()
                    .filter(|p| search.as_deref().is_none_or(|s| p.matches_search(s)));
                for p in matching {
                    println!("{}  {}  {}  {}", p.id, p.name, money("$", p.price), p.status);
                }
            }
            Command::ProductPrice { id, price } => {
                let products = self.client.products().await?;
                let product = products
                    .iter()
                    .find(|p| p.id == id)
                    .with_context(|| format!("no product {}", id))?;
                let mut update = ProductUpdate::from_product(product);
                update.price = price;
                self.client.update_product(&id, update).await?;
                println!("{}: price now {}", product.name, money("$", price));
            }
            Command::Categories => {
                let categories = self.client.categories().await?;
                for c in &categories {
                    let status = c.status.as_deref().unwrap_or("N/A");
                    println!("{}  {}  {}", c.id, c.name, status);
                }
                println!("{} categories", categories.len());
            }
            Command::Catalog => {
                for entry in self.client.category_products().await? {
                    println!("{} ({} products)", entry.category.name, entry.products.len());
                    for p in &entry.products {
                        println!("  - {}  {}", p.name, money("$", p.price));
                    }
                }
            }
            Command::CategoryAdd { name, description } => {
                self.client
                    .create_category(CategoryDraft::new(name.as_str(), description), None)
                    .await?;
                println!("Category {} created", name);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => {}
        }
        Ok(())
    }
}

fn report(id: &str, outcome: &RowOutcome) {
    match outcome {
        RowOutcome::Applied => println!("{}: updated", id),
        RowOutcome::RolledBack(message) => println!("{}: failed, rolled back ({})", id, message),
    }
}

fn print_orders(orders: &OrderListing<BfinitClient>) {
    if let Some(error) = orders.error() {
        println!("! {} (use `retry`)", error);
    }
    println!("== {} orders ==", orders.tab());
    print_table(orders.columns(), &orders.rows());
    print_pager(orders.page(), orders.total_pages(), &orders.page_window(), orders.len());
}

fn print_payments(payments: &PaymentLedger<BfinitClient>) {
    if let Some(error) = payments.error() {
        println!("! {}", error);
    }
    println!("== payments ({} paid) ==", payments.paid_count());
    print_table(&PAYMENT_COLUMNS, &payments.rows());
    print_pager(payments.page(), payments.total_pages(), &payments.page_window(), payments.len());
}

fn print_table(columns: &[&str], rows: &[RowView]) {
    println!("id | {}", columns.join(" | "));
    if rows.is_empty() {
        println!("(no rows)");
    }
    for row in rows {
        let mut status = row.status.current.to_string();
        if row.status.show_confirm {
            status.push_str(" [confirm/cancel]");
        }
        if row.status.disabled {
            status.push_str(" (locked)");
        }
        println!("{} | {} | {}", row.id, row.cells.join(" | "), status);
        if let Some(notice) = &row.status.notice {
            println!("    {}", notice);
        }
    }
}

fn print_pager(page: usize, total_pages: usize, window: &[PageItem], count: usize) {
    let pages: Vec<String> = window
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == page => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect();
    println!("page {}/{}  {}  ({} rows)", page, total_pages, pages.join(" "), count);
}
