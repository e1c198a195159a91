//! Stride storefront CLI

use std::{io, process::ExitCode};

use stride::{
    cart::{CartStore, LineKey},
    catalog::{CatalogFilter, feed::FeedClient, find_product, search, sort_products},
    checkout::{CheckoutError, CheckoutForm, place_order},
    config::{CartCommand, CatalogCommand, CheckoutArgs, Cli, Command, ListArgs, StoreConfig},
    fixtures::load_catalog,
    notifications::TracingNotifier,
    observability,
    products::Product,
    receipt::{write_cart, write_confirmation, write_products},
    storage::FileStore,
};
use tracing::debug;

type Cart = CartStore<FileStore>;

#[tokio::main]
#[expect(clippy::print_stderr, reason = "fatal errors are reported on stderr")]
pub async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(error) => error.exit(),
    };

    if let Err(error) = observability::init(&cli.logging) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Catalog(CatalogCommand::List(args)) => {
            let products = load_products(&cli.store).await?;

            list_products(&products, args)
        }
        Command::Catalog(CatalogCommand::Search { query }) => {
            let products = load_products(&cli.store).await?;
            let found = search(&products, &query);

            write_products(&mut io::stdout().lock(), &found).map_err(|error| error.to_string())
        }
        Command::Cart(command) => {
            let products = match &command {
                CartCommand::Add { .. } => load_products(&cli.store).await?,
                _ => Vec::new(),
            };

            run_cart(open_cart(&cli.store), command, &products)
        }
        Command::Checkout(args) => checkout(open_cart(&cli.store), args),
    }
}

async fn load_products(config: &StoreConfig) -> Result<Vec<Product>, String> {
    if config.feed {
        let client = FeedClient::new(config.feed_url.as_str())
            .map_err(|error| format!("failed to create feed client: {error}"))?;

        return client
            .fetch_products()
            .await
            .map_err(|error| error.to_string());
    }

    debug!(path = %config.catalog.display(), "loading product catalog");

    load_catalog(&config.catalog).map_err(|error| {
        format!(
            "failed to load catalog {}: {error}",
            config.catalog.display()
        )
    })
}

fn open_cart(config: &StoreConfig) -> Cart {
    CartStore::new(FileStore::new(config.storage_path())).with_notifier(TracingNotifier)
}

fn list_products(products: &[Product], args: ListArgs) -> Result<(), String> {
    let filter = CatalogFilter {
        category: args.category,
        price_bands: args.bands,
        colors: args.colors,
        sizes: args.sizes,
    };

    let mut view = filter.apply(products);

    sort_products(&mut view, args.sort);

    write_products(&mut io::stdout().lock(), &view).map_err(|error| error.to_string())
}

fn run_cart(mut cart: Cart, command: CartCommand, products: &[Product]) -> Result<(), String> {
    match command {
        CartCommand::Show => {}
        CartCommand::Add { id, size, quantity } => {
            let product =
                find_product(products, &id).ok_or_else(|| format!("unknown product: {id}"))?;

            if let Some(size) = size.as_deref()
                && !product.has_size(size)
            {
                return Err(format!("{} is not available in size {size}", product.name));
            }

            cart.add_item(product, size.as_deref(), quantity);
        }
        CartCommand::Remove { id, size } => {
            let removed = match size.as_deref() {
                Some(size) => cart.remove_line(&LineKey::new(id.as_str(), Some(size))),
                None => cart.remove_item(&id),
            };

            if removed.is_none() {
                return Err(format!("{id} is not in the cart"));
            }
        }
        CartCommand::Set { id, quantity, size } => {
            if quantity == 0 {
                return Err("quantity must be at least 1; use `cart remove` instead".to_string());
            }

            let changed = match size.as_deref() {
                Some(size) => {
                    cart.set_line_quantity(&LineKey::new(id.as_str(), Some(size)), quantity)
                }
                None => cart.set_quantity(&id, quantity) > 0,
            };

            if !changed {
                return Err(format!("{id} is not in the cart"));
            }
        }
        CartCommand::Clear => cart.clear(),
    }

    write_cart(&mut io::stdout().lock(), cart.lines()).map_err(|error| error.to_string())
}

fn checkout(mut cart: Cart, args: CheckoutArgs) -> Result<(), String> {
    let form = CheckoutForm {
        name: args.name,
        phone: args.phone,
        country: args.country,
        province: args.province,
        home_address: args.address,
    };

    let confirmation = match place_order(&mut cart, form, &mut rand::thread_rng()) {
        Ok(confirmation) => confirmation,
        Err(CheckoutError::InvalidForm(errors)) => {
            let details: Vec<String> = errors
                .failures()
                .map(|(field, message)| format!("  {field}: {message}"))
                .collect();

            return Err(format!("invalid checkout form:\n{}", details.join("\n")));
        }
        Err(error) => return Err(error.to_string()),
    };

    write_confirmation(&mut io::stdout().lock(), &confirmation).map_err(|error| error.to_string())
}
