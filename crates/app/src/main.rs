//! PetGo cart CLI

use std::{io, process};

use clap::{Parser, Subcommand};
use petgo::{
    items::CartItemId,
    products::ProductId,
    view::{CartPage, CartView},
};
use petgo_app::{
    config::AppConfig,
    context::AppContext,
    dispatcher::{CartDispatcher, Dispatch},
    observability,
};

#[derive(Debug, Parser)]
#[command(name = "petgo-cart", about = "PetGo cart client", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the cart
    Show,

    /// Add one unit of a product in the cart
    Inc {
        /// Product id
        product: u64,
    },

    /// Take one unit off a product in the cart
    Dec {
        /// Product id
        product: u64,
    },

    /// Set the quantity of a product
    Set {
        /// Product id
        product: u64,

        /// New quantity (at least 1)
        quantity: u32,
    },

    /// Remove a cart row
    Remove {
        /// Cart item id
        item: u64,
    },

    /// Add a product to the cart
    Add {
        /// Product id
        product: u64,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
}

impl Cli {
    fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    let context = match AppContext::from_config(&cli.config) {
        Ok(context) => context,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    };

    let code = run(&context, cli.command).await;

    if let Err(error) = context.surface.write_to(io::stdout().lock()) {
        eprintln!("{error}");
        process::exit(1);
    }

    process::exit(code);
}

async fn run(context: &AppContext, command: Commands) -> i32 {
    let dispatcher = &context.dispatcher;

    let page = dispatcher.refresh().await;

    let CartPage::Loaded(view) = &page else {
        return page_code(&page);
    };

    match command {
        Commands::Show => page_code(&page),
        Commands::Inc { product } => {
            dispatch_code(&dispatcher.increment(view, ProductId::new(product)).await)
        }
        Commands::Dec { product } => {
            dispatch_code(&dispatcher.decrement(view, ProductId::new(product)).await)
        }
        Commands::Set { product, quantity } => dispatch_code(
            &dispatcher
                .set_quantity(view, ProductId::new(product), quantity)
                .await,
        ),
        Commands::Remove { item } => {
            dispatch_code(&dispatcher.remove_item(CartItemId::new(item)).await)
        }
        Commands::Add { product, quantity } => {
            add(context, dispatcher, view, ProductId::new(product), quantity).await
        }
    }
}

async fn add(
    context: &AppContext,
    dispatcher: &CartDispatcher,
    view: &CartView,
    product: ProductId,
    quantity: u32,
) -> i32 {
    match context.api.get_product(product).await {
        Ok(snapshot) => dispatch_code(&dispatcher.add_to_cart(view, &snapshot, quantity).await),
        Err(error) => {
            eprintln!("failed to load product {product}: {error}");

            1
        }
    }
}

fn page_code(page: &CartPage) -> i32 {
    match page {
        CartPage::Loaded(_) => 0,
        CartPage::LoginRequired => 2,
        CartPage::Unavailable => 1,
    }
}

fn dispatch_code(outcome: &Dispatch) -> i32 {
    match outcome {
        Dispatch::Applied(page) => page_code(page),
        Dispatch::LoginRequired => 2,
        Dispatch::Unsynced
        | Dispatch::Busy
        | Dispatch::Rejected(_)
        | Dispatch::NotInCart
        | Dispatch::Failed(_) => 1,
    }
}
