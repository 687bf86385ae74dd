use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shopfront")]
#[command(about = "Storefront client - sign in, manage the cart and check out")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the resolved configuration
    Config {
        /// Save a new API base URL to the config file
        #[arg(long, value_name = "URL")]
        set_api: Option<String>,
    },

    #[command(flatten)]
    Shop(ShopCommand),
}

/// Commands that act on the session store
#[derive(Subcommand, Debug)]
pub enum ShopCommand {
    /// Sign in to the storefront
    Login {
        account: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Fetch and print the signed-in user's profile
    Whoami,

    /// Add to or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Place an order for everything in the cart
    Checkout,
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Add a product to the cart
    Add {
        product: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Change the quantity of a product already in the cart
    Update {
        product: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}
