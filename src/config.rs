use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::menu::DishTypeFilter;
use crate::models::DishType;
use crate::storage::SessionKey;

/// Order from a cafe table: browse the menu, build a cart, place the order.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Cafe identifier (from the table QR code)
    #[arg(short, long, env = "CAFE_ID")]
    pub cafe: String,
    /// Table identifier (from the table QR code)
    #[arg(short, long, env = "TABLE_ID")]
    pub table: String,
    /// Base URL of the cafe backend
    #[arg(long, env = "CAFE_API_URL", default_value = "http://localhost:3000")]
    pub api_url: String,
    /// SQLite file holding carts and order history
    #[arg(long, env = "CAFE_CART_DB", default_value = "cafe_cart.sqlite")]
    pub db: PathBuf,
    /// Enable verbose logging{n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn session(&self) -> SessionKey {
        SessionKey::new(&self.cafe, &self.table)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available dishes
    Menu {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = DishTypeArg::Both)]
        dish_type: DishTypeArg,
        /// Case-insensitive part of the dish name
        #[arg(long)]
        search: Option<String>,
    },
    /// List menu categories
    Categories,
    /// Add a dish to the cart
    Add {
        dish_id: String,
        #[arg(long)]
        variant: Option<String>,
        /// Add-on name, repeat for several
        #[arg(long = "add-on")]
        add_ons: Vec<String>,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Show the cart and its total
    Cart,
    /// Set the quantity of a cart line (0 removes it)
    Qty { line: usize, quantity: u32 },
    /// Remove a cart line
    Remove { line: usize },
    /// Place the order
    Submit {
        #[arg(long)]
        customer: String,
        /// Cooking request for the kitchen
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Show the last order placed from this table
    History,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishTypeArg {
    Veg,
    NonVeg,
    Both,
}

impl From<DishTypeArg> for DishTypeFilter {
    fn from(arg: DishTypeArg) -> Self {
        match arg {
            DishTypeArg::Veg => DishTypeFilter::Only(DishType::Veg),
            DishTypeArg::NonVeg => DishTypeFilter::Only(DishType::NonVeg),
            DishTypeArg::Both => DishTypeFilter::Both,
        }
    }
}
