pub mod api;
pub mod commands;
pub mod composer;
pub mod config;
pub mod db;
pub mod error;
pub mod menu;
pub mod models;
pub mod notify;
pub mod selection;
pub mod storage;


use std::env;

use commands::{cart, menu as menu_cmd, orders, App};
use config::{Args, Command};
use menu::MenuFilter;
use models::{CartSummary, DishType, OrderLine};

pub fn logger_init(module_path: &str) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module(
            module_path,
            if env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
                == "debug"
            {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        )
        .init();
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        env::set_var("RUST_LOG", "debug");
    }
    logger_init("cafe_cart_lib");

    let db = db::Database::open(&args.db)?;
    db.initialize()?;

    let (events, mut order_events) = notify::order_event_channel();
    let app = App {
        db,
        api: api::HttpCafeApi::new(&args.api_url),
        session: args.session(),
        events,
    };
    log::debug!(
        "Session cafe={} table={} api={}",
        app.session.cafe_id,
        app.session.table_id,
        app.api.base_url()
    );

    match args.command {
        Command::Menu {
            category,
            dish_type,
            search,
        } => {
            let filter = MenuFilter {
                category,
                dish_type: dish_type.into(),
                search,
            };
            let dishes = menu_cmd::get_menu(&app, &filter)
                .await
                .map_err(anyhow::Error::msg)?;

            if dishes.is_empty() {
                println!("No dishes match.");
            }
            for dish in dishes {
                let tag = match dish.dish_type {
                    DishType::Veg => "veg",
                    DishType::NonVeg => "non-veg",
                };
                println!(
                    "{}  {} [{}, {}]  Rs {}",
                    dish.id, dish.name, dish.category, tag, dish.price
                );
                for v in &dish.variants {
                    println!("    variant {}  Rs {}", v.name, v.price);
                }
                for a in &dish.add_ons {
                    println!("    add-on  {}  +Rs {}", a.name, a.price);
                }
            }
        }
        Command::Categories => {
            for name in menu_cmd::get_categories(&app)
                .await
                .map_err(anyhow::Error::msg)?
            {
                println!("{}", name);
            }
        }
        Command::Add {
            dish_id,
            variant,
            add_ons,
            quantity,
        } => {
            let summary = cart::add_to_cart(&app, &dish_id, variant.as_deref(), &add_ons, quantity)
                .await
                .map_err(anyhow::Error::msg)?;
            print_cart(&summary);
        }
        Command::Cart => {
            let summary = cart::get_cart(&app).map_err(anyhow::Error::msg)?;
            print_cart(&summary);
        }
        Command::Qty { line, quantity } => {
            let summary =
                cart::update_quantity(&app, line, quantity).map_err(anyhow::Error::msg)?;
            print_cart(&summary);
        }
        Command::Remove { line } => {
            let summary = cart::remove_from_cart(&app, line).map_err(anyhow::Error::msg)?;
            print_cart(&summary);
        }
        Command::Submit { customer, note } => {
            let payload = orders::place_order(&app, &customer, &note)
                .await
                .map_err(anyhow::Error::msg)?;
            notify::log_order_events(&mut order_events);
            println!("Order placed successfully!");
            print_lines(&payload.order_list);
        }
        Command::History => {
            let lines = orders::get_order_history(&app).map_err(anyhow::Error::msg)?;
            if lines.is_empty() {
                println!("No recent order.");
            } else {
                print_lines(&lines);
            }
        }
    }

    Ok(())
}

fn print_cart(summary: &CartSummary) {
    if summary.items.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for (idx, item) in summary.items.iter().enumerate() {
        let variant = if item.variant.is_default() {
            String::new()
        } else {
            format!(" - {}", item.variant.name)
        };
        println!(
            "{:>2}. {}{}  x{}  Rs {}",
            idx + 1,
            item.dish_name,
            variant,
            item.quantity,
            item.line_total
        );
        for a in &item.add_ons {
            println!("      {} (+{})", a.name, a.price);
        }
    }
    println!("Total : Rs {}", summary.total);
}

fn print_lines(lines: &[OrderLine]) {
    for line in lines {
        let variant = if line.dish_variants.name == models::DEFAULT_VARIANT_NAME {
            String::new()
        } else {
            format!(" ({})", line.dish_variants.name)
        };
        println!("  {}{}  x{}", line.dish_name, variant, line.quantity);
        for a in &line.dish_add_ons {
            println!("      {}", a.name);
        }
    }
}
