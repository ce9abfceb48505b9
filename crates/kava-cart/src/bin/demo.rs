//! # Scripted Demo Session
//!
//! Runs a full cart session against an in-memory storage backend.
//!
//! ## Usage
//! ```bash
//! cargo run -p kava-cart --bin demo
//!
//! # With engine logs
//! RUST_LOG=debug cargo run -p kava-cart --bin demo
//! ```
//!
//! The script walks the whole surface: add items, clamp a quantity, type a
//! debounced search, switch delivery methods, and check out.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kava_cart::debounce::Debouncer;
use kava_cart::{CartEngine, EngineUpdate, MemoryStorage};
use kava_core::{DeliveryConfig, DeliveryMethod, DiscountRate, Money, Product};

/// The shop's menu.
fn catalog() -> Vec<Product> {
    let menu = [
        ("espresso", "Еспресо", 60, "coffee"),
        ("americano", "Американо", 70, "coffee"),
        ("latte", "Латте", 100, "coffee"),
        ("cappuccino", "Капучино", 95, "coffee"),
        ("syrnyk", "Сирник", 85, "dessert"),
        ("croissant", "Круасан", 75, "bakery"),
    ];

    menu.iter()
        .map(|(id, name, price, category)| Product {
            id: id.to_string(),
            name: name.to_string(),
            unit_price: Money::from_uah(*price),
            category: category.to_string(),
        })
        .collect()
}

fn print_summary(label: &str, update: &EngineUpdate) {
    println!("── {label}");
    println!("   товари:   {}", update.pricing.items_subtotal);
    println!(
        "   знижка:   −{} ({}%)",
        update.pricing.discount_amount,
        update.pricing.discount_rate.percentage()
    );
    println!("   доставка: {}", update.pricing.delivery_cost);
    println!("   разом:    {}", update.pricing.grand_total);
    println!("   видимі:   {:?}", update.visible);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = catalog();
    let mut engine = CartEngine::new(
        Box::new(MemoryStorage::new()),
        DeliveryConfig::courier(Money::from_uah(500)),
        DiscountRate::from_bps(1000),
    );

    info!("session start");

    engine.add_item("latte", &catalog).unwrap();
    engine.add_item("latte", &catalog).unwrap();
    let update = engine.add_item("syrnyk", &catalog).unwrap();
    print_summary("кошик наповнено", &update);

    // A typo in the quantity field: corrected, never rejected
    let update = engine.set_quantity_text("latte", "150").unwrap();
    print_summary("кількість обмежено до 99", &update);
    let update = engine.set_quantity("latte", 2).unwrap();
    print_summary("кількість виправлено", &update);

    // Debounced search: only the final text reaches the engine
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut search = Debouncer::new(move |text: String| {
        let _ = tx.send(text);
    });
    for partial in ["л", "ла", "лат"] {
        search.call(partial.to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(400)).await;
    if let Some(text) = rx.recv().await {
        let update = engine.set_search_text(text);
        print_summary("пошук застосовано", &update);
    }

    // Filtering hid items but the totals (and checkout) still see them
    assert!(engine.can_checkout());

    let update = engine.set_delivery_method(DeliveryMethod::Pickup);
    print_summary("самовивіз обрано", &update);

    let receipt = engine.checkout().unwrap();
    println!("── замовлення оформлено на суму {}", receipt.grand_total);
    assert!(!engine.can_checkout());

    info!("session end");
}
