use crate::context::AppContext;
use anyhow::{Context, Result};
use shopfront_application::{SellerConsole, Tab};
use shopfront_core::catalog::{DraftField, Order, Product};

/// Raw `seller add` arguments, parsed the way the product form parses them.
pub struct NewProduct {
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub rating: String,
    pub price: String,
}

async fn open(ctx: &AppContext) -> Result<SellerConsole> {
    SellerConsole::open(ctx.api.clone(), ctx.sessions.clone(), ctx.notifier.clone())
        .await
        .context("Seller login required (run `shopfront login --role seller`)")
}

pub async fn products(ctx: &AppContext) -> Result<()> {
    let console = open(ctx).await?;
    print_products(console.products());
    Ok(())
}

pub async fn orders(ctx: &AppContext) -> Result<()> {
    let mut console = open(ctx).await?;
    console
        .activate_tab(Tab::Orders)
        .await
        .context("Orders could not be loaded")?;
    print_orders(console.orders());
    Ok(())
}

pub async fn add(ctx: &AppContext, product: NewProduct) -> Result<()> {
    let mut console = open(ctx).await?;
    console.open_add();
    for (field, value) in [
        (DraftField::ImageUrl, &product.image_url),
        (DraftField::Name, &product.name),
        (DraftField::Description, &product.description),
        (DraftField::Rating, &product.rating),
        (DraftField::Price, &product.price),
    ] {
        console
            .update_field(field, value)
            .with_context(|| format!("Invalid {field}"))?;
    }
    console.submit_modal().await.context("Product was not added")?;
    print_products(console.products());
    Ok(())
}

pub async fn delete(ctx: &AppContext, product_id: i64) -> Result<()> {
    let mut console = open(ctx).await?;
    let deleted = console
        .delete_product(product_id)
        .await
        .with_context(|| format!("Product {product_id} was not deleted"))?;
    if deleted {
        print_products(console.products());
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products yet.");
        return;
    }
    println!("{:>6}  {:<28} {:>10}  {:<6}", "ID", "NAME", "PRICE", "RATING");
    for p in products {
        println!(
            "{:>6}  {:<28} {:>10}  {}",
            p.id,
            p.name,
            format!("${}", p.price),
            "*".repeat(p.rating.value() as usize)
        );
    }
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders yet.");
        return;
    }
    println!(
        "{:>6}  {:<10} {:<28} {:>10}  {}",
        "ORDER", "STATUS", "PRODUCT", "PRICE", "CUSTOMER"
    );
    for o in orders {
        println!(
            "{:>6}  {:<10} {:<28} {:>10}  {}",
            o.order_id,
            o.status.as_str(),
            o.product_name,
            format!("${:.2}", o.price),
            o.customer_email
        );
    }
}
