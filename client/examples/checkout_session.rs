use stripe_checkout::{
    CreateSessionParams, ListParams, SessionLineItem, StripeClient,
    endpoints::sessions::{Mode, PaymentMethodType},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads STRIPE_API_KEY (and optionally STRIPE_API_BASE)
    let client = StripeClient::from_env()?;
    let price = std::env::args()
        .nth(1)
        .ok_or("usage: checkout_session <price_id>")?;

    println!("=== Checkout Session Example ===\n");

    // 1. Create a session for one unit of the given price
    let session = client
        .sessions()
        .create(
            CreateSessionParams::new(
                "https://example.com/cancel",
                [PaymentMethodType::Card],
                "https://example.com/success?session_id={CHECKOUT_SESSION_ID}",
            )
            .mode(Mode::Payment)
            .line_item(SessionLineItem::price(price, 1))
            .metadata([("source", "example")]),
        )
        .await?;
    println!("1. Created session {}", session.id);

    // 2. Retrieve it again with the line items inlined
    let session = client
        .sessions()
        .retrieve(&session.id, &["line_items"])
        .await?;
    if let Some(items) = &session.line_items {
        for item in &items.data {
            println!(
                "2. Line item {}: {:?} x {:?}",
                item.id, item.description, item.quantity
            );
        }
    }

    // 3. Walk every page of sessions
    let mut filter = ListParams::new().limit(10);
    let mut total = 0;
    loop {
        let page = client.sessions().list_all(Some(filter.clone())).await?;
        total += page.data.len();
        match (page.has_more, page.data.last()) {
            (true, Some(last)) => filter = filter.starting_after(last.id.clone()),
            _ => break,
        }
    }
    println!("3. Account has {total} sessions");

    Ok(())
}
