use log::info;
use serde::Serialize;
use stripe_checkout::{
    CreateSessionParams, ListParams, SessionLineItem, StripeClient,
};

use crate::{
    cli::{Command, CreateSessionArgs, PageArgs, PriceCommand, SessionCommand},
    error::CliError,
};

/// Runs one command and returns the pretty-printed JSON of the decoded model.
pub async fn run(client: &StripeClient, command: Command) -> Result<String, CliError> {
    match command {
        Command::Sessions(command) => run_sessions(client, command).await,
        Command::Prices(command) => run_prices(client, command).await,
    }
}

async fn run_sessions(client: &StripeClient, command: SessionCommand) -> Result<String, CliError> {
    let sessions = client.sessions();
    match command {
        SessionCommand::Create(args) => {
            let session = sessions.create(create_params(args)).await?;
            info!("Created session {}", session.id);
            render(&session)
        }
        SessionCommand::Retrieve { id, expand } => {
            let expand: Vec<&str> = expand.iter().map(String::as_str).collect();
            render(&sessions.retrieve(&id, &expand).await?)
        }
        SessionCommand::List(page) => {
            let list = sessions.list_all(list_params(page)).await?;
            info!("Fetched {} sessions, has_more={}", list.data.len(), list.has_more);
            render(&list)
        }
        SessionCommand::LineItems { session, page } => {
            render(&sessions.retrieve_line_items(&session, list_params(page)).await?)
        }
    }
}

async fn run_prices(client: &StripeClient, command: PriceCommand) -> Result<String, CliError> {
    let prices = client.prices();
    match command {
        PriceCommand::Retrieve { id, expand } => {
            let expand: Vec<&str> = expand.iter().map(String::as_str).collect();
            render(&prices.retrieve(&id, &expand).await?)
        }
        PriceCommand::List {
            page,
            active,
            product,
        } => {
            let mut filter = list_params(page).unwrap_or_default();
            if let Some(active) = active {
                filter = filter.extra("active", active);
            }
            if let Some(product) = product {
                filter = filter.extra("product", product);
            }
            render(&prices.list_all(Some(filter)).await?)
        }
    }
}

pub fn create_params(args: CreateSessionArgs) -> CreateSessionParams {
    let mut params =
        CreateSessionParams::new(args.cancel_url, args.payment_method_types, args.success_url);
    if let Some(mode) = args.mode {
        params = params.mode(mode);
    }
    if let Some(locale) = args.locale {
        params = params.locale(locale);
    }
    if let Some(customer) = args.customer {
        params = params.customer(customer);
    }
    if let Some(email) = args.customer_email {
        params = params.customer_email(email);
    }
    if let Some(reference) = args.client_reference_id {
        params = params.client_reference_id(reference);
    }
    if let (Some(price), Some(quantity)) = (args.price, args.quantity) {
        params = params.line_item(SessionLineItem::price(price, quantity));
    }
    if !args.metadata.is_empty() {
        params = params.metadata(args.metadata);
    }
    params
}

/// `None` when no paging flag was given, so the request carries no query at all.
pub fn list_params(page: PageArgs) -> Option<ListParams> {
    if page.limit.is_none() && page.starting_after.is_none() && page.ending_before.is_none() {
        return None;
    }
    let mut params = ListParams::new().limit(page.limit);
    if let Some(id) = page.starting_after {
        params = params.starting_after(id);
    }
    if let Some(id) = page.ending_before {
        params = params.ending_before(id);
    }
    Some(params)
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_only_when_paging() {
        assert!(list_params(PageArgs::default()).is_none());
        let params = list_params(PageArgs {
            limit: Some(5),
            ..Default::default()
        });
        assert_eq!(params, Some(ListParams::new().limit(5)));
    }
}
