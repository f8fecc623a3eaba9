use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use pizza_stack_lambda::counter::ToppingsCounter;
use pizza_stack_lambda::handlers::{handle_event, ApiGatewayResponse};
use serde_json::Value;

/// Item key under which the toppings count is stored.
const COUNTER_ITEM_ID: &str = "toppings";

struct DynamoToppingsCounter {
    table: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl ToppingsCounter for DynamoToppingsCounter {
    fn increment(&self) -> Result<i64, String> {
        let table = self.table.clone();
        let client = self.dynamodb_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let response = client
                    .update_item()
                    .table_name(table)
                    .key("id", AttributeValue::S(COUNTER_ITEM_ID.to_string()))
                    .update_expression("ADD toppings :one")
                    .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
                    .return_values(ReturnValue::AllNew)
                    .send()
                    .await
                    .map_err(|error| format!("failed to update toppings counter: {error}"))?;

                response
                    .attributes()
                    .and_then(|attributes| attributes.get("toppings"))
                    .and_then(|value| value.as_n().ok())
                    .ok_or_else(|| "toppings attribute missing from update response".to_string())?
                    .parse::<i64>()
                    .map_err(|error| format!("toppings attribute is not numeric: {error}"))
            })
        })
    }
}

fn edge_endpoint() -> String {
    let host =
        std::env::var("LOCALSTACK_HOSTNAME").unwrap_or_else(|_| "localstack".to_string());
    let port = std::env::var("EDGE_PORT").unwrap_or_else(|_| "4566".to_string());
    format!("http://{host}:{port}")
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .endpoint_url(edge_endpoint())
        .load()
        .await;

    // An unset table only breaks the counter route; health stays answerable.
    let counter = DynamoToppingsCounter {
        table: std::env::var("TABLE_NAME").unwrap_or_default(),
        dynamodb_client: aws_sdk_dynamodb::Client::new(&config),
    };

    Ok(handle_event(&event.payload, &counter))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
