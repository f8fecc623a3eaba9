//! Stack identifier discovery from Terraform.
//!
//! Each identifier is queried first via `terraform output -raw`; when the
//! output is missing or empty the locator falls back to scraping
//! `terraform state show` for the resource attribute. Any identifier left
//! unresolved after both methods aborts the run.

use pizza_stack_core::identifiers::StackIdentifiers;
use pizza_stack_core::terraform::{parse_output_value, parse_state_attribute};

use crate::terraform_cli::TerraformRunner;

/// Raised when the stack identifiers cannot be resolved from Terraform,
/// meaning the infrastructure has not been provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorError {
    message: String,
}

impl LocatorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Where one identifier lives: the Terraform output name, and the state
/// address plus attribute used as fallback.
struct DiscoverySource {
    output_name: &'static str,
    state_address: &'static str,
    state_attribute: &'static str,
}

const BUCKET_SOURCE: DiscoverySource = DiscoverySource {
    output_name: "s3_bucket_name",
    state_address: "aws_s3_bucket.demo",
    state_attribute: "bucket",
};

const TABLE_SOURCE: DiscoverySource = DiscoverySource {
    output_name: "dynamodb_table_name",
    state_address: "aws_dynamodb_table.demo",
    state_attribute: "name",
};

const REST_API_SOURCE: DiscoverySource = DiscoverySource {
    output_name: "rest_api_id",
    state_address: "aws_api_gateway_rest_api.rest",
    state_attribute: "id",
};

/// Resolve the bucket, table, and REST API id from Terraform state.
pub fn detect_stack(
    runner: &dyn TerraformRunner,
    tf_dir: &str,
) -> Result<StackIdentifiers, LocatorError> {
    let bucket = resolve_identifier(runner, tf_dir, &BUCKET_SOURCE);
    let table = resolve_identifier(runner, tf_dir, &TABLE_SOURCE);
    let rest_api_id = resolve_identifier(runner, tf_dir, &REST_API_SOURCE);

    match (bucket, table, rest_api_id) {
        (Some(bucket), Some(table), Some(rest_api_id)) => {
            Ok(StackIdentifiers::new(bucket, table, rest_api_id))
        }
        _ => Err(LocatorError::new(
            "Could not detect names from Terraform. Run 'make tf-apply' first.",
        )),
    }
}

fn resolve_identifier(
    runner: &dyn TerraformRunner,
    tf_dir: &str,
    source: &DiscoverySource,
) -> Option<String> {
    runner
        .run(tf_dir, &["output", "-raw", source.output_name])
        .ok()
        .and_then(|stdout| parse_output_value(&stdout))
        .or_else(|| {
            runner
                .run(tf_dir, &["state", "show", source.state_address])
                .ok()
                .and_then(|stdout| parse_state_attribute(&stdout, source.state_attribute))
        })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Fake runner answering from a canned command table and recording
    /// every invocation.
    struct FakeTerraform {
        responses: HashMap<String, Result<String, String>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeTerraform {
        fn new(entries: &[(&str, Result<&str, &str>)]) -> Self {
            let responses = entries
                .iter()
                .map(|(command, outcome)| {
                    (
                        command.to_string(),
                        outcome
                            .map(str::to_string)
                            .map_err(str::to_string),
                    )
                })
                .collect();
            Self {
                responses,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl TerraformRunner for FakeTerraform {
        fn run(&self, _tf_dir: &str, args: &[&str]) -> Result<String, String> {
            let command = args.join(" ");
            self.calls.borrow_mut().push(command.clone());
            self.responses
                .get(&command)
                .cloned()
                .unwrap_or_else(|| Err(format!("unexpected command: {command}")))
        }
    }

    #[test]
    fn resolves_all_identifiers_from_outputs() {
        let runner = FakeTerraform::new(&[
            ("output -raw s3_bucket_name", Ok("margherita-demo-bucket\n")),
            ("output -raw dynamodb_table_name", Ok("margherita-table\n")),
            ("output -raw rest_api_id", Ok("abc123\n")),
        ]);

        let stack = detect_stack(&runner, "terraform").expect("stack should resolve");
        assert_eq!(stack.project, "margherita");
        assert_eq!(stack.bucket, "margherita-demo-bucket");
        assert_eq!(stack.table, "margherita-table");
        assert_eq!(stack.rest_api_id, "abc123");
    }

    #[test]
    fn state_show_is_not_consulted_when_outputs_resolve() {
        let runner = FakeTerraform::new(&[
            ("output -raw s3_bucket_name", Ok("margherita-demo-bucket")),
            ("output -raw dynamodb_table_name", Ok("margherita-table")),
            ("output -raw rest_api_id", Ok("abc123")),
        ]);

        detect_stack(&runner, "terraform").expect("stack should resolve");
        assert!(runner
            .calls()
            .iter()
            .all(|command| command.starts_with("output -raw")));
    }

    #[test]
    fn empty_output_falls_back_to_state_show() {
        let runner = FakeTerraform::new(&[
            ("output -raw s3_bucket_name", Ok("margherita-demo-bucket")),
            ("output -raw dynamodb_table_name", Ok("\n")),
            (
                "state show aws_dynamodb_table.demo",
                Ok("    name = \"margherita-table\"\n"),
            ),
            ("output -raw rest_api_id", Ok("abc123")),
        ]);

        let stack = detect_stack(&runner, "terraform").expect("stack should resolve");
        assert_eq!(stack.table, "margherita-table");
    }

    #[test]
    fn failed_output_command_falls_back_to_state_show() {
        let runner = FakeTerraform::new(&[
            ("output -raw s3_bucket_name", Err("output not found")),
            (
                "state show aws_s3_bucket.demo",
                Ok("    bucket = \"margherita-demo-bucket\"\n"),
            ),
            ("output -raw dynamodb_table_name", Ok("margherita-table")),
            ("output -raw rest_api_id", Ok("abc123")),
        ]);

        let stack = detect_stack(&runner, "terraform").expect("stack should resolve");
        assert_eq!(stack.bucket, "margherita-demo-bucket");
    }

    #[test]
    fn unresolved_identifier_is_fatal() {
        let runner = FakeTerraform::new(&[
            ("output -raw s3_bucket_name", Ok("margherita-demo-bucket")),
            ("output -raw dynamodb_table_name", Ok("margherita-table")),
            ("output -raw rest_api_id", Err("output not found")),
            ("state show aws_api_gateway_rest_api.rest", Err("no state")),
        ]);

        let error = detect_stack(&runner, "terraform").expect_err("stack must not resolve");
        assert!(error.message().contains("tf-apply"));
    }
}
