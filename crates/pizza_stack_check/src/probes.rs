//! Network probes against the LocalStack edge.
//!
//! Checks run in a fixed sequential order; each one converts transport and
//! service errors into a [`CheckResult`] instead of propagating them, so a
//! broken stack still yields a full line-by-line report.

use std::env;
use std::time::Duration;

use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use pizza_stack_core::report::CheckResult;

/// Stage name LocalStack deploys the demo REST API under.
const API_STAGE: &str = "dev";

/// Retry attempts delegated to the SDK; no retry loop lives in this code.
const SDK_MAX_ATTEMPTS: u32 = 3;

/// HTTP probes hitting the edge health endpoint and the application routes.
#[derive(Debug, Clone)]
pub struct EdgeProbes {
    http: reqwest::Client,
    base: String,
}

impl EdgeProbes {
    /// Create probes for the given edge base URL (e.g. `http://localhost:4566`).
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build edge HTTP client");
        Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Edge reachability: any response below 500 counts as healthy, since
    /// LocalStack answers its health route even while services warm up.
    pub async fn check_edge_health(&self) -> CheckResult {
        let url = format!("{}/_localstack/health", self.base);
        match self.http.get(&url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if status < 500 {
                    CheckResult::pass(format!("LocalStack edge reachable ({status})"))
                } else {
                    CheckResult::fail(format!("LocalStack edge unhealthy ({status})"))
                }
            }
            Err(error) => CheckResult::fail(format!("LocalStack not reachable: {error}")),
        }
    }

    /// LocalStack's user-request execution URL for the deployed REST API.
    pub fn exec_base(&self, rest_api_id: &str) -> String {
        format!(
            "{}/restapis/{rest_api_id}/{API_STAGE}/_user_request_",
            self.base
        )
    }

    /// `GET /slice/health` through the gateway, expected to return 200.
    pub async fn check_health_route(&self, exec_base: &str) -> CheckResult {
        let outcome = self
            .http
            .get(format!("{exec_base}/slice/health"))
            .send()
            .await;
        route_result("GET /slice/health", outcome)
    }

    /// `POST /toppings` through the gateway, expected to return 200.
    pub async fn check_toppings_route(&self, exec_base: &str) -> CheckResult {
        let outcome = self.http.post(format!("{exec_base}/toppings")).send().await;
        route_result("POST /toppings", outcome)
    }
}

fn route_result(label: &str, outcome: Result<reqwest::Response, reqwest::Error>) -> CheckResult {
    match outcome {
        Ok(response) => {
            let status = response.status().as_u16();
            if status == 200 {
                CheckResult::pass(format!("{label} -> {status}"))
            } else {
                CheckResult::fail(format!("{label} -> {status}"))
            }
        }
        Err(error) => CheckResult::fail(format!("{label} error: {error}")),
    }
}

/// Existence probes issued through the AWS SDK against the edge endpoint.
#[derive(Debug, Clone)]
pub struct AwsProbes {
    s3: aws_sdk_s3::Client,
    dynamodb: aws_sdk_dynamodb::Client,
}

impl AwsProbes {
    /// Build S3 and DynamoDB clients pointed at the edge URL, with test
    /// credential fallbacks and the standard SDK retry policy.
    pub async fn connect(edge_url: &str, region: &str, timeout: Duration) -> Self {
        let credentials = Credentials::new(
            env::var("AWS_ACCESS_KEY_ID").unwrap_or_else(|_| "test".to_string()),
            env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_else(|_| "test".to_string()),
            None,
            None,
            "pizza-stack-check",
        );
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .endpoint_url(edge_url)
            .credentials_provider(credentials)
            .retry_config(RetryConfig::standard().with_max_attempts(SDK_MAX_ATTEMPTS))
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(timeout)
                    .build(),
            )
            .load()
            .await;

        // LocalStack serves buckets under the path, not a virtual host.
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Self {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            dynamodb: aws_sdk_dynamodb::Client::new(&config),
        }
    }

    /// `HeadBucket` existence check.
    pub async fn check_bucket(&self, bucket: &str) -> CheckResult {
        match self.s3.head_bucket().bucket(bucket).send().await {
            Ok(_) => CheckResult::pass(format!("S3 bucket '{bucket}' exists")),
            Err(error) => CheckResult::fail(format!("S3 bucket check failed: {error}")),
        }
    }

    /// `DescribeTable` existence check.
    pub async fn check_table(&self, table: &str) -> CheckResult {
        match self.dynamodb.describe_table().table_name(table).send().await {
            Ok(_) => CheckResult::pass(format!("DynamoDB table '{table}' exists")),
            Err(error) => CheckResult::fail(format!("DynamoDB table check failed: {error}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_base_targets_user_request_path() {
        let probes = EdgeProbes::new("http://localhost:4566/", Duration::from_secs(5));
        assert_eq!(
            probes.exec_base("abc123"),
            "http://localhost:4566/restapis/abc123/dev/_user_request_"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base() {
        let probes = EdgeProbes::new("http://localhost:4566///", Duration::from_secs(5));
        assert_eq!(
            probes.exec_base("abc123"),
            "http://localhost:4566/restapis/abc123/dev/_user_request_"
        );
    }
}
