use std::process::exit;
use std::time::Duration;

use clap::Parser;
use pizza_stack_check::locator::detect_stack;
use pizza_stack_check::probes::{AwsProbes, EdgeProbes};
use pizza_stack_check::terraform_cli::{TerraformCli, TerraformRunner};
use pizza_stack_core::report::{CheckReport, CheckResult, EXIT_UNRESOLVED_STACK, FAIL_MARK, PASS_MARK};

#[derive(Parser)]
#[command(
    name = "pizza-stack-check",
    about = "Pizza stack sanity check (LocalStack + Terraform)"
)]
struct Cli {
    /// Terraform working directory holding the stack state
    #[arg(long, default_value = "terraform")]
    tf_dir: String,
    /// LocalStack edge host
    #[arg(long, default_value = "localhost")]
    host: String,
    /// LocalStack edge port
    #[arg(long, default_value_t = 4566)]
    port: u16,
    /// Region used for the emulated AWS clients
    #[arg(long, env = "AWS_DEFAULT_REGION", default_value = "us-east-1")]
    region: String,
    /// Per-call timeout in seconds
    #[arg(long, default_value_t = 5.0)]
    timeout: f64,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    exit(run(cli, &TerraformCli).await);
}

async fn run(cli: Cli, terraform: &dyn TerraformRunner) -> i32 {
    let base = format!("http://{}:{}", cli.host, cli.port);
    let timeout = Duration::from_secs_f64(cli.timeout);

    // Unresolved identifiers abort before any client is built or probe fires.
    let stack = match detect_stack(terraform, &cli.tf_dir) {
        Ok(stack) => stack,
        Err(error) => {
            println!("{FAIL_MARK} fail: {}", error.message());
            return EXIT_UNRESOLVED_STACK;
        }
    };

    println!("[*] Pizza stack sanity check");
    println!("    project : {}", stack.project);
    println!("    bucket  : {}", stack.bucket);
    println!("    table   : {}", stack.table);
    println!("    rest_id : {}", stack.rest_api_id);

    let mut report = CheckReport::new();
    let edge = EdgeProbes::new(&base, timeout);
    record(&mut report, edge.check_edge_health().await);

    let aws = AwsProbes::connect(&base, &cli.region, timeout).await;
    record(&mut report, aws.check_bucket(&stack.bucket).await);
    record(&mut report, aws.check_table(&stack.table).await);

    let exec_base = edge.exec_base(&stack.rest_api_id);
    record(&mut report, edge.check_health_route(&exec_base).await);
    record(&mut report, edge.check_toppings_route(&exec_base).await);

    if report.all_passed() {
        println!("{PASS_MARK} All checks passed");
    } else {
        println!("{FAIL_MARK} One or more checks failed");
    }
    report.exit_code()
}

fn record(report: &mut CheckReport, result: CheckResult) {
    println!("{} {}", result.mark(), result.message);
    report.push(result);
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Runner standing in for a workspace where `terraform apply` never ran.
    struct UnprovisionedTerraform {
        calls: Cell<usize>,
    }

    impl TerraformRunner for UnprovisionedTerraform {
        fn run(&self, _tf_dir: &str, _args: &[&str]) -> Result<String, String> {
            self.calls.set(self.calls.get() + 1);
            Err("No state file was found!".to_string())
        }
    }

    #[tokio::test]
    async fn unresolved_stack_exits_two_without_running_checks() {
        let terraform = UnprovisionedTerraform {
            calls: Cell::new(0),
        };
        let cli = Cli::parse_from(["pizza-stack-check", "--host", "nowhere.invalid"]);

        let code = run(cli, &terraform).await;

        assert_eq!(code, EXIT_UNRESOLVED_STACK);
        // Two discovery commands per identifier, nothing else: the early
        // return precedes every client build and probe.
        assert_eq!(terraform.calls.get(), 6);
    }

    #[test]
    fn defaults_match_local_emulator_setup() {
        let cli = Cli::parse_from(["pizza-stack-check"]);
        assert_eq!(cli.tf_dir, "terraform");
        assert_eq!(cli.host, "localhost");
        assert_eq!(cli.port, 4566);
        assert_eq!(cli.timeout, 5.0);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "pizza-stack-check",
            "--tf-dir",
            "infra",
            "--host",
            "emulator",
            "--port",
            "14566",
            "--region",
            "eu-west-1",
            "--timeout",
            "1.5",
        ]);
        assert_eq!(cli.tf_dir, "infra");
        assert_eq!(cli.host, "emulator");
        assert_eq!(cli.port, 14566);
        assert_eq!(cli.region, "eu-west-1");
        assert_eq!(cli.timeout, 1.5);
    }
}
