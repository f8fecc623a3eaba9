use std::process::Command;

/// Runs Terraform subcommands against a working directory, capturing stdout.
///
/// The locator only consumes stdout of successful invocations, so the seam
/// collapses every failure mode (missing binary, non-zero exit, bad output)
/// into a message.
pub trait TerraformRunner {
    /// Run `terraform -chdir=<tf_dir> <args...>` and return its stdout.
    fn run(&self, tf_dir: &str, args: &[&str]) -> Result<String, String>;
}

/// Production runner shelling out to the `terraform` binary on PATH.
#[derive(Debug, Clone, Copy)]
pub struct TerraformCli;

impl TerraformRunner for TerraformCli {
    fn run(&self, tf_dir: &str, args: &[&str]) -> Result<String, String> {
        let chdir = format!("-chdir={tf_dir}");
        let output = Command::new("terraform")
            .arg(&chdir)
            .args(args)
            .output()
            .map_err(|error| format!("failed to execute terraform: {error}"))?;

        if !output.status.success() {
            return Err(format!(
                "terraform {} exited with {}",
                args.join(" "),
                output.status
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|error| format!("terraform produced non-UTF-8 output: {error}"))
    }
}
