/// Suffix the demo Terraform module appends to the project name when it
/// names the S3 bucket. Stripping it recovers the project name.
pub const DEMO_BUCKET_SUFFIX: &str = "-demo-bucket";

/// Fallback project name when the bucket does not carry the demo suffix.
pub const UNKNOWN_PROJECT: &str = "unknown";

/// Identifiers of the provisioned demo stack, resolved once at startup and
/// read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackIdentifiers {
    pub project: String,
    pub bucket: String,
    pub table: String,
    pub rest_api_id: String,
}

impl StackIdentifiers {
    /// Assemble identifiers from the three resolved names, deriving the
    /// project name from the bucket.
    pub fn new(
        bucket: impl Into<String>,
        table: impl Into<String>,
        rest_api_id: impl Into<String>,
    ) -> Self {
        let bucket = bucket.into();
        Self {
            project: derive_project_name(&bucket),
            bucket,
            table: table.into(),
            rest_api_id: rest_api_id.into(),
        }
    }
}

/// Derive the project name by stripping [`DEMO_BUCKET_SUFFIX`] from the
/// bucket name; buckets named differently map to [`UNKNOWN_PROJECT`].
pub fn derive_project_name(bucket: &str) -> String {
    bucket
        .strip_suffix(DEMO_BUCKET_SUFFIX)
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
}
