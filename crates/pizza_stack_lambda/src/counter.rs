/// Increments the toppings counter and returns the new count.
///
/// Atomicity belongs to the store: implementations issue a single
/// read-modify-write primitive (DynamoDB `ADD`), never a get-then-put.
pub trait ToppingsCounter {
    fn increment(&self) -> Result<i64, String>;
}
