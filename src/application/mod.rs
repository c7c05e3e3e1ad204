pub mod fulfillment;
pub mod health;
pub mod intake;
pub mod queries;

#[cfg(test)]
pub mod testing;
