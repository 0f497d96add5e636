pub mod errors;
pub mod db;
pub mod message;
pub mod user;

#[cfg(test)]
mod tests;
