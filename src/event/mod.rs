pub mod event_struct;
pub mod event_methods;
pub mod pool;
#[cfg(test)]
mod tests;
