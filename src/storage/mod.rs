// The storage card, as far as the drives are concerned.
pub mod storage_trait;
pub mod directory_storage;
#[cfg(test)]
mod tests;
