pub mod disk_struct;
pub mod disk_methods;
#[cfg(test)]
mod tests;
