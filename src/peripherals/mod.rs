// Hardware we talk to but don't own.
pub mod clock;
pub mod indicator;
pub mod presence;
#[cfg(test)]
mod tests;
