// The glue between the host link and the drives.
pub mod controller_struct;
pub mod controller_methods;
mod dispatch;
