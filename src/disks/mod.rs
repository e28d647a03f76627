pub mod disks_struct;
pub mod disks_methods;
pub mod config;
