pub mod system;
pub mod shared;
pub mod usecases;
