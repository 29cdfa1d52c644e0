pub mod order;
pub mod response;
pub mod webhook;

pub use order::*;
pub use response::*;
pub use webhook::*;
