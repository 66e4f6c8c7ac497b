pub mod card;
pub mod price;
pub mod report;

pub use card::*;
pub use price::*;
pub use report::*;
