pub mod card;
pub mod links;
pub mod storm;
