pub mod body;
pub mod dogs;
pub mod error;
pub mod health;
pub mod root;

pub use body::DogBody;
