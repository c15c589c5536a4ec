//! HTTP collaborators for the FridgeChef backend and their configuration.

pub mod config;
pub mod http;
pub mod ingredients;
pub mod recipes;
pub mod wire;

pub use config::{ClientConfig, ConfigError};
pub use http::ApiClient;
pub use ingredients::HttpIngredientStore;
pub use recipes::HttpRecipeService;
