// Domain types and value objects
mod bar;

// Re-export commonly used types to the world
pub use bar::PriceBar;
