pub mod assessment;
pub mod export;
pub mod screening;
pub mod visit;
