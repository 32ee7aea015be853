pub mod caption;
pub mod ease;
pub mod sequence;
