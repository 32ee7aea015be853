pub mod grid;
pub mod record;
